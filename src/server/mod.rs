pub mod world;

pub use world::{RewardEvents, World, WorldState};

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tracing::{Instrument, debug, info, info_span};

use crate::config::ServerConfig;
use crate::net::channel::LineChannel;
use crate::net::errors::ChannelError;
use crate::protocol::{Command, parse_command};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("bind {addr} failed: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("accept failed: {0}")]
    Accept(#[from] std::io::Error),
}

#[derive(Debug, Error)]
enum ConnectionError {
    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error("encode state failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Deterministic stand-in for a live game: serves JSON state over TCP and
/// advances one independent world per connection.
pub struct MockServer {
    listener: TcpListener,
    seed: u64,
}

impl MockServer {
    pub async fn bind(config: &ServerConfig) -> Result<Self, ServerError> {
        let addr = config.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { addr, source })?;
        info!(addr = %local, seed = config.seed, "mock game server listening");
        Ok(Self {
            listener,
            seed: config.seed,
        })
    }

    /// The bound address; useful when the config asked for port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until the listener fails. Connections are served
    /// on their own tasks and share nothing; one connection's failure never
    /// reaches the others or the accept loop.
    pub async fn run(self) -> Result<(), ServerError> {
        loop {
            let (stream, peer) = self.listener.accept().await?;
            // Each client gets a deterministic but distinct stream.
            let seed = self.seed.wrapping_add(u64::from(peer.port() % 10000));
            tokio::spawn(
                async move {
                    info!("client connected");
                    match serve_connection(stream, seed).await {
                        Ok(()) => info!("client disconnected"),
                        Err(err) => debug!(error = %err, "connection ended with error"),
                    }
                }
                .instrument(info_span!("conn", %peer)),
            );
        }
    }
}

async fn serve_connection(stream: TcpStream, seed: u64) -> Result<(), ConnectionError> {
    let mut channel = LineChannel::from_stream(stream, None);
    let mut world = World::new(seed);

    loop {
        let line = match channel.read_line().await? {
            Some(line) => line,
            None => return Ok(()),
        };
        let state = match parse_command(&line) {
            Command::Apply(action) => {
                debug!(action = action.index(), "apply");
                world.apply(action)
            }
            Command::State => world.state(),
            Command::Unknown => {
                debug!(line = %line, "unrecognized command");
                world.state()
            }
        };
        let payload = serde_json::to_string(state)?;
        channel.write_line(&payload).await?;
    }
}
