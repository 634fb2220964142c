use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{ClientConfig, ProtocolMode};
use crate::net::channel::LineChannel;
use crate::net::errors::ClientError;
use crate::protocol::{Action, ActionMessage, STATE_REQUEST};

/// Persistent TCP client for the game bridge protocol.
///
/// Keeps one connection and one in-flight request at a time; every operation
/// retries with a fixed delay, dropping and reopening the socket between
/// attempts, and fails with [`ClientError::Exhausted`] once the attempt
/// budget is spent.
pub struct BridgeClient {
    config: ClientConfig,
    channel: Option<LineChannel>,
}

enum Request {
    State,
    Action(Action),
    /// Push-mode read: no request line, just wait for the next state.
    Read,
}

impl BridgeClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            channel: None,
        }
    }

    pub fn mode(&self) -> ProtocolMode {
        self.config.mode
    }

    /// Opens the connection. Idempotent: a socket that still has a peer is
    /// reused, anything else is replaced by a fresh one.
    pub async fn connect(&mut self) -> Result<(), ClientError> {
        if self
            .channel
            .as_ref()
            .is_some_and(|chan| chan.peer_addr().is_ok())
        {
            return Ok(());
        }
        self.channel = None;
        let addr = self.config.addr();
        let channel = LineChannel::connect(&addr, self.config.timeout).await?;
        info!(%addr, "connected");
        self.channel = Some(channel);
        Ok(())
    }

    /// Sends the literal `state` line and returns the parsed reply.
    pub async fn request_state(&mut self) -> Result<Value, ClientError> {
        self.exchange(Request::State).await
    }

    /// Sends `{"action_id": n}` and returns the parsed reply as the new
    /// state.
    pub async fn send_action(&mut self, action: Action) -> Result<Value, ClientError> {
        self.exchange(Request::Action(action)).await
    }

    /// Reads one unsolicited state line (push-mode servers).
    pub async fn next_state(&mut self) -> Result<Value, ClientError> {
        self.exchange(Request::Read).await
    }

    /// Drops the connection. Safe to call repeatedly.
    pub fn close(&mut self) {
        if self.channel.take().is_some() {
            debug!("connection closed");
        }
    }

    async fn exchange(&mut self, request: Request) -> Result<Value, ClientError> {
        let attempts = self.config.reconnect_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_exchange(&request).await {
                Ok(state) => return Ok(state),
                Err(err) if attempt < attempts => {
                    self.channel = None;
                    warn!(
                        attempt,
                        attempts,
                        error = %err,
                        delay = ?self.config.reconnect_delay,
                        "exchange failed; reconnecting"
                    );
                    tokio::time::sleep(self.config.reconnect_delay).await;
                }
                Err(err) => {
                    self.channel = None;
                    return Err(ClientError::Exhausted {
                        attempts,
                        last: Box::new(err),
                    });
                }
            }
        }
    }

    async fn try_exchange(&mut self, request: &Request) -> Result<Value, ClientError> {
        self.connect().await?;
        let channel = self.channel.as_mut().ok_or(ClientError::Closed)?;

        match request {
            Request::State => channel.write_line(STATE_REQUEST).await?,
            Request::Action(action) => {
                let line = serde_json::to_string(&ActionMessage::from(*action))?;
                channel.write_line(&line).await?;
            }
            Request::Read => {}
        }

        let line = channel.read_line().await?.ok_or(ClientError::Closed)?;
        Ok(serde_json::from_str(&line)?)
    }
}
