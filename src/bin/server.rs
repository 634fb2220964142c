use clap::Parser;
use tracing_subscriber::EnvFilter;

use stannum::config::ServerConfig;
use stannum::server::MockServer;

/// Deterministic mock game server: JSON state over TCP, one world per
/// connection.
#[derive(Parser, Debug)]
#[command(name = "stannum-server")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8765)]
    port: u16,

    /// Base seed; each connection derives its own stream from it
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = ServerConfig {
        host: args.host,
        port: args.port,
        seed: args.seed,
    };
    let server = MockServer::bind(&config).await?;
    server.run().await?;
    Ok(())
}
