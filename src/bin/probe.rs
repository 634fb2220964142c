use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use stannum::config::{ClientConfig, ProtocolMode};
use stannum::net::BridgeClient;
use stannum::protocol::Action;

/// Check that a game server is reachable; optionally run one
/// state/action/state exchange or watch the state stream.
#[derive(Parser, Debug)]
#[command(name = "stannum-probe")]
struct Args {
    /// Server host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(long, default_value_t = 8765)]
    port: u16,

    /// After connecting: request a state, send one action, request again
    #[arg(long)]
    exchange: bool,

    /// Keep reading states and print them
    #[arg(long)]
    watch: bool,

    /// Do not send request lines; read only (push-based servers)
    #[arg(long)]
    no_request: bool,
}

fn format_state(state: &Value) -> String {
    let mut lines = vec!["--- Game state ---".to_string()];
    if let Some(map) = state.as_object() {
        for (key, value) in map {
            if key == "last_reward_events" && value.as_object().is_some_and(|m| m.is_empty()) {
                continue;
            }
            lines.push(format!("  {key}: {value}"));
        }
    }
    lines.join("\n")
}

fn state_keys(state: &Value) -> Vec<&str> {
    state
        .as_object()
        .map(|map| map.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let mode = if args.no_request {
        ProtocolMode::Push
    } else {
        ProtocolMode::RequestResponse
    };
    let config = ClientConfig {
        host: args.host.clone(),
        port: args.port,
        timeout: Duration::from_secs(5),
        mode,
        ..ClientConfig::default()
    };
    let mut client = BridgeClient::new(config);

    if let Err(err) = client.connect().await {
        eprintln!("FAIL could not connect to {}:{}: {err}", args.host, args.port);
        return ExitCode::FAILURE;
    }
    println!("OK connected to {}:{}", args.host, args.port);

    if args.exchange {
        let outcome = async {
            let state = client.request_state().await?;
            println!("  request_state() -> keys: {:?}", state_keys(&state));
            let next = client.send_action(Action::MoveLeft).await?;
            println!("  send_action(0) -> keys: {:?}", state_keys(&next));
            Ok::<_, stannum::net::ClientError>(())
        }
        .await;
        if let Err(err) = outcome {
            eprintln!("FAIL exchange failed: {err}");
            client.close();
            return ExitCode::FAILURE;
        }
    }

    if args.watch {
        loop {
            let state = if args.no_request {
                client.next_state().await
            } else {
                client.request_state().await
            };
            match state {
                Ok(state) => println!("{}", format_state(&state)),
                Err(err) => {
                    eprintln!("FAIL watch ended: {err}");
                    client.close();
                    return ExitCode::FAILURE;
                }
            }
            if !args.no_request {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        }
    }

    client.close();
    ExitCode::SUCCESS
}
