use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8765;
pub const DEFAULT_SEED: u64 = 42;

/// How the client obtains state lines from the server.
///
/// Request/response servers (like the mock server) answer each `state` or
/// action line with one state line. Push servers (a live game mod) stream
/// state lines without being asked. The caller picks the mode up front; it is
/// never inferred from call order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProtocolMode {
    #[default]
    RequestResponse,
    Push,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Per socket read/connect attempt, not per logical call.
    pub timeout: Duration,
    pub reconnect_attempts: u32,
    /// Fixed delay between reconnect attempts.
    pub reconnect_delay: Duration,
    pub mode: ProtocolMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: Duration::from_secs(30),
            reconnect_attempts: 5,
            reconnect_delay: Duration::from_secs(1),
            mode: ProtocolMode::RequestResponse,
        }
    }
}

impl ClientConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Base seed; each connection derives its own stream from it.
    pub seed: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            seed: DEFAULT_SEED,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
