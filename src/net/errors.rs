use std::time::Duration;

use thiserror::Error;

/// Transport faults at the framed-channel level.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("connect to {addr} failed: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("connect to {addr} timed out after {timeout:?}")]
    ConnectTimeout { addr: String, timeout: Duration },

    #[error("read timed out after {0:?}")]
    ReadTimeout(Duration),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Faults surfaced by the protocol client. Decode faults are retried the
/// same way as transport faults; [`ClientError::Exhausted`] is fatal to the
/// current episode attempt.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error("connection closed by peer")]
    Closed,

    #[error("malformed state line: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<ClientError>,
    },
}
