use thiserror::Error;

use crate::net::errors::ClientError;

#[derive(Debug, Error)]
pub enum EnvError {
    /// Local usage fault; not retryable.
    #[error("step() called before reset()")]
    ResetRequired,

    #[error("wrong action batch size: got {got}, expected {expected}")]
    BatchSize { got: usize, expected: usize },

    #[error(transparent)]
    Client(#[from] ClientError),
}
