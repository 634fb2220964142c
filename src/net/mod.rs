pub mod channel;
pub mod client;
pub mod errors;

pub use channel::LineChannel;
pub use client::BridgeClient;
pub use errors::{ChannelError, ClientError};
