pub mod config;
pub mod env;
pub mod net;
pub mod protocol;
pub mod server;
pub mod state;
pub mod tasks;

pub use config::{ClientConfig, ProtocolMode, ServerConfig};
pub use env::{Env, EnvError, GameEnv, VecEnv};
pub use net::{BridgeClient, ChannelError, ClientError, LineChannel};
pub use protocol::Action;
pub use server::{MockServer, World, WorldState};
pub use tasks::{LocomotionTask, StepInfo, SurvivalTask, Task, WoodGatherTask, get_task};
