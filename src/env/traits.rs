use async_trait::async_trait;

use crate::env::errors::EnvError;

/// Step-wise interactive environment driven by an external training loop.
///
/// `reset` yields the first observation of an episode; `step` advances one
/// tick and reports `(obs, reward, terminated, truncated, info)`. Both block
/// the caller until the underlying exchange completes or its retry budget is
/// exhausted.
#[async_trait]
pub trait Env: Send {
    type Obs: Send + Clone + 'static;
    type Act: Send + Clone + 'static;
    type Info: Send + Clone + 'static;

    async fn reset(&mut self) -> Result<(Self::Obs, Self::Info), EnvError>;

    async fn step(
        &mut self,
        act: Self::Act,
    ) -> Result<(Self::Obs, f32, bool, bool, Self::Info), EnvError>;

    async fn close(&mut self) -> Result<(), EnvError>;
}
