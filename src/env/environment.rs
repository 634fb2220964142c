use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::ProtocolMode;
use crate::env::errors::EnvError;
use crate::env::observation::state_to_obs;
use crate::env::traits::Env;
use crate::net::client::BridgeClient;
use crate::protocol::Action;
use crate::tasks::{StepInfo, Task};

/// Environment over one protocol client. Converts raw state maps into the
/// fixed-order observation vector and delegates reward, termination, and
/// diagnostics to the task.
pub struct GameEnv {
    client: BridgeClient,
    task: Box<dyn Task>,
    state: Option<Value>,
    step_count: u64,
    episode_reward: f32,
}

impl GameEnv {
    pub fn new(client: BridgeClient, task: Box<dyn Task>) -> Self {
        Self {
            client,
            task,
            state: None,
            step_count: 0,
            episode_reward: 0.0,
        }
    }

    async fn initial_state(&mut self) -> Result<Value, EnvError> {
        let state = match self.client.mode() {
            ProtocolMode::RequestResponse => self.client.request_state().await?,
            ProtocolMode::Push => self.client.next_state().await?,
        };
        Ok(state)
    }
}

#[async_trait]
impl Env for GameEnv {
    type Obs = Vec<f32>;
    type Act = i64;
    type Info = StepInfo;

    /// Connects and fetches the initial state without sending an action.
    async fn reset(&mut self) -> Result<(Self::Obs, Self::Info), EnvError> {
        self.step_count = 0;
        self.episode_reward = 0.0;
        self.state = None;
        self.client.connect().await?;
        let state = self.initial_state().await?;
        let obs = state_to_obs(&state);
        let info = self.task.info(&state, 0.0, 0);
        self.state = Some(state);
        Ok((obs, info))
    }

    async fn step(
        &mut self,
        act: Self::Act,
    ) -> Result<(Self::Obs, f32, bool, bool, Self::Info), EnvError> {
        let prev = self.state.clone().ok_or(EnvError::ResetRequired)?;
        let action = Action::from_index(act);

        let next = self.client.send_action(action).await?;
        self.step_count += 1;

        let events = next
            .get("last_reward_events")
            .cloned()
            .unwrap_or(Value::Null);
        let reward = self.task.reward(&prev, &next, &events);
        self.episode_reward += reward;
        let terminated = self.task.is_done(&next, self.step_count);
        let info = self.task.info(&next, self.episode_reward, self.step_count);
        let obs = state_to_obs(&next);
        debug!(
            action = action.index(),
            reward,
            terminated,
            step = self.step_count,
            "step"
        );
        self.state = Some(next);

        // Time-limit cutoffs are not reported separately; the task's step
        // cap terminates, so truncated stays false.
        Ok((obs, reward, terminated, false, info))
    }

    async fn close(&mut self) -> Result<(), EnvError> {
        self.client.close();
        self.state = None;
        Ok(())
    }
}
