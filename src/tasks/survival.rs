use serde_json::Value;

use crate::state::{flag, num};
use crate::tasks::{StepInfo, Task, base_info, rewards};

/// Full survive-the-night task: shaped event rewards, termination on death
/// or on surviving a night.
#[derive(Debug, Clone)]
pub struct SurvivalTask {
    max_episode_steps: u64,
}

impl SurvivalTask {
    pub fn new(max_episode_steps: u64) -> Self {
        Self { max_episode_steps }
    }
}

impl Task for SurvivalTask {
    fn reward(&self, prev: &Value, next: &Value, events: &Value) -> f32 {
        rewards::survival_reward(prev, next, events)
    }

    fn is_done(&self, state: &Value, step_count: u64) -> bool {
        if step_count >= self.max_episode_steps {
            return true;
        }
        if num(state, "health") <= 0.0 {
            return true;
        }
        state
            .get("last_reward_events")
            .is_some_and(|events| flag(events, "survived_night"))
    }

    fn info(&self, state: &Value, episode_reward: f32, step_count: u64) -> StepInfo {
        base_info(state, episode_reward, step_count)
    }
}
