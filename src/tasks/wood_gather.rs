use serde_json::Value;

use crate::state::num;
use crate::tasks::{StepInfo, Task, base_info};

/// Reward for collecting wood; ends at the step cap or when the optional
/// wood threshold is reached.
#[derive(Debug, Clone)]
pub struct WoodGatherTask {
    max_episode_steps: u64,
    wood_threshold: Option<i64>,
    reward_per_wood: f32,
}

impl WoodGatherTask {
    pub fn new(max_episode_steps: u64) -> Self {
        Self {
            max_episode_steps,
            wood_threshold: None,
            reward_per_wood: 1.0,
        }
    }

    pub fn with_threshold(mut self, wood_threshold: i64) -> Self {
        self.wood_threshold = Some(wood_threshold);
        self
    }

    pub fn with_reward_per_wood(mut self, reward_per_wood: f32) -> Self {
        self.reward_per_wood = reward_per_wood;
        self
    }
}

impl Task for WoodGatherTask {
    fn reward(&self, prev: &Value, next: &Value, _events: &Value) -> f32 {
        let delta = num(next, "wood_count") - num(prev, "wood_count");
        delta as f32 * self.reward_per_wood
    }

    fn is_done(&self, state: &Value, step_count: u64) -> bool {
        if step_count >= self.max_episode_steps {
            return true;
        }
        self.wood_threshold
            .is_some_and(|threshold| num(state, "wood_count") as i64 >= threshold)
    }

    fn info(&self, state: &Value, episode_reward: f32, step_count: u64) -> StepInfo {
        base_info(state, episode_reward, step_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wood(count: i64) -> Value {
        json!({ "wood_count": count })
    }

    #[test]
    fn reward_is_wood_delta_times_unit_reward() {
        let task = WoodGatherTask::new(100);
        assert_eq!(task.reward(&wood(2), &wood(5), &json!({})), 3.0);
        assert_eq!(task.reward(&wood(5), &wood(5), &json!({})), 0.0);

        let task = task.with_reward_per_wood(2.5);
        assert_eq!(task.reward(&wood(0), &wood(2), &json!({})), 5.0);
    }

    #[test]
    fn ends_at_threshold_when_configured() {
        let task = WoodGatherTask::new(100).with_threshold(10);
        assert!(!task.is_done(&wood(9), 1));
        assert!(task.is_done(&wood(10), 1));
        assert!(task.is_done(&wood(15), 1));
    }

    #[test]
    fn without_threshold_only_the_cap_ends_it() {
        let task = WoodGatherTask::new(50);
        assert!(!task.is_done(&wood(1_000), 49));
        assert!(task.is_done(&wood(0), 50));
    }
}
