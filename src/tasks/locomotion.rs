use serde_json::Value;

use crate::state::num;
use crate::tasks::{StepInfo, Task, base_info, rewards};

/// First-stage task: learn to move right.
///
/// Reward is the scaled `player_x` delta (negative when moving left), plus a
/// one-time bonus on the tick that crosses `target_x`, when a target is set.
/// No early termination; only the step cap ends the episode.
#[derive(Debug, Clone)]
pub struct LocomotionTask {
    max_episode_steps: u64,
    scale: f32,
    target_x: Option<f64>,
    target_bonus: f32,
}

impl LocomotionTask {
    pub fn new(max_episode_steps: u64) -> Self {
        Self {
            max_episode_steps,
            scale: rewards::MOVE_SCALE,
            target_x: None,
            target_bonus: rewards::REACH_TARGET_BONUS,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_target(mut self, target_x: f64) -> Self {
        self.target_x = Some(target_x);
        self
    }
}

impl Task for LocomotionTask {
    fn reward(&self, prev: &Value, next: &Value, _events: &Value) -> f32 {
        let prev_x = num(prev, "player_x");
        let next_x = num(next, "player_x");
        let mut reward = (next_x - prev_x) as f32 * self.scale;
        if let Some(target) = self.target_x {
            if prev_x < target && target <= next_x {
                reward += self.target_bonus;
            }
        }
        reward
    }

    fn is_done(&self, _state: &Value, step_count: u64) -> bool {
        step_count >= self.max_episode_steps
    }

    fn info(&self, state: &Value, episode_reward: f32, step_count: u64) -> StepInfo {
        base_info(state, episode_reward, step_count)
    }
}
