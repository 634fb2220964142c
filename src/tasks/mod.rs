//! Task abstraction: reward, termination, and diagnostics are defined per
//! task so the environment stays generic across training stages.

mod locomotion;
mod survival;
mod wood_gather;

pub mod rewards;

pub use locomotion::LocomotionTask;
pub use survival::SurvivalTask;
pub use wood_gather::WoodGatherTask;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::state::num;

pub const DEFAULT_MAX_EPISODE_STEPS: u64 = 10_000;

/// Per-step diagnostics, uniform across tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepInfo {
    pub episode_length: u64,
    pub total_reward: f32,
    pub survival_time: u64,
    pub wood_collected: i64,
}

/// Strategy object consumed once per step: reward from a state transition,
/// the done flag, and diagnostics.
///
/// ## Example
/// ```
/// use stannum::tasks::get_task;
///
/// let task = get_task("locomotion", 10_000).unwrap();
/// assert!(!task.is_done(&serde_json::json!({}), 5));
/// ```
pub trait Task: Send {
    /// Step reward from `(prev_state, next_state, events)`.
    fn reward(&self, prev: &Value, next: &Value, events: &Value) -> f32;

    /// Whether the episode ends on this state.
    fn is_done(&self, state: &Value, step_count: u64) -> bool;

    fn info(&self, state: &Value, episode_reward: f32, step_count: u64) -> StepInfo;
}

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("unknown task {0:?}; use locomotion, wood, or survival")]
    Unknown(String),
}

/// Looks a task up by name. Single place to add new tasks.
pub fn get_task(name: &str, max_episode_steps: u64) -> Result<Box<dyn Task>, TaskError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "locomotion" => Ok(Box::new(LocomotionTask::new(max_episode_steps))),
        "wood" => Ok(Box::new(WoodGatherTask::new(max_episode_steps))),
        "survival" => Ok(Box::new(SurvivalTask::new(max_episode_steps))),
        other => Err(TaskError::Unknown(other.to_string())),
    }
}

pub(crate) fn base_info(state: &Value, episode_reward: f32, step_count: u64) -> StepInfo {
    StepInfo {
        episode_length: step_count,
        total_reward: episode_reward,
        survival_time: step_count,
        wood_collected: num(state, "wood_count") as i64,
    }
}
