//! Shaped reward weights, all in one place; stateless.

use serde_json::Value;

use crate::state::{flag, has_events, num};

pub const WOOD_COLLECTED: f32 = 2.0;
pub const TREE_CHOPPED: f32 = 5.0;
pub const SHELTER_BUILT: f32 = 50.0;
pub const DAMAGE_TAKEN: f32 = -10.0;
pub const DEATH: f32 = -100.0;
pub const SURVIVED_NIGHT: f32 = 200.0;

// Movement-first curriculum weights.
pub const MOVE_SCALE: f32 = 1.0;
pub const REACH_TARGET_BONUS: f32 = 10.0;

/// Shaped survival reward for one transition.
///
/// Event flags drive the reward when any are present. An empty or missing
/// event set falls back to inferring the same outcomes from raw state
/// deltas. The two paths can disagree on magnitude when several outcomes
/// coincide; see the dual-path tests below.
pub fn survival_reward(prev: &Value, next: &Value, events: &Value) -> f32 {
    if has_events(events) {
        let mut reward = 0.0;
        if flag(events, "wood_collected") {
            reward += WOOD_COLLECTED;
        }
        if flag(events, "tree_chopped") {
            reward += TREE_CHOPPED;
        }
        if flag(events, "shelter_built") {
            reward += SHELTER_BUILT;
        }
        if flag(events, "damage_taken") {
            reward += DAMAGE_TAKEN;
        }
        if flag(events, "died") {
            reward += DEATH;
        }
        if flag(events, "survived_night") {
            reward += SURVIVED_NIGHT;
        }
        return reward;
    }

    // No events supplied: infer from state deltas.
    let mut reward = 0.0;
    let prev_health = num(prev, "health");
    let next_health = num(next, "health");
    if next_health < prev_health {
        reward += DAMAGE_TAKEN;
    }
    if next_health <= 0.0 && prev_health > 0.0 {
        reward += DEATH;
    }
    if num(next, "wood_count") > num(prev, "wood_count") {
        reward += WOOD_COLLECTED;
    }
    if num(prev, "is_night") != 0.0 && num(next, "is_night") == 0.0 && next_health > 0.0 {
        reward += SURVIVED_NIGHT;
    }
    reward
}
