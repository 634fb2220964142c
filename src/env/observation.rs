use serde_json::Value;

use crate::state::num;

/// Observation vector key order. The order is part of the contract: policy
/// code indexes into the vector by these offsets, so it must hold across
/// resets within a run.
pub const OBS_KEYS: [&str; 7] = [
    "player_x",
    "player_y",
    "health",
    "wood_count",
    "is_night",
    "enemy_distance",
    "enemy_count",
];

/// Builds the fixed-order observation vector from a raw state map.
/// Booleans map to {0, 1}; missing keys default to 0.
pub fn state_to_obs(state: &Value) -> Vec<f32> {
    OBS_KEYS.iter().map(|key| num(state, key) as f32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn preserves_declared_key_order() {
        let state = json!({
            "player_x": 1.0,
            "player_y": 2.0,
            "health": 90,
            "wood_count": 4,
            "is_night": 1,
            "enemy_distance": 55.0,
            "enemy_count": 2,
        });
        assert_eq!(
            state_to_obs(&state),
            vec![1.0, 2.0, 90.0, 4.0, 1.0, 55.0, 2.0]
        );
    }

    #[test]
    fn missing_keys_default_to_zero() {
        let state = json!({"health": 100});
        assert_eq!(
            state_to_obs(&state),
            vec![0.0, 0.0, 100.0, 0.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn booleans_map_to_zero_one() {
        let state = json!({"is_night": true, "player_x": -3.0});
        let obs = state_to_obs(&state);
        assert_eq!(obs[0], -3.0);
        assert_eq!(obs[4], 1.0);
    }
}
