//! Wire-level message shapes shared by the client and the mock server.
//!
//! One UTF-8 JSON document per line, terminated by a single `\n`. A
//! client->server line is the literal `state`, a bare digit `0`-`6`, or a
//! JSON object carrying the action index. Server->client lines are always a
//! full state object.

use serde::{Deserialize, Serialize};

/// Literal request line asking the server for the current state.
pub const STATE_REQUEST: &str = "state";

pub const NUM_ACTIONS: i64 = 7;

/// The closed action set. Anything outside it is a no-op by contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Gather,
    Build,
    Attack,
    NoOp,
}

impl Action {
    /// Coerces an arbitrary index into the action set; out-of-range values
    /// become [`Action::NoOp`] rather than an error.
    pub fn from_index(index: i64) -> Self {
        match index {
            0 => Action::MoveLeft,
            1 => Action::MoveRight,
            2 => Action::Jump,
            3 => Action::Gather,
            4 => Action::Build,
            5 => Action::Attack,
            _ => Action::NoOp,
        }
    }

    pub fn index(self) -> i64 {
        match self {
            Action::MoveLeft => 0,
            Action::MoveRight => 1,
            Action::Jump => 2,
            Action::Gather => 3,
            Action::Build => 4,
            Action::Attack => 5,
            Action::NoOp => 6,
        }
    }
}

/// JSON action line. Serializes as `{"action_id": n}`; deserializes from
/// either `action_id` or the alternate `action` key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActionMessage {
    #[serde(alias = "action")]
    pub action_id: i64,
}

impl From<Action> for ActionMessage {
    fn from(action: Action) -> Self {
        Self {
            action_id: action.index(),
        }
    }
}

/// One decoded client->server line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Return the current state unchanged.
    State,
    /// Apply the action and return the resulting state.
    Apply(Action),
    /// Unrecognized input; answered with the current state, no tick.
    Unknown,
}

/// Decodes a command line. Malformed input is never an error here; the
/// server answers it with unchanged state.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line == STATE_REQUEST {
        return Command::State;
    }
    if let Ok(index) = line.parse::<i64>() {
        if (0..NUM_ACTIONS).contains(&index) {
            return Command::Apply(Action::from_index(index));
        }
        return Command::Unknown;
    }
    if let Ok(msg) = serde_json::from_str::<ActionMessage>(line) {
        if (0..NUM_ACTIONS).contains(&msg.action_id) {
            return Command::Apply(Action::from_index(msg.action_id));
        }
        return Command::Unknown;
    }
    Command::Unknown
}
