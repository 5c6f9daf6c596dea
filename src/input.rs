//! Key bindings
//!
//! Translates host key codes (`KeyboardEvent.code` strings) into
//! controller commands, depending on the current phase.

use serde::{Deserialize, Serialize};

use crate::controller::Command;
use crate::sim::GamePhase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Keys that jump while Running
    pub jump: Vec<String>,
    /// Keys that start (Idle) or restart (GameOver)
    pub start: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            jump: vec!["Space".to_string(), "ArrowUp".to_string()],
            start: vec!["Space".to_string()],
        }
    }
}

impl KeyBindings {
    /// Command for a key press in the given phase. Keys with no meaning
    /// in that phase map to `None`.
    pub fn command_for(&self, code: &str, phase: GamePhase) -> Option<Command> {
        match phase {
            GamePhase::Running if is_bound(&self.jump, code) => Some(Command::Jump),
            GamePhase::Idle | GamePhase::GameOver if is_bound(&self.start, code) => {
                Some(Command::StartOrRestart)
            }
            _ => None,
        }
    }
}

fn is_bound(keys: &[String], code: &str) -> bool {
    keys.iter().any(|k| k == code)
}
