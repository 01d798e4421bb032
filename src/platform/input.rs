//! Raw input events and the trigger mapping
//!
//! The game has exactly one action. Pointer presses and touch starts always
//! trigger it; keys trigger it when listed in the `TriggerMap`.

use serde::{Deserialize, Serialize};

/// Input event as delivered by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    PointerPress,
    TouchStart,
    /// Key identifier as reported by the host (`KeyboardEvent.code`, a
    /// terminal character, ...)
    Key(String),
}

/// Which raw inputs count as a trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerMap {
    pub keys: Vec<String>,
    pub pointer: bool,
    pub touch: bool,
}

impl Default for TriggerMap {
    fn default() -> Self {
        Self {
            keys: vec!["Space".to_string(), " ".to_string()],
            pointer: true,
            touch: true,
        }
    }
}

impl TriggerMap {
    pub fn is_trigger(&self, input: &RawInput) -> bool {
        match input {
            RawInput::PointerPress => self.pointer,
            RawInput::TouchStart => self.touch,
            RawInput::Key(key) => self.keys.iter().any(|k| k == key),
        }
    }
}
