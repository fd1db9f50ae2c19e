//! Relay description published alongside its countdown state

use serde::{Deserialize, Serialize};

use super::RelayState;

/// One relay and the current state of its countdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayInfo {
    pub id: String,
    pub pin: u8,
    pub name: String,
    pub state: RelayState,
}

impl RelayInfo {
    /// Create an inactive relay
    pub fn new(id: impl Into<String>, pin: u8, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pin,
            name: name.into(),
            state: RelayState::inactive(),
        }
    }

    /// Same relay with a fresh state
    pub fn with_state(&self, state: RelayState) -> Self {
        Self {
            state,
            ..self.clone()
        }
    }
}
