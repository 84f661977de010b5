//! Session configuration.

use serde::{Deserialize, Serialize};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session name, used in logs (e.g. the chat channel)
    pub name: String,

    /// Reject join/leave while a game is running (default: true)
    pub lock_roster_after_start: bool,

    /// Capacity of the actor's message inbox
    pub inbox_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            name: "lobby".to_string(),
            lock_roster_after_start: true,
            inbox_capacity: 100,
        }
    }
}

impl SessionConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Session name must not be empty".to_string());
        }

        if self.inbox_capacity == 0 {
            return Err("Inbox capacity must be at least 1".to_string());
        }

        Ok(())
    }
}
