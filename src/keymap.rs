//! # Key Map
//!
//! Resolves typed input to the three global commands.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CONTINUE_KEY, DEFAULT_QUIT_KEY, DEFAULT_REFRESH_KEY};

/// Commands understood by every screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalCommand {
    /// Redraw the current screen.
    Refresh,
    /// Close the current screen.
    Continue,
    /// Quit the application.
    Quit,
}

/// Letters bound to the global commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMap {
    #[serde(default = "default_refresh")]
    pub refresh: String,

    #[serde(rename = "continue", default = "default_continue")]
    pub proceed: String,

    #[serde(default = "default_quit")]
    pub quit: String,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            refresh: default_refresh(),
            proceed: default_continue(),
            quit: default_quit(),
        }
    }
}

fn default_refresh() -> String {
    DEFAULT_REFRESH_KEY.to_string()
}

fn default_continue() -> String {
    DEFAULT_CONTINUE_KEY.to_string()
}

fn default_quit() -> String {
    DEFAULT_QUIT_KEY.to_string()
}

impl KeyMap {
    /// Returns the command bound to `key`, checked in refresh, continue, quit order.
    pub fn resolve(&self, key: &str) -> Option<GlobalCommand> {
        [
            GlobalCommand::Refresh,
            GlobalCommand::Continue,
            GlobalCommand::Quit,
        ]
        .into_iter()
        .find(|command| self.key_for(*command) == key)
    }

    /// Returns the key bound to `command`.
    pub fn key_for(&self, command: GlobalCommand) -> &str {
        match command {
            GlobalCommand::Refresh => &self.refresh,
            GlobalCommand::Continue => &self.proceed,
            GlobalCommand::Quit => &self.quit,
        }
    }
}
