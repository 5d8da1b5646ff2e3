//! # Prompt
//!
//! Text shown next to the input cursor, with the options a screen accepts.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::fmt;

use crate::{
    constants::{DEFAULT_PROMPT_MESSAGE, ENTER_KEY_NAME},
    keymap::{GlobalCommand, KeyMap},
};

/// Prompt message plus ordered `(key, description)` options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    message: String,
    options: Vec<(String, String)>,
}

impl Prompt {
    /// Display name of the Enter key.
    pub const ENTER: &'static str = ENTER_KEY_NAME;

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            options: Vec::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn options(&self) -> &[(String, String)] {
        &self.options
    }

    /// Adds an option, replacing the description if `key` is already listed.
    pub fn add_option(&mut self, key: impl Into<String>, description: impl Into<String>) {
        let key = key.into();
        let description = description.into();
        match self.options.iter_mut().find(|(k, _)| *k == key) {
            Some(option) => option.1 = description,
            None => self.options.push((key, description)),
        }
    }

    pub fn remove_option(&mut self, key: &str) {
        self.options.retain(|(k, _)| k != key);
    }

    pub fn add_refresh_option(&mut self, keys: &KeyMap) {
        self.add_option(keys.key_for(GlobalCommand::Refresh), "refresh");
    }

    pub fn add_continue_option(&mut self, keys: &KeyMap) {
        self.add_option(keys.key_for(GlobalCommand::Continue), "continue");
    }

    pub fn add_quit_option(&mut self, keys: &KeyMap) {
        self.add_option(keys.key_for(GlobalCommand::Quit), "quit");
    }

    /// Builder form adding refresh, continue and quit.
    #[must_use]
    pub fn with_global_options(mut self, keys: &KeyMap) -> Self {
        self.add_refresh_option(keys);
        self.add_continue_option(keys);
        self.add_quit_option(keys);
        self
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT_MESSAGE)
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if !self.options.is_empty() {
            let options: Vec<String> = self
                .options
                .iter()
                .map(|(key, description)| format!("'{key}' to {description}"))
                .collect();
            write!(f, " [{}]", options.join(", "))?;
        }
        f.write_str(": ")
    }
}
