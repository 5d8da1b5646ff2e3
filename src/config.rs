//! # Configuration
//!
//! Application settings stored at `~/.config/screenstack/config.toml`.
//!
//! Every field has a default, so a missing file or a partial one is fine.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        CONFIG_DIR, CONFIG_FILENAME, DEFAULT_QUIT_MESSAGE, DEFAULT_SCREEN_HEIGHT, DEFAULT_TITLE,
        DEFAULT_WIDTH,
    },
    engine::{Engine, EngineBuilder},
    keymap::KeyMap,
    screen::QuitDialog,
    screens::YesNoDialog,
};

/// Settings for an application built on the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Application header
    #[serde(default = "default_title")]
    pub title: String,

    /// Columns available for rendering
    #[serde(default = "default_width")]
    pub width: usize,

    /// Lines per page when printing long content, for screens without their own height
    #[serde(default = "default_screen_height")]
    pub screen_height: usize,

    /// Question asked before quitting
    #[serde(default = "default_quit_message")]
    pub quit_message: String,

    /// Whether quitting asks for confirmation
    #[serde(default)]
    pub confirm_quit: bool,

    /// Letters bound to the global commands
    #[serde(default)]
    pub keys: KeyMap,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            screen_height: default_screen_height(),
            quit_message: default_quit_message(),
            confirm_quit: false,
            keys: KeyMap::default(),
        }
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

#[allow(clippy::missing_const_for_fn)] // serde default functions can't be const
fn default_width() -> usize {
    DEFAULT_WIDTH
}

#[allow(clippy::missing_const_for_fn)]
fn default_screen_height() -> usize {
    DEFAULT_SCREEN_HEIGHT
}

fn default_quit_message() -> String {
    DEFAULT_QUIT_MESSAGE.to_string()
}

impl Config {
    /// Returns the default config path (~/.config/screenstack/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        // $HOME/.config on every platform, not dirs::config_dir
        dirs::home_dir().map(|home| home.join(".config").join(CONFIG_DIR).join(CONFIG_FILENAME))
    }

    /// Loads the config at `path`, falling back to defaults if it doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Saves the config to `path`, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }

    /// Engine builder seeded from these settings
    pub fn engine_builder(&self) -> EngineBuilder {
        let builder = Engine::builder(self.title.clone())
            .width(self.width)
            .screen_height(self.screen_height)
            .keymap(self.keys.clone())
            .quit_message(self.quit_message.clone());

        if self.confirm_quit {
            builder.quit_screen(|_engine, message| -> Rc<dyn QuitDialog> {
                Rc::new(YesNoDialog::new(message))
            })
        } else {
            builder
        }
    }
}
