//! # Constants
//!
//! Centralized constants for magic values used throughout screenstack.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

// =============================================================================
// Rendering
// =============================================================================

/// Default render width in columns.
pub const DEFAULT_WIDTH: usize = 80;

/// Default screen height used to paginate long widgets.
pub const DEFAULT_SCREEN_HEIGHT: usize = 25;

/// Lines reserved below a page for the prompt.
pub const PROMPT_RESERVED_LINES: usize = 2;

/// Glyph repeated across the width to separate redraws.
pub const SPACER_GLYPH: char = '=';

/// Number of spacer lines printed before a redraw.
pub const SPACER_LINES: usize = 2;

/// Title shown by screens that do not override it.
pub const DEFAULT_SCREEN_TITLE: &str = "Screen..";

// =============================================================================
// Main Loop
// =============================================================================

/// Consecutive unhandled inputs after which the screen is redrawn anyway.
pub const MAX_UNHANDLED_INPUTS: u32 = 5;

/// Name of the background thread performing a blocking input read.
pub const INPUT_THREAD_NAME: &str = "InputThread";

// =============================================================================
// Messages
// =============================================================================

/// Default application title.
pub const DEFAULT_TITLE: &str = "screenstack";

/// Message shown by the quit dialog unless configured otherwise.
pub const DEFAULT_QUIT_MESSAGE: &str = "Do you really want to quit?";

/// Message of a prompt created without an explicit one.
pub const DEFAULT_PROMPT_MESSAGE: &str = "Please make a selection from the above";

/// Name of the Enter key as shown in prompts.
pub const ENTER_KEY_NAME: &str = "ENTER";

// =============================================================================
// Global Command Keys
// =============================================================================

/// Default key forcing a redraw of the current screen.
pub const DEFAULT_REFRESH_KEY: &str = "r";

/// Default key closing the current screen.
pub const DEFAULT_CONTINUE_KEY: &str = "c";

/// Default key quitting the application.
pub const DEFAULT_QUIT_KEY: &str = "q";

// =============================================================================
// File System
// =============================================================================

/// Configuration directory name (inside `~/.config`).
pub const CONFIG_DIR: &str = "screenstack";

/// Configuration file name (inside `CONFIG_DIR`).
pub const CONFIG_FILENAME: &str = "config.toml";

/// Environment variable holding log filter directives.
pub const LOG_ENV_VAR: &str = "SCREENSTACK_LOG";
