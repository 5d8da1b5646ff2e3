//! # screenstack
//!
//! A control engine for line-oriented terminal interfaces.
//!
//! Applications are built from screens kept on a stack. The engine draws the
//! screen on top, reads a line of input on a background thread and routes it to
//! that screen, falling back to three global commands (refresh, continue, quit).
//!
//! ## Features
//!
//! - **Screen Stack**: replace, push-with-return, modal and close transitions
//! - **Nested Loops**: modal screens run their own loop and return when closed
//! - **Event Queue**: thread-safe messages dispatched to registered handlers
//! - **Guarded Input**: one echoed read per process at a time
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

pub mod config;
pub mod console;
pub mod constants;
pub mod engine;
pub mod error;
pub mod event;
pub mod input;
pub mod keymap;
pub mod prompt;
pub mod screen;
pub mod screens;
pub mod widgets;

pub use config::Config;
pub use console::{Captured, Console};
pub use engine::{CurrentScreen, Engine, EngineBuilder, LoopMarker};
pub use error::{Error, Result};
pub use event::{Event, EventQueue, EventSender, EventTag, ExceptionReport, Payload};
pub use input::{raw_input_guard, InputSource, ScriptedInput, TerminalInput};
pub use keymap::{GlobalCommand, KeyMap};
pub use prompt::Prompt;
pub use screen::{Content, KeyOutcome, QuitDialog, Screen, ScreenArgs, ScreenBase};
pub use screens::{PasswordDialog, YesNoDialog};
pub use widgets::{TextWidget, Widget};
