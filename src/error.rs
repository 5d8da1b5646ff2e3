//! # Errors
//!
//! Error and control-signal type shared by the engine and screens.
//!
//! Two variants are not failures at all: [`Error::ExitLoop`] unwinds exactly one
//! nested main loop and [`Error::ExitAllLoops`] unwinds every loop up to
//! [`Engine::run`](crate::Engine::run). Application failures travel as
//! [`Error::Screen`] and are reported on the event queue instead of stopping the
//! engine. Everything else is a contract violation and propagates.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::io;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Ends the innermost running main loop.
    #[error("main loop finished")]
    ExitLoop,

    /// Ends every running main loop; `Engine::run` returns `false`.
    #[error("all main loops finished")]
    ExitAllLoops,

    /// A second input thread was requested while one is still alive.
    #[error("can't run multiple input threads at the same time")]
    InputInFlight,

    /// `close_screen` popped a different screen than the caller expected.
    #[error("closed screen is not the expected one")]
    ScreenMismatch,

    /// `close_screen` popped an entry whose nested loop was never entered.
    #[error("closed a screen whose main loop was scheduled but never started")]
    LoopNotStarted,

    /// A transition needed a top-of-stack screen but the stack was empty.
    #[error("screen stack is empty")]
    EmptyStack,

    /// The event queue lost its sending side while a message was awaited.
    #[error("event queue disconnected")]
    QueueDisconnected,

    #[error("failed to spawn input thread")]
    Spawn(#[source] io::Error),

    #[error("terminal I/O failed")]
    Io(#[from] io::Error),

    /// Failure raised by a screen callback or event handler.
    #[error(transparent)]
    Screen(#[from] anyhow::Error),
}
