//! # Input Acquisition
//!
//! One blocking read of user input, performed on a short-lived background
//! thread that posts the result to the engine's event queue as
//! [`EventTag::Input`](crate::EventTag::Input).
//!
//! Echoed reads are serialized process-wide by [`raw_input_guard`]. The guard is
//! only tried, never waited on: if someone else is already reading, the worker
//! gives up without posting anything. Hidden reads bypass the guard.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

mod scripted;
mod terminal;

use std::{
    io,
    sync::{Arc, Mutex, TryLockError},
    thread::{self, JoinHandle},
};

pub use scripted::ScriptedInput;
pub use terminal::TerminalInput;

use crate::{
    console::Console,
    constants::INPUT_THREAD_NAME,
    event::{Event, EventSender},
    widgets::{TextWidget, Widget},
};

/// Guard serializing echoed raw input across the whole process.
static RAW_INPUT_LOCK: Mutex<()> = Mutex::new(());

/// Returns the process-wide raw input guard.
///
/// Code outside the engine that reads the terminal directly should hold this
/// for the duration of its read so no engine read starts concurrently.
pub fn raw_input_guard() -> &'static Mutex<()> {
    &RAW_INPUT_LOCK
}

/// Where typed input comes from.
pub trait InputSource: Send + Sync {
    /// Reads one echoed line without its line terminator.
    ///
    /// End of input yields an empty string.
    fn read_line(&self) -> io::Result<String>;

    /// Reads one line without echoing it.
    fn read_hidden(&self) -> io::Result<String>;
}

/// Everything the worker needs, detached from the engine.
pub struct ReadRequest {
    pub prompt: String,
    pub hidden: bool,
    pub width: usize,
    pub source: Arc<dyn InputSource>,
    pub console: Console,
    pub sender: EventSender,
}

/// Starts the background worker for one read.
pub fn spawn_reader(request: ReadRequest) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(INPUT_THREAD_NAME.to_string())
        .spawn(move || read_and_post(request))
}

/// Worker body: read once, post the result.
fn read_and_post(request: ReadRequest) {
    let ReadRequest {
        prompt,
        hidden,
        width,
        source,
        console,
        sender,
    } = request;

    let mut widget = TextWidget::new(prompt);
    widget.render(width);
    let text = format!("{} ", widget.lines().join("\n"));
    if let Err(err) = console.write_prompt(&text) {
        tracing::warn!(error = %err, "failed to write prompt");
    }

    let data = if hidden {
        let value = source.read_hidden().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "hidden input read failed");
            String::new()
        });
        // The masked read doesn't echo the line break
        if let Err(err) = console.print_line("") {
            tracing::warn!(error = %err, "failed to end hidden prompt");
        }
        value
    } else {
        let _guard = match RAW_INPUT_LOCK.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => {
                tracing::warn!("raw input already in progress, abandoning this read");
                return;
            }
        };
        source.read_line().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "input read failed, treating as end of input");
            String::new()
        })
    };

    tracing::debug!(hidden, "input acquired");
    sender.put(Event::input(data));
}

/// Serializes unit tests that read input or hold the process-wide guard.
#[cfg(test)]
pub(crate) fn serial() -> std::sync::MutexGuard<'static, ()> {
    static SERIAL: Mutex<()> = Mutex::new(());
    SERIAL.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
