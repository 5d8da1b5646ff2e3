//! Deterministic input for tests and automation.

use std::{
    collections::VecDeque,
    io,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use super::InputSource;

/// Replays a fixed list of lines. Clones share the same script.
///
/// Once the script is exhausted every read behaves like end of input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: Arc<Mutex<VecDeque<String>>>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: Arc::new(Mutex::new(lines.into_iter().map(Into::into).collect())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a line to the script.
    pub fn push(&self, line: impl Into<String>) {
        self.lock().push_back(line.into());
    }

    /// Number of lines not yet read.
    pub fn remaining(&self) -> usize {
        self.lock().len()
    }

    fn next_line(&self) -> String {
        self.lock().pop_front().unwrap_or_default()
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&self) -> io::Result<String> {
        Ok(self.next_line())
    }

    fn read_hidden(&self) -> io::Result<String> {
        Ok(self.next_line())
    }
}
