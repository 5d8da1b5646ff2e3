//! # Console
//!
//! Output sink shared between the controller thread and the input worker.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{
    io::{self, Write},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

type Sink = Box<dyn Write + Send>;

/// Cloneable handle to the terminal output.
#[derive(Clone)]
pub struct Console {
    out: Arc<Mutex<Sink>>,
}

impl Console {
    /// Console writing to the process stdout.
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    /// Console writing to an arbitrary writer.
    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Console writing into memory, together with a handle to read it back.
    pub fn capture() -> (Self, Captured) {
        let captured = Captured::default();
        (Self::from_writer(captured.clone()), captured)
    }

    fn lock(&self) -> MutexGuard<'_, Sink> {
        self.out.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Writes one line followed by a newline.
    pub fn print_line(&self, line: &str) -> io::Result<()> {
        let mut out = self.lock();
        writeln!(out, "{line}")?;
        out.flush()
    }

    /// Writes several lines, each followed by a newline.
    pub fn print_lines<S: AsRef<str>>(&self, lines: &[S]) -> io::Result<()> {
        let mut out = self.lock();
        for line in lines {
            writeln!(out, "{}", line.as_ref())?;
        }
        out.flush()
    }

    /// Writes text without a trailing newline and flushes it.
    pub fn write_prompt(&self, text: &str) -> io::Result<()> {
        let mut out = self.lock();
        write!(out, "{text}")?;
        out.flush()
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdout()
    }
}

/// In-memory buffer filled by a captured [`Console`].
#[derive(Debug, Clone, Default)]
pub struct Captured {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Captured {
    /// Returns everything written so far.
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Write for Captured {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
