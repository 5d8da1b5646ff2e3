//! Input read from the controlling terminal.

use std::io::{self, BufRead, IsTerminal};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal,
};

use super::InputSource;

/// Reads lines from stdin; hidden reads switch the terminal to raw mode so
/// typed characters are not echoed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn read_line(&self) -> io::Result<String> {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(strip_line_ending(line))
    }

    fn read_hidden(&self) -> io::Result<String> {
        // Nothing to mask when stdin is piped
        if !io::stdin().is_terminal() {
            return self.read_line();
        }

        let _raw = RawModeGuard::enable()?;
        read_masked()
    }
}

/// Collects key presses until Enter without echoing them.
fn read_masked() -> io::Result<String> {
    let mut value = String::new();
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => return Ok(value),
            KeyCode::Char('c') if ctrl => {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "input cancelled"));
            }
            KeyCode::Char('d') if ctrl && value.is_empty() => return Ok(value),
            KeyCode::Char('u') if ctrl => value.clear(),
            KeyCode::Backspace => {
                value.pop();
            }
            KeyCode::Char(c) if !ctrl => value.push(c),
            _ => {}
        }
    }
}

/// Restores cooked mode when dropped.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
