//! Navigation history of screens.

use std::rc::Rc;

use crate::screen::{Screen, ScreenArgs};

/// Whether an entry is the origin of a nested main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMarker {
    /// No nested loop belongs to this entry.
    None,
    /// A nested loop must be started when the entry is drawn.
    Start,
    /// A nested loop is running for this entry; closing it ends that loop.
    Running,
}

/// One screen on the stack with its arguments.
#[derive(Clone)]
pub struct StackEntry {
    pub screen: Rc<dyn Screen>,
    pub args: ScreenArgs,
    pub marker: LoopMarker,
}

impl StackEntry {
    pub fn new(screen: Rc<dyn Screen>, args: ScreenArgs, marker: LoopMarker) -> Self {
        Self {
            screen,
            args,
            marker,
        }
    }
}

/// Ordered entries; the last one is on top and displayed.
#[derive(Default)]
pub struct ScreenStack {
    entries: Vec<StackEntry>,
}

impl ScreenStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self) -> Option<&StackEntry> {
        self.entries.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut StackEntry> {
        self.entries.last_mut()
    }

    pub fn push(&mut self, entry: StackEntry) {
        self.entries.push(entry);
    }

    /// Inserts below every other entry.
    pub fn prepend(&mut self, entry: StackEntry) {
        self.entries.insert(0, entry);
    }

    pub fn pop(&mut self) -> Option<StackEntry> {
        self.entries.pop()
    }

    /// Swaps the top screen, keeping its loop marker.
    ///
    /// Returns the replaced entry, or `None` (and leaves the stack alone) if empty.
    pub fn replace_top(&mut self, screen: Rc<dyn Screen>, args: ScreenArgs) -> Option<StackEntry> {
        let old = self.entries.pop()?;
        self.entries
            .push(StackEntry::new(screen, args, old.marker));
        Some(old)
    }
}
