//! The one screen currently in front of the user.
//!
//! Several engines may run in one process, but only one screen is ever shown.
//! Engines built with clones of the same [`CurrentScreen`] share that slot, so
//! `entry`/`exit` fire once per real change no matter which engine drew it.

use std::{cell::RefCell, rc::Rc};

use crate::screen::{same_screen, Screen};

/// Shared slot holding the screen in front.
#[derive(Clone, Default)]
pub struct CurrentScreen {
    slot: Rc<RefCell<Option<Rc<dyn Screen>>>>,
}

impl CurrentScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Rc<dyn Screen>> {
        self.slot.borrow().clone()
    }

    /// Makes `screen` the current one, running `exit` on the previous screen and
    /// `entry` on the new one if they differ.
    pub fn set(&self, screen: Option<Rc<dyn Screen>>) {
        let previous = self.get();
        let changed = match (&previous, &screen) {
            (Some(old), Some(new)) => !same_screen(&**old, &**new),
            (None, None) => false,
            _ => true,
        };

        if changed {
            if let Some(old) = &previous {
                old.exit();
            }
            if let Some(new) = &screen {
                new.entry();
            }
        }

        *self.slot.borrow_mut() = screen;
    }

    /// Whether two handles share the same slot.
    pub fn shares_slot_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}
