//! Hidden input entry.

use std::cell::RefCell;

use crate::{
    engine::Engine,
    error::Result,
    prompt::Prompt,
    screen::{Screen, ScreenArgs, ScreenBase},
};

/// Reads one value without echoing it, then closes itself.
#[derive(Debug)]
pub struct PasswordDialog {
    base: ScreenBase,
    title: String,
    message: String,
    value: RefCell<Option<String>>,
}

impl PasswordDialog {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            base: ScreenBase::default(),
            title: title.into(),
            message: message.into(),
            value: RefCell::new(None),
        }
    }

    /// The value entered, once the dialog has read it.
    pub fn password(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl Screen for PasswordDialog {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn prompt(&self, engine: &mut Engine, _args: &ScreenArgs) -> Result<Option<Prompt>> {
        let value = engine.raw_input(&Prompt::new(self.message.clone()), true)?;
        *self.value.borrow_mut() = Some(value);
        self.close(engine)?;
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::{console::Console, input::ScriptedInput};

    #[test]
    fn test_reads_hidden_value_and_closes() {
        let _serial = crate::input::serial();
        let (console, captured) = Console::capture();
        let mut engine = Engine::builder("test")
            .console(console)
            .input(ScriptedInput::new(["hunter2"]))
            .build();
        let dialog = Rc::new(PasswordDialog::new("Login", "Password"));

        engine.switch_screen_modal(dialog.clone(), None).unwrap();

        assert_eq!(dialog.password().as_deref(), Some("hunter2"));
        assert!(engine.screens().is_empty());
        let out = captured.contents();
        assert!(out.contains("Login"));
        assert!(out.contains("Password: \n"), "hidden prompt goes through the console");
        assert!(!out.contains("hunter2"));
    }

    #[test]
    fn test_hidden_read_ignores_raw_input_guard() {
        let _serial = crate::input::serial();
        let (console, _captured) = Console::capture();
        let mut engine = Engine::builder("test")
            .console(console)
            .input(ScriptedInput::new(["secret"]))
            .build();
        let dialog = Rc::new(PasswordDialog::new("Login", "Password"));

        let held = crate::input::raw_input_guard()
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        engine.switch_screen_modal(dialog.clone(), None).unwrap();
        drop(held);

        assert_eq!(dialog.password().as_deref(), Some("secret"));
    }
}
