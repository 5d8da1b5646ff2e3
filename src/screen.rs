//! # Screens
//!
//! The capability every view on the screen stack implements.
//!
//! Screens are shared as `Rc<dyn Screen>` and take `&self`; whatever state they
//! keep lives behind interior mutability. The engine is handed to each callback
//! instead of being stored, so a screen can push, replace or close screens (and
//! run a modal one) while the engine is calling into it.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{any::Any, cell::RefCell, fmt, rc::Rc};

use crate::{
    constants::{DEFAULT_SCREEN_TITLE, PROMPT_RESERVED_LINES},
    engine::Engine,
    error::Result,
    prompt::Prompt,
    widgets::{TextWidget, Widget},
};

/// Arguments stored with a stack entry and handed back to the screen.
pub type ScreenArgs = Option<Rc<dyn Any>>;

/// What a screen did with a typed key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Fully handled.
    Consumed,
    /// Rejected; global commands are not tried.
    Unhandled,
    /// Not handled here; offer this key to the global commands.
    Forward(String),
}

/// One item of screen content.
pub enum Content {
    /// Printed as-is.
    Text(String),
    /// Laid out to the engine width, paginated if long.
    Widget(Box<dyn Widget>),
}

impl Content {
    pub fn widget(widget: impl Widget + 'static) -> Self {
        Self::Widget(Box::new(widget))
    }

    /// Empty line.
    pub fn blank() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Widget(widget) => f.debug_tuple("Widget").field(&widget.lines()).finish(),
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<TextWidget> for Content {
    fn from(widget: TextWidget) -> Self {
        Self::widget(widget)
    }
}

/// Content buffer and page height shared by all screens.
///
/// A base without its own height paginates with the engine's.
#[derive(Debug, Default)]
pub struct ScreenBase {
    window: RefCell<Vec<Content>>,
    screen_height: Option<usize>,
}

impl ScreenBase {
    pub fn new(screen_height: usize) -> Self {
        Self {
            window: RefCell::new(Vec::new()),
            screen_height: Some(screen_height),
        }
    }

    /// Height set on this screen, if any.
    pub const fn screen_height(&self) -> Option<usize> {
        self.screen_height
    }

    /// Replaces the content to print.
    pub fn set_window(&self, content: Vec<Content>) {
        *self.window.borrow_mut() = content;
    }

    /// Appends one item to the content.
    pub fn push(&self, content: impl Into<Content>) {
        self.window.borrow_mut().push(content.into());
    }

    pub fn len(&self) -> usize {
        self.window.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.borrow().is_empty()
    }

    /// Renders every content item and prints it.
    pub fn show_all(&self, engine: &mut Engine) -> Result<()> {
        // Released while printing; long widgets wait for input between pages
        let mut window = self.window.take();
        let result = self.print_window(&mut window, engine);
        let mut slot = self.window.borrow_mut();
        if slot.is_empty() {
            *slot = window;
        }
        result
    }

    fn print_window(&self, window: &mut [Content], engine: &mut Engine) -> Result<()> {
        let width = engine.width();
        for item in window {
            match item {
                Content::Text(text) => engine.console().print_line(text)?,
                Content::Widget(widget) => {
                    widget.render(width);
                    self.print_long_widget(&widget.lines(), engine)?;
                }
            }
        }
        Ok(())
    }

    /// Prints lines page by page, waiting for Enter between pages.
    fn print_long_widget(&self, lines: &[String], engine: &mut Engine) -> Result<()> {
        let page = self
            .screen_height
            .unwrap_or_else(|| engine.screen_height())
            .saturating_sub(PROMPT_RESERVED_LINES)
            .max(1);

        if lines.len() < page {
            engine.console().print_lines(lines)?;
            return Ok(());
        }

        let mut chunks = lines.chunks(page).peekable();
        while let Some(chunk) = chunks.next() {
            engine.console().print_lines(chunk)?;
            if chunks.peek().is_some() {
                let prompt = Prompt::new(format!("\nPress {} to continue", Prompt::ENTER));
                engine.raw_input(&prompt, false)?;
            }
        }
        Ok(())
    }
}

/// A view on the screen stack.
pub trait Screen {
    /// Shared content state.
    fn base(&self) -> &ScreenBase;

    fn title(&self) -> &str {
        DEFAULT_SCREEN_TITLE
    }

    /// Called by the application before scheduling; false cancels it.
    fn setup(&self, _args: &ScreenArgs) -> bool {
        true
    }

    /// Fills the content buffer. Returns whether input should be read afterwards.
    fn refresh(&self, _engine: &mut Engine, _args: &ScreenArgs) -> Result<bool> {
        self.base()
            .set_window(vec![self.title().into(), Content::blank()]);
        Ok(true)
    }

    /// Prints the content buffer.
    fn show(&self, engine: &mut Engine) -> Result<()> {
        self.base().show_all(engine)
    }

    fn hide(&self) {}

    /// Handles a typed key before the global commands see it.
    fn input(&self, _engine: &mut Engine, _args: &ScreenArgs, key: &str) -> Result<KeyOutcome> {
        Ok(KeyOutcome::Forward(key.to_string()))
    }

    /// Prompt to show, or `None` if the screen read its input itself.
    fn prompt(&self, engine: &mut Engine, _args: &ScreenArgs) -> Result<Option<Prompt>> {
        Ok(Some(Prompt::default().with_global_options(engine.keymap())))
    }

    /// Called when this screen becomes the one shown.
    fn entry(&self) {}

    /// Called when another screen replaces this one as the one shown.
    fn exit(&self) {}

    /// Closes this screen, checking it is the one on top.
    fn close(&self, engine: &mut Engine) -> Result<()>
    where
        Self: Sized,
    {
        engine.close_screen(Some(self as &dyn Screen))
    }
}

/// Screen usable as the quit confirmation.
pub trait QuitDialog: Screen {
    /// Whether the user confirmed, read after the dialog closed.
    fn answer(&self) -> bool;
}

/// Identity comparison of two screens.
pub fn same_screen(a: &dyn Screen, b: &dyn Screen) -> bool {
    std::ptr::addr_eq(a as *const dyn Screen, b as *const dyn Screen)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain {
        base: ScreenBase,
    }

    impl Screen for Plain {
        fn base(&self) -> &ScreenBase {
            &self.base
        }
    }

    #[test]
    fn test_same_screen_is_identity() {
        let a = Rc::new(Plain {
            base: ScreenBase::default(),
        });
        let b = Rc::new(Plain {
            base: ScreenBase::default(),
        });
        let a_dyn: Rc<dyn Screen> = a.clone();

        assert!(same_screen(&*a, &*a_dyn));
        assert!(!same_screen(&*a, &*b));
    }

    #[test]
    fn test_window_helpers() {
        let base = ScreenBase::new(10);
        assert!(base.is_empty());
        base.push("title");
        base.push(TextWidget::new("body"));
        assert_eq!(base.len(), 2);
        base.set_window(vec![Content::blank()]);
        assert_eq!(base.len(), 1);
        assert_eq!(base.screen_height(), Some(10));
        assert_eq!(ScreenBase::default().screen_height(), None);
    }

    #[test]
    fn test_content_conversions() {
        assert!(matches!(Content::from("x"), Content::Text(t) if t == "x"));
        assert!(matches!(Content::from(String::from("y")), Content::Text(t) if t == "y"));
        assert!(matches!(Content::from(TextWidget::new("z")), Content::Widget(_)));
    }
}
