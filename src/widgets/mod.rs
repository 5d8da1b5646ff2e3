//! Renderable content for screens.
//!
//! Screens hand their content to the engine as widgets; the engine only needs
//! a width-aware layout pass and the resulting lines.

mod text;

pub use text::TextWidget;

/// Content laid out into display lines for a given width.
pub trait Widget {
    /// Lays out the content for `width` columns.
    fn render(&mut self, width: usize);

    /// Lines produced by the last `render` call.
    fn lines(&self) -> Vec<String>;
}
