//! Word-wrapping text widget.
//!
//! Widths are measured in terminal columns, so wide characters count double.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::Widget;

/// Plain text wrapped at word boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextWidget {
    text: String,
    lines: Vec<String>,
}

impl TextWidget {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lines: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Widget for TextWidget {
    fn render(&mut self, width: usize) {
        self.lines = self
            .text
            .split('\n')
            .flat_map(|paragraph| wrap(paragraph, width))
            .collect();
    }

    fn lines(&self) -> Vec<String> {
        self.lines.clone()
    }
}

/// Wraps one paragraph. A width of zero disables wrapping.
///
/// Trailing whitespace is dropped.
fn wrap(paragraph: &str, width: usize) -> Vec<String> {
    let paragraph = paragraph.trim_end();
    if width == 0 || paragraph.width() <= width {
        return vec![paragraph.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        let sep = usize::from(!current.is_empty());
        if current.width() + sep + word.width() <= width {
            if sep == 1 {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if word.width() <= width {
            current.push_str(word);
        } else {
            // Hard-split words that cannot fit on a line of their own
            for c in word.chars() {
                let w = c.width().unwrap_or(0);
                if current.width() + w > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current.push(c);
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
