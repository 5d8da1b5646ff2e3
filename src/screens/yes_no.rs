//! Yes/no question.

use std::cell::Cell;

use crate::{
    engine::Engine,
    error::Result,
    prompt::Prompt,
    screen::{Content, KeyOutcome, QuitDialog, Screen, ScreenArgs, ScreenBase},
    widgets::TextWidget,
};

/// Asks a question and closes itself once it is answered.
///
/// Only the answers are accepted; the global commands are not offered here.
#[derive(Debug)]
pub struct YesNoDialog {
    base: ScreenBase,
    question: String,
    answer: Cell<Option<bool>>,
}

impl YesNoDialog {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            base: ScreenBase::default(),
            question: question.into(),
            answer: Cell::new(None),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    /// The answer given, or `None` while unanswered.
    pub fn response(&self) -> Option<bool> {
        self.answer.get()
    }
}

fn parse_answer(key: &str) -> Option<bool> {
    match key.trim().to_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

impl Screen for YesNoDialog {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn title(&self) -> &str {
        "Question"
    }

    fn refresh(&self, _engine: &mut Engine, _args: &ScreenArgs) -> Result<bool> {
        self.base.set_window(vec![
            Content::widget(TextWidget::new(self.question.clone())),
            Content::blank(),
        ]);
        Ok(true)
    }

    fn input(&self, engine: &mut Engine, _args: &ScreenArgs, key: &str) -> Result<KeyOutcome> {
        let Some(answer) = parse_answer(key) else {
            return Ok(KeyOutcome::Unhandled);
        };
        self.answer.set(Some(answer));
        self.close(engine)?;
        Ok(KeyOutcome::Consumed)
    }

    fn prompt(&self, _engine: &mut Engine, _args: &ScreenArgs) -> Result<Option<Prompt>> {
        let mut prompt = Prompt::new("Please respond");
        prompt.add_option("yes", "confirm");
        prompt.add_option("no", "cancel");
        Ok(Some(prompt))
    }
}

impl QuitDialog for YesNoDialog {
    fn answer(&self) -> bool {
        self.answer.get() == Some(true)
    }
}
