use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::VecDeque;

/// The modal dialogs a feature may open. Every method blocks until the user
/// answers; `None` and `false` mean the dialog was dismissed.
pub(crate) trait Prompter {
    fn ask_string(&mut self, title: &str, prompt: &str) -> Result<Option<String>>;
    fn ask_amount(&mut self, title: &str, prompt: &str) -> Result<Option<Decimal>>;
    fn ask_yes_no(&mut self, title: &str, message: &str) -> Result<bool>;
    fn show_info(&mut self, title: &str, message: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Answer {
    Text(Option<String>),
    Amount(Option<Decimal>),
    YesNo(bool),
}

/// Answers dialogs from a fixed queue. A dialog with no matching answer left
/// counts as dismissed. Used by the CLI and by tests.
#[derive(Debug, Default)]
pub(crate) struct PresetPrompter {
    answers: VecDeque<Answer>,
    echo: bool,
    pub(crate) asked: Vec<(String, String)>,
    pub(crate) shown: Vec<(String, String)>,
}

impl PresetPrompter {
    pub(crate) fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Print info messages to stdout as they are shown.
    pub(crate) fn echo(mut self) -> Self {
        self.echo = true;
        self
    }

    fn next_answer(&mut self, title: &str, text: &str) -> Option<Answer> {
        self.asked.push((title.to_string(), text.to_string()));
        self.answers.pop_front()
    }
}

impl Prompter for PresetPrompter {
    fn ask_string(&mut self, title: &str, prompt: &str) -> Result<Option<String>> {
        Ok(match self.next_answer(title, prompt) {
            Some(Answer::Text(text)) => text,
            _ => None,
        })
    }

    fn ask_amount(&mut self, title: &str, prompt: &str) -> Result<Option<Decimal>> {
        Ok(match self.next_answer(title, prompt) {
            Some(Answer::Amount(amount)) => amount,
            _ => None,
        })
    }

    fn ask_yes_no(&mut self, title: &str, message: &str) -> Result<bool> {
        Ok(matches!(self.next_answer(title, message), Some(Answer::YesNo(true))))
    }

    fn show_info(&mut self, title: &str, message: &str) -> Result<()> {
        if self.echo {
            println!("{message}");
        }
        self.shown.push((title.to_string(), message.to_string()));
        Ok(())
    }
}
