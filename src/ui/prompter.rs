use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use rust_decimal::Decimal;
use std::io;

use super::app::App;
use super::dialog::{self, Dialog, Reply};
use super::render;
use crate::ledger::Prompter;

/// Shows each dialog over the current screen and blocks on key presses until
/// it is answered.
pub(crate) struct TuiPrompter<'a> {
    terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &'a App,
}

impl<'a> TuiPrompter<'a> {
    pub(crate) fn new(terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>, app: &'a App) -> Self {
        Self { terminal, app }
    }

    fn run(&mut self, mut dialog: Dialog) -> Result<Reply> {
        loop {
            let app = self.app;
            self.terminal.draw(|f| {
                render::render(f, app);
                dialog::render(f, f.area(), &dialog);
            })?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(reply) = dialog.handle_key(key) {
                    return Ok(reply);
                }
            }
        }
    }
}

impl Prompter for TuiPrompter<'_> {
    fn ask_string(&mut self, title: &str, prompt: &str) -> Result<Option<String>> {
        Ok(match self.run(Dialog::text(title, prompt))? {
            Reply::Text(text) => text,
            _ => None,
        })
    }

    fn ask_amount(&mut self, title: &str, prompt: &str) -> Result<Option<Decimal>> {
        Ok(match self.run(Dialog::amount(title, prompt))? {
            Reply::Amount(amount) => amount,
            _ => None,
        })
    }

    fn ask_yes_no(&mut self, title: &str, message: &str) -> Result<bool> {
        Ok(matches!(
            self.run(Dialog::yes_no(title, message))?,
            Reply::YesNo(true)
        ))
    }

    fn show_info(&mut self, title: &str, message: &str) -> Result<()> {
        self.run(Dialog::info(title, message))?;
        Ok(())
    }
}
