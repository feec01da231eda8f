use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use rust_decimal::Decimal;

use super::theme;
use super::util::centered_rect;
use crate::models::parse_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DialogKind {
    Text,
    Amount,
    YesNo,
    Info,
}

/// How a dialog was closed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Reply {
    Text(Option<String>),
    Amount(Option<Decimal>),
    YesNo(bool),
    Closed,
}

/// A modal box drawn over the main screen.
#[derive(Debug, Clone)]
pub(crate) struct Dialog {
    pub(crate) kind: DialogKind,
    pub(crate) title: String,
    pub(crate) message: String,
    pub(crate) input: String,
    pub(crate) error: Option<String>,
    pub(crate) yes_selected: bool,
}

impl Dialog {
    fn new(kind: DialogKind, title: &str, message: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.to_string(),
            input: String::new(),
            error: None,
            yes_selected: true,
        }
    }

    pub(crate) fn text(title: &str, prompt: &str) -> Self {
        Self::new(DialogKind::Text, title, prompt)
    }

    pub(crate) fn amount(title: &str, prompt: &str) -> Self {
        Self::new(DialogKind::Amount, title, prompt)
    }

    pub(crate) fn yes_no(title: &str, message: &str) -> Self {
        Self::new(DialogKind::YesNo, title, message)
    }

    pub(crate) fn info(title: &str, message: &str) -> Self {
        Self::new(DialogKind::Info, title, message)
    }

    /// Feed one key press. Returns `Some` once the dialog is closed.
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Option<Reply> {
        match self.kind {
            DialogKind::Text | DialogKind::Amount => self.handle_input_key(key),
            DialogKind::YesNo => self.handle_yes_no_key(key),
            DialogKind::Info => match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q') => {
                    Some(Reply::Closed)
                }
                _ => None,
            },
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Option<Reply> {
        match key.code {
            KeyCode::Esc => Some(self.cancelled()),
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
                self.error = None;
                None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
                self.error = None;
                None
            }
            _ => None,
        }
    }

    fn handle_yes_no_key(&mut self, key: KeyEvent) -> Option<Reply> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Reply::YesNo(true)),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Reply::YesNo(false)),
            KeyCode::Left
            | KeyCode::Right
            | KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Char('h')
            | KeyCode::Char('l') => {
                self.yes_selected = !self.yes_selected;
                None
            }
            KeyCode::Enter => Some(Reply::YesNo(self.yes_selected)),
            _ => None,
        }
    }

    fn cancelled(&self) -> Reply {
        match self.kind {
            DialogKind::Amount => Reply::Amount(None),
            _ => Reply::Text(None),
        }
    }

    fn submit(&mut self) -> Option<Reply> {
        if self.kind == DialogKind::Text {
            return Some(Reply::Text(Some(self.input.clone())));
        }
        if self.input.trim().is_empty() {
            self.error = Some("Please enter a number".into());
            return None;
        }
        match parse_amount(&self.input) {
            Ok(amount) => Some(Reply::Amount(Some(amount))),
            Err(e) => {
                log::warn!("Rejected amount '{}': {e:#}", self.input);
                self.error = Some(e.to_string());
                None
            }
        }
    }
}

pub(crate) fn render(f: &mut Frame, area: Rect, dialog: &Dialog) {
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));
    for text in dialog.message.lines() {
        lines.push(Line::from(Span::styled(format!(" {text}"), theme::normal_style())));
    }
    lines.push(Line::from(""));

    match dialog.kind {
        DialogKind::Text | DialogKind::Amount => {
            lines.push(Line::from(vec![
                Span::styled(" > ", Style::default().fg(theme::ACCENT)),
                Span::styled(dialog.input.clone(), theme::command_bar_style()),
                Span::styled("█", Style::default().fg(theme::ACCENT)),
            ]));
            if let Some(err) = &dialog.error {
                lines.push(Line::from(Span::styled(format!(" {err}"), theme::expense_style())));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                " Enter OK | Esc Cancel",
                theme::dim_style(),
            )));
        }
        DialogKind::YesNo => {
            let (yes, no) = if dialog.yes_selected {
                (theme::selected_style(), theme::dim_style())
            } else {
                (theme::dim_style(), theme::selected_style())
            };
            lines.push(Line::from(vec![
                Span::raw("   "),
                Span::styled(" Yes ", yes),
                Span::raw("   "),
                Span::styled(" No ", no),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                " y/n or ←/→ + Enter",
                theme::dim_style(),
            )));
        }
        DialogKind::Info => {
            lines.push(Line::from(Span::styled(" Press Enter to close", theme::dim_style())));
        }
    }

    let widest = dialog
        .message
        .lines()
        .map(|l| l.chars().count().saturating_add(4))
        .max()
        .unwrap_or(0)
        .max(dialog.title.chars().count().saturating_add(6));
    let width = widest.clamp(36, 72) as u16;
    let height = u16::try_from(lines.len().saturating_add(2)).unwrap_or(u16::MAX);
    let popup = centered_rect(area, width, height);

    let border = match dialog.kind {
        DialogKind::YesNo => theme::YELLOW,
        DialogKind::Info => theme::GREEN,
        _ => theme::ACCENT,
    };

    f.render_widget(Clear, popup);
    let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme::HEADER_BG))
            .title(Span::styled(
                format!(" {} ", dialog.title),
                Style::default().fg(border).add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(body, popup);
}
