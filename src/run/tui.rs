use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::export;
use crate::ledger;
use crate::models::{EntryDate, EntryKind, YearMonth};
use crate::store::Store;
use crate::ui::app::{Action, App, Focus, InputMode};
use crate::ui::commands;
use crate::ui::prompter::TuiPrompter;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub(crate) fn as_tui(store: &Store) -> Result<()> {
    let mut app = App::new();
    app.show_calendar(store)?;
    if store.load()?.is_empty() {
        app.set_status("No data yet. Press b to set a budget, or i/e to add an entry");
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Session ended with an error: {e:#}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Term, app: &mut App, store: &Store) -> Result<()> {
    while app.running {
        terminal.draw(|f| crate::ui::render::render(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            let action = match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app),
                InputMode::Command => handle_command_input(key, app)?,
                InputMode::Editing => {
                    handle_editing_input(key, app);
                    None
                }
            };
            if let Some(action) = action {
                perform(action, terminal, app, store)?;
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
            app.running = false;
        }
        return None;
    }

    let on_calendar = app.focus == Focus::Calendar;
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('q') => app.running = false,
        KeyCode::Esc => app.status_message.clear(),
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::BackTab => app.focus = app.focus.prev(),
        KeyCode::Enter => return activate(app),

        KeyCode::Char('c') => return Some(Action::ShowCalendar),
        KeyCode::Char('b') => return Some(Action::SetBudget),
        KeyCode::Char('s') => return Some(Action::Summary),
        KeyCode::Char('y') => start_editing(app, Focus::Year),
        KeyCode::Char('m') => start_editing(app, Focus::Month),
        KeyCode::Char('H') => return step_month(app, YearMonth::prev),
        KeyCode::Char('L') => return step_month(app, YearMonth::next),
        KeyCode::Char('t') => {
            app.set_fields(EntryDate::today().month());
            return Some(Action::ShowCalendar);
        }

        KeyCode::Char('i') => return add_on_cursor(app, EntryKind::Income),
        KeyCode::Char('e') => return add_on_cursor(app, EntryKind::Expense),
        KeyCode::Char('v') => return app.cursor_button().map(Action::ViewDay),

        KeyCode::Left | KeyCode::Char('h') if on_calendar => app.move_cursor(-1),
        KeyCode::Right | KeyCode::Char('l') if on_calendar => app.move_cursor(1),
        KeyCode::Up | KeyCode::Char('k') if on_calendar => app.move_cursor(-7),
        KeyCode::Down | KeyCode::Char('j') if on_calendar => app.move_cursor(7),
        KeyCode::Up | KeyCode::Left => app.focus = app.focus.prev(),
        KeyCode::Down | KeyCode::Right => app.focus = app.focus.next(),
        _ => {}
    }
    None
}

/// Enter on whatever has focus.
fn activate(app: &mut App) -> Option<Action> {
    match app.focus {
        field @ (Focus::Year | Focus::Month) => {
            start_editing(app, field);
            None
        }
        Focus::ShowCalendar => Some(Action::ShowCalendar),
        Focus::SetBudget => Some(Action::SetBudget),
        Focus::Summary => Some(Action::Summary),
        Focus::Calendar => {
            let button = app.cursor_button();
            if button.is_none() {
                app.set_status("No calendar shown. Press c to show one");
            }
            button.map(Action::ViewDay)
        }
    }
}

fn add_on_cursor(app: &App, kind: EntryKind) -> Option<Action> {
    app.cursor_button().map(|b| Action::AddEntry(b, kind))
}

fn start_editing(app: &mut App, field: Focus) {
    app.focus = field;
    app.edit_buffer = match field {
        Focus::Year => app.year_input.clone(),
        _ => app.month_input.clone(),
    };
    app.input_mode = InputMode::Editing;
}

fn step_month(app: &mut App, step: fn(&YearMonth) -> YearMonth) -> Option<Action> {
    let current = app.shown_month()?;
    app.set_fields(step(&current));
    Some(Action::ShowCalendar)
}

fn handle_command_input(key: KeyEvent, app: &mut App) -> Result<Option<Action>> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            return commands::handle_command(&input, app);
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(None)
}

/// Typing into the year or month field. The grid is only rebuilt when
/// Show Calendar is pressed.
fn handle_editing_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            commit_edit(app);
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.edit_buffer.clear();
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Tab => {
            commit_edit(app);
            let next = if app.focus == Focus::Year { Focus::Month } else { Focus::Year };
            start_editing(app, next);
        }
        KeyCode::Backspace => {
            app.edit_buffer.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.edit_buffer.push(c);
        }
        _ => {}
    }
}

fn commit_edit(app: &mut App) {
    let value = std::mem::take(&mut app.edit_buffer).trim().to_string();
    let msg = format!("{} set to '{value}'. Press c to show it", app.focus);
    match app.focus {
        Focus::Year => app.year_input = value,
        _ => app.month_input = value,
    }
    app.set_status(msg);
}

// ── Actions ──────────────────────────────────────────────────

/// Run one action to completion, dialogs included, then re-read the shown
/// month so markers and the day panel reflect what was saved.
fn perform(action: Action, terminal: &mut Term, app: &mut App, store: &Store) -> Result<()> {
    match action {
        Action::ShowCalendar => app.show_calendar(store)?,
        Action::SetBudget => {
            let Some(month) = app.selection_or_report() else {
                return Ok(());
            };
            let set = ledger::set_monthly_budget(store, &mut TuiPrompter::new(terminal, app), month)?;
            if set.is_some() {
                app.set_status(format!("Budget saved for {month}"));
            }
        }
        Action::Summary => {
            let Some(month) = app.selection_or_report() else {
                return Ok(());
            };
            ledger::monthly_summary(store, &mut TuiPrompter::new(terminal, app), month)?;
        }
        Action::ViewDay(button) => {
            let added =
                ledger::view_date_entries(store, &mut TuiPrompter::new(terminal, app), button.date)?;
            if let Some(entry) = added {
                app.set_status(format!("Added {} on {}", entry.kind, button.date));
            }
        }
        Action::AddEntry(button, kind) => {
            let added =
                ledger::add_entry(store, &mut TuiPrompter::new(terminal, app), button.date, kind)?;
            match added {
                Some(entry) => app.set_status(format!("Added {} on {}", entry.kind, button.date)),
                None => app.set_status("Nothing added"),
            }
        }
        Action::Export(path) => {
            let Some(month) = app.shown_month() else {
                app.set_status("Fix the year/month fields first");
                return Ok(());
            };
            let path = path
                .map(|p| export::expand_home(&p))
                .unwrap_or_else(|| export::default_path(month));
            match export::export_month(store, month, &path) {
                Ok(0) => app.set_status(format!("No entries for {month}")),
                Ok(count) => {
                    app.set_status(format!("Exported {count} entries to {}", path.display()))
                }
                Err(e) => {
                    log::warn!("Export failed: {e:#}");
                    app.set_status(format!("Export failed: {e:#}"));
                }
            }
        }
    }
    app.refresh_month(store)
}
