use anyhow::Result;

use crate::calendar::{CalendarGrid, DayButton};
use crate::models::{Entry, EntryDate, EntryKind, MonthRecord, Summary, YearMonth};
use crate::store::Store;

/// Widgets that can hold keyboard focus, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Year,
    Month,
    ShowCalendar,
    SetBudget,
    Summary,
    Calendar,
}

impl Focus {
    pub(crate) fn all() -> &'static [Focus] {
        &[
            Self::Year,
            Self::Month,
            Self::ShowCalendar,
            Self::SetBudget,
            Self::Summary,
            Self::Calendar,
        ]
    }

    pub(crate) fn buttons() -> &'static [Focus] {
        &[Self::ShowCalendar, Self::SetBudget, Self::Summary]
    }

    pub(crate) fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| *f == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub(crate) fn prev(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| *f == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

impl std::fmt::Display for Focus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Year => write!(f, "Year"),
            Self::Month => write!(f, "Month"),
            Self::ShowCalendar => write!(f, "Show Calendar"),
            Self::SetBudget => write!(f, "Set Monthly Budget"),
            Self::Summary => write!(f, "Monthly Summary"),
            Self::Calendar => write!(f, "Calendar"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
        }
    }
}

/// Something the run loop should do after a key press. Day actions carry the
/// button they were triggered from, so they act on that button's date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    ShowCalendar,
    SetBudget,
    Summary,
    ViewDay(DayButton),
    AddEntry(DayButton, EntryKind),
    Export(Option<String>),
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) input_mode: InputMode,
    pub(crate) focus: Focus,
    pub(crate) year_input: String,
    pub(crate) month_input: String,
    pub(crate) edit_buffer: String,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Calendar (rebuilt from scratch by show_calendar)
    pub(crate) calendar: Option<CalendarGrid>,
    pub(crate) cursor_day: u32,

    // Read-only copy of the shown month, for markers and the day panel
    pub(crate) month_record: Option<MonthRecord>,
}

impl App {
    pub(crate) fn new() -> Self {
        let now = YearMonth::current();
        Self {
            running: true,
            input_mode: InputMode::Normal,
            focus: Focus::Calendar,
            year_input: now.year().to_string(),
            month_input: now.month().to_string(),
            edit_buffer: String::new(),
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            calendar: None,
            cursor_day: 1,

            month_record: None,
        }
    }

    /// The month named by the year and month fields right now.
    pub(crate) fn selection(&self) -> Result<YearMonth> {
        YearMonth::from_fields(&self.year_input, &self.month_input)
    }

    /// Like `selection`, but a bad field only ends up in the status bar.
    pub(crate) fn selection_or_report(&mut self) -> Option<YearMonth> {
        match self.selection() {
            Ok(month) => Some(month),
            Err(e) => {
                log::warn!("Bad year/month input: {e:#}");
                self.set_status(format!("{e:#}"));
                None
            }
        }
    }

    pub(crate) fn set_fields(&mut self, month: YearMonth) {
        self.year_input = month.year().to_string();
        self.month_input = month.month().to_string();
    }

    /// Throw away the current grid and build a new one for the fields' month.
    pub(crate) fn show_calendar(&mut self, store: &Store) -> Result<()> {
        let Some(month) = self.selection_or_report() else {
            return Ok(());
        };
        let grid = CalendarGrid::build(month);
        let today = EntryDate::today();
        self.cursor_day = if today.month() == month { today.day() } else { 1 };
        self.calendar = Some(grid);
        self.refresh_month(store)?;
        self.set_status(format!("Showing {month}"));
        Ok(())
    }

    /// Point the fields at `month` and show it.
    pub(crate) fn goto_month(&mut self, month: YearMonth, store: &Store) -> Result<()> {
        self.set_fields(month);
        self.show_calendar(store)
    }

    /// The month on screen, falling back to whatever the fields say.
    pub(crate) fn shown_month(&self) -> Option<YearMonth> {
        self.calendar
            .as_ref()
            .map(CalendarGrid::month)
            .or_else(|| self.selection().ok())
    }

    pub(crate) fn refresh_month(&mut self, store: &Store) -> Result<()> {
        self.month_record = match &self.calendar {
            Some(grid) => store.load()?.month(&grid.month()).cloned(),
            None => None,
        };
        Ok(())
    }

    pub(crate) fn cursor_button(&self) -> Option<DayButton> {
        self.calendar.as_ref()?.button(self.cursor_day)
    }

    /// Move the day cursor by `delta` days, staying inside the month.
    pub(crate) fn move_cursor(&mut self, delta: i32) {
        let Some(grid) = &self.calendar else {
            return;
        };
        let last = grid.month().days_in_month() as i32;
        let target = self.cursor_day as i32 + delta;
        if (1..=last).contains(&target) {
            self.cursor_day = target as u32;
        }
    }

    pub(crate) fn entries_on(&self, date: &EntryDate) -> &[Entry] {
        self.month_record
            .as_ref()
            .map(|r| r.entries_on(date))
            .unwrap_or(&[])
    }

    pub(crate) fn month_summary(&self) -> Option<Summary> {
        self.month_record.as_ref().and_then(|r| r.summary().ok())
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rust_decimal_macros::dec;

    fn scratch_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(&dir.path().join("expenses.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_focus_cycles_both_ways() {
        assert_eq!(Focus::Calendar.next(), Focus::Year);
        assert_eq!(Focus::Year.prev(), Focus::Calendar);
        assert_eq!(Focus::Month.next(), Focus::ShowCalendar);
    }

    #[test]
    fn test_show_calendar_rebuilds_grid() {
        let (_dir, store) = scratch_store();
        let mut app = App::new();
        app.set_fields(YearMonth::new(2024, 2).unwrap());
        app.show_calendar(&store).unwrap();
        assert_eq!(app.calendar.as_ref().unwrap().buttons().count(), 29);

        app.month_input = "4".into();
        app.show_calendar(&store).unwrap();
        let grid = app.calendar.as_ref().unwrap();
        assert_eq!(grid.month(), YearMonth::new(2024, 4).unwrap());
        assert_eq!(grid.buttons().count(), 30);
    }

    #[test]
    fn test_bad_field_reports_and_keeps_grid() {
        let (_dir, store) = scratch_store();
        let mut app = App::new();
        app.set_fields(YearMonth::new(2024, 2).unwrap());
        app.show_calendar(&store).unwrap();

        app.month_input = "thirteen".into();
        app.show_calendar(&store).unwrap();
        assert!(app.status_message.contains("Invalid month"));
        assert_eq!(
            app.calendar.as_ref().unwrap().month(),
            YearMonth::new(2024, 2).unwrap()
        );
    }

    #[test]
    fn test_day_button_keeps_its_month_after_fields_change() {
        let (_dir, store) = scratch_store();
        let mut app = App::new();
        app.set_fields(YearMonth::new(2024, 5).unwrap());
        app.show_calendar(&store).unwrap();
        app.cursor_day = 17;

        app.year_input = "1999".into();
        let button = app.cursor_button().unwrap();
        assert_eq!(button.date.key(), "2024-05-17");
    }

    #[test]
    fn test_cursor_stays_in_month() {
        let (_dir, store) = scratch_store();
        let mut app = App::new();
        app.set_fields(YearMonth::new(2024, 5).unwrap());
        app.show_calendar(&store).unwrap();
        app.cursor_day = 1;
        app.move_cursor(-1);
        assert_eq!(app.cursor_day, 1);
        app.move_cursor(7);
        assert_eq!(app.cursor_day, 8);
        app.cursor_day = 30;
        app.move_cursor(7);
        assert_eq!(app.cursor_day, 30);
        app.move_cursor(1);
        assert_eq!(app.cursor_day, 31);
    }

    #[test]
    fn test_refresh_month_picks_up_saved_entries() {
        let (_dir, store) = scratch_store();
        let may = YearMonth::new(2024, 5).unwrap();
        let mut app = App::new();
        app.goto_month(may, &store).unwrap();
        assert!(app.month_summary().is_none());

        store.update(|doc| doc.set_budget(&may, dec!(300))).unwrap();
        app.refresh_month(&store).unwrap();
        assert_eq!(app.month_summary().unwrap().budget, dec!(300));
    }
}
