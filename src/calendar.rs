use crate::models::{EntryDate, YearMonth};

pub(crate) const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// A clickable day. It carries its own date so activating it never depends on
/// what the grid or the input fields hold at that moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DayButton {
    pub(crate) date: EntryDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cell {
    /// Padding before the 1st or after the last day of the month.
    Blank,
    Day(DayButton),
}

/// Weeks of one month, Monday first.
#[derive(Debug, Clone)]
pub(crate) struct CalendarGrid {
    month: YearMonth,
    weeks: Vec<[Cell; 7]>,
}

impl CalendarGrid {
    pub(crate) fn build(month: YearMonth) -> Self {
        let lead = month.first_weekday().num_days_from_monday() as usize;
        let days = month.days_in_month() as usize;
        let total = (lead + days).div_ceil(7) * 7;

        let mut weeks = Vec::with_capacity(total / 7);
        let mut week = [Cell::Blank; 7];
        for slot in 0..total {
            let cell = if slot < lead || slot >= lead + days {
                Cell::Blank
            } else {
                month
                    .day((slot - lead + 1) as u32)
                    .map(|date| Cell::Day(DayButton { date }))
                    .unwrap_or(Cell::Blank)
            };
            week[slot % 7] = cell;
            if slot % 7 == 6 {
                weeks.push(week);
                week = [Cell::Blank; 7];
            }
        }

        Self { month, weeks }
    }

    pub(crate) fn month(&self) -> YearMonth {
        self.month
    }

    pub(crate) fn weeks(&self) -> &[[Cell; 7]] {
        &self.weeks
    }

    pub(crate) fn buttons(&self) -> impl Iterator<Item = &DayButton> {
        self.weeks.iter().flatten().filter_map(|cell| match cell {
            Cell::Day(button) => Some(button),
            Cell::Blank => None,
        })
    }

    pub(crate) fn button(&self, day: u32) -> Option<DayButton> {
        self.buttons().find(|b| b.date.day() == day).copied()
    }

    /// Plain-text rendering for the CLI: a weekday header and one line per
    /// week, blanks as empty columns.
    pub(crate) fn to_text(&self) -> String {
        let mut out = format!("{:^27}\n", self.month.key());
        out.push_str(&WEEKDAYS.map(|d| &d[..2]).join("  "));
        out.push('\n');
        for week in &self.weeks {
            let line: Vec<String> = week
                .iter()
                .map(|cell| match cell {
                    Cell::Blank => "  ".to_string(),
                    Cell::Day(b) => format!("{:>2}", b.date.day()),
                })
                .collect();
            out.push_str(line.join("  ").trim_end());
            out.push('\n');
        }
        out
    }
}
