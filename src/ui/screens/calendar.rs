use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell as TableCell, Paragraph, Row, Table},
    Frame,
};

use crate::calendar::{Cell, CalendarGrid, WEEKDAYS};
use crate::ui::app::{App, Focus};
use crate::ui::theme;

const CELL_WIDTH: u16 = 6;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Calendar;
    let border = if focused { theme::ACCENT } else { theme::OVERLAY };

    let Some(grid) = &app.calendar else {
        render_empty(f, area, border);
        return;
    };

    let header = Row::new(
        WEEKDAYS
            .iter()
            .map(|d| TableCell::from(format!("{d:^6}")).style(theme::header_style())),
    )
    .height(1);

    let rows: Vec<Row> = grid
        .weeks()
        .iter()
        .map(|week| {
            let cells = week.iter().map(|cell| match cell {
                Cell::Blank => TableCell::from("").style(theme::blank_day_style()),
                Cell::Day(button) => {
                    let day = button.date.day();
                    let marker = if app.entries_on(&button.date).is_empty() {
                        " "
                    } else {
                        "•"
                    };
                    let style = if day == app.cursor_day {
                        if focused {
                            theme::selected_style()
                        } else {
                            theme::day_style().add_modifier(Modifier::UNDERLINED)
                        }
                    } else {
                        theme::day_style()
                    };
                    TableCell::from(format!(" {day:>2} {marker} ")).style(style)
                }
            });
            Row::new(cells).height(1).bottom_margin(1)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(CELL_WIDTH); 7])
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(Span::styled(
                    format!(" {} ", title(grid)),
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        );
    f.render_widget(table, area);
}

fn title(grid: &CalendarGrid) -> String {
    let month = grid.month();
    let name = month.first_day().format("%B").to_string();
    format!("{name} {}", month.year())
}

fn render_empty(f: &mut Frame, area: Rect, border: ratatui::style::Color) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No calendar shown", theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Enter a year and month, then press Show Calendar",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                " Calendar ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(msg, area);
}
