use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::models::{EntryKind, Summary};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Entries of the cursor day
            Constraint::Length(7), // Month totals
        ])
        .split(area);

    render_entries(f, chunks[0], app);
    render_totals(f, chunks[1], app.month_summary());
}

fn render_entries(f: &mut Frame, area: Rect, app: &App) {
    let button = app.cursor_button();
    let title = match &button {
        Some(b) => format!(" {} ", b.date),
        None => " Day ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let entries = button.map(|b| app.entries_on(&b.date)).unwrap_or(&[]);
    if entries.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No entries", theme::dim_style())),
            Line::from(Span::styled("Enter to view, i/e to add", theme::dim_style())),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let name_width = (area.width as usize).saturating_sub(20).max(6);
    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let (sign, style) = match entry.kind {
                EntryKind::Income => ("+", theme::income_style()),
                EntryKind::Expense => ("-", theme::expense_style()),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {sign} "), style),
                Span::styled(
                    format!("{:<name_width$}", truncate(&entry.category, name_width)),
                    theme::normal_style(),
                ),
                Span::styled(format!(" {:>14}", format_amount(entry.amount)), style),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn render_totals(f: &mut Frame, area: Rect, summary: Option<Summary>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Month ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let Some(summary) = summary else {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No data for this month",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    };

    let signed = |amount: Decimal| {
        if amount < Decimal::ZERO {
            theme::expense_style()
        } else {
            theme::income_style()
        }
    };
    let rows = [
        ("Budget", summary.budget, theme::normal_style()),
        ("Income", summary.income, theme::income_style()),
        ("Expense", summary.expense, theme::expense_style()),
        ("Savings", summary.savings, signed(summary.savings)),
        ("Balance", summary.balance, signed(summary.balance)),
    ];
    let lines: Vec<Line> = rows
        .into_iter()
        .map(|(label, amount, style)| {
            Line::from(vec![
                Span::styled(format!(" {label:<9}"), theme::dim_style()),
                Span::styled(format!("{:>16}", format_amount(amount)), style),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
