use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::app::{App, Focus, InputMode};
use crate::ui::theme;

/// The year/month fields and the three buttons.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let fields = Line::from(vec![
        Span::styled(" Year: ", theme::dim_style()),
        field_span(app, Focus::Year, &app.year_input, 6),
        Span::styled("   Month (1-12): ", theme::dim_style()),
        field_span(app, Focus::Month, &app.month_input, 4),
    ]);

    let mut buttons = vec![Span::raw(" ")];
    for &button in Focus::buttons() {
        let style = if app.focus == button {
            theme::selected_style().add_modifier(Modifier::BOLD)
        } else {
            theme::button_style(button)
        };
        buttons.push(Span::styled(format!(" {button} "), style));
        buttons.push(Span::raw("  "));
    }

    let form = Paragraph::new(vec![fields, Line::from(""), Line::from(buttons)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Wallet Watch ",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(form, area);
}

fn field_span<'a>(app: &'a App, field: Focus, value: &'a str, width: usize) -> Span<'a> {
    let editing = app.input_mode == InputMode::Editing && app.focus == field;
    let text = if editing { app.edit_buffer.as_str() } else { value };
    let style = if editing {
        theme::command_bar_style().add_modifier(Modifier::UNDERLINED)
    } else if app.focus == field {
        theme::selected_style()
    } else {
        theme::alt_row_style()
    };
    Span::styled(format!("[{text:<width$}]"), style)
}
