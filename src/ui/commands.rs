use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{Action, App};
use crate::models::{EntryDate, EntryKind, YearMonth};

type CommandResult = anyhow::Result<Option<Action>>;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> CommandResult,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit Wallet Watch", cmd_quit, r);
    register_command!("quit", "Quit Wallet Watch", cmd_quit, r);
    register_command!("h", "Show help", cmd_help, r);
    register_command!("help", "Show help", cmd_help, r);
    register_command!("c", "Show the calendar for the year/month fields", cmd_calendar, r);
    register_command!("calendar", "Show the calendar for the year/month fields", cmd_calendar, r);
    register_command!("b", "Set the monthly budget", cmd_budget, r);
    register_command!("budget", "Set the monthly budget", cmd_budget, r);
    register_command!("s", "Show the monthly summary", cmd_summary, r);
    register_command!("summary", "Show the monthly summary", cmd_summary, r);
    register_command!("m", "Go to a month (e.g. :m 2024-05)", cmd_month, r);
    register_command!("month", "Go to a month (e.g. :month 2024-05)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!("today", "Go to today", cmd_today, r);
    register_command!("v", "View entries on the selected day", cmd_view, r);
    register_command!("view", "View entries on the selected day", cmd_view, r);
    register_command!("i", "Add income on the selected day", cmd_income, r);
    register_command!("income", "Add income on the selected day", cmd_income, r);
    register_command!("e", "Add an expense on the selected day", cmd_expense, r);
    register_command!("expense", "Add an expense on the selected day", cmd_expense, r);
    register_command!(
        "export",
        "Export the month to CSV (e.g. :export ~/may.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> CommandResult {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(None);
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        log::debug!("Running command :{trimmed}");
        return (cmd.run)(args, app);
    }

    let suggestion = find_closest(cmd_name);
    app.set_status(format!(
        "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
    ));
    Ok(None)
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // single-letter aliases make poor suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> CommandResult {
    app.running = false;
    Ok(None)
}

fn cmd_help(_args: &str, app: &mut App) -> CommandResult {
    app.show_help = true;
    Ok(None)
}

fn cmd_calendar(_args: &str, _app: &mut App) -> CommandResult {
    Ok(Some(Action::ShowCalendar))
}

fn cmd_budget(_args: &str, _app: &mut App) -> CommandResult {
    Ok(Some(Action::SetBudget))
}

fn cmd_summary(_args: &str, _app: &mut App) -> CommandResult {
    Ok(Some(Action::Summary))
}

fn cmd_month(args: &str, app: &mut App) -> CommandResult {
    match YearMonth::parse_key(args) {
        Some(month) => {
            app.set_fields(month);
            Ok(Some(Action::ShowCalendar))
        }
        None => {
            app.set_status("Usage: :month YYYY-MM");
            Ok(None)
        }
    }
}

fn cmd_next_month(_args: &str, app: &mut App) -> CommandResult {
    step_month(app, YearMonth::next)
}

fn cmd_prev_month(_args: &str, app: &mut App) -> CommandResult {
    step_month(app, YearMonth::prev)
}

fn step_month(app: &mut App, step: fn(&YearMonth) -> YearMonth) -> CommandResult {
    let Some(current) = app.shown_month() else {
        app.set_status("Fix the year/month fields first");
        return Ok(None);
    };
    app.set_fields(step(&current));
    Ok(Some(Action::ShowCalendar))
}

fn cmd_today(_args: &str, app: &mut App) -> CommandResult {
    let today = EntryDate::today();
    app.set_fields(today.month());
    Ok(Some(Action::ShowCalendar))
}

fn cmd_view(_args: &str, app: &mut App) -> CommandResult {
    Ok(selected_day(app).map(Action::ViewDay))
}

fn cmd_income(_args: &str, app: &mut App) -> CommandResult {
    Ok(selected_day(app).map(|b| Action::AddEntry(b, EntryKind::Income)))
}

fn cmd_expense(_args: &str, app: &mut App) -> CommandResult {
    Ok(selected_day(app).map(|b| Action::AddEntry(b, EntryKind::Expense)))
}

fn selected_day(app: &mut App) -> Option<crate::calendar::DayButton> {
    let button = app.cursor_button();
    if button.is_none() {
        app.set_status("Show a calendar first (:calendar)");
    }
    button
}

fn cmd_export(args: &str, _app: &mut App) -> CommandResult {
    let path = (!args.is_empty()).then(|| args.to_string());
    Ok(Some(Action::Export(path)))
}
