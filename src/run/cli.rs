use anyhow::{anyhow, bail, Context, Result};
use rust_decimal::Decimal;

use crate::calendar::CalendarGrid;
use crate::export;
use crate::ledger::{self, Answer, PresetPrompter};
use crate::models::{self, EntryDate, EntryKind, YearMonth};
use crate::store::Store;

pub(crate) fn as_cli(args: &[String], store: &Store) -> Result<()> {
    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };
    let rest = &args[1..];
    match command.as_str() {
        "summary" | "s" => cli_summary(rest, store),
        "day" | "d" => cli_day(rest, store),
        "calendar" | "c" => cli_calendar(rest, store),
        "budget" | "b" => cli_budget(rest, store),
        "add" | "a" => cli_add(rest, store),
        "export" => cli_export(rest, store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("wallet-watch {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Wallet Watch: a calendar-based monthly budget tracker");
    println!();
    println!("Usage: wallet-watch [--data-dir DIR] [--log-level LEVEL] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                   Launch interactive TUI");
    println!("  summary [YYYY-MM]                        Print a month's summary (default: current)");
    println!("  day YYYY-MM-DD                           List the entries on a day");
    println!("  calendar [YYYY-MM]                       Print a month's calendar");
    println!("  budget YYYY-MM AMOUNT                    Set a month's budget");
    println!("  add YYYY-MM-DD income|expense CAT AMOUNT Add an entry");
    println!("  export [path]                            Export a month to CSV");
    println!("    --month <YYYY-MM>                      Month to export (default: current)");
    println!("  --help, -h                               Show this help");
    println!("  --version, -V                            Show version");
    println!();
    println!("Data lives in DIR/expenses.json (default DIR: ./data).");
}

fn parse_month(arg: &str) -> Result<YearMonth> {
    YearMonth::parse_key(arg).ok_or_else(|| anyhow!("Invalid month '{arg}', expected YYYY-MM"))
}

fn parse_date(arg: &str) -> Result<EntryDate> {
    EntryDate::parse_key(arg).ok_or_else(|| anyhow!("Invalid date '{arg}', expected YYYY-MM-DD"))
}

fn parse_amount(arg: &str) -> Result<Decimal> {
    models::parse_amount(arg).with_context(|| format!("Invalid amount: '{arg}'"))
}

/// First positional argument as a month, or the current month.
fn month_or_current(args: &[String]) -> Result<YearMonth> {
    args.first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| parse_month(a))
        .unwrap_or_else(|| Ok(YearMonth::current()))
}

fn cli_summary(args: &[String], store: &Store) -> Result<()> {
    let month = month_or_current(args)?;
    println!("Wallet Watch {month}");
    println!("{}", "─".repeat(30));
    let mut prompter = PresetPrompter::default().echo();
    ledger::monthly_summary(store, &mut prompter, month)?;
    Ok(())
}

fn cli_day(args: &[String], store: &Store) -> Result<()> {
    let Some(arg) = args.first() else {
        bail!("Usage: wallet-watch day YYYY-MM-DD");
    };
    let date = parse_date(arg)?;
    let doc = store.load()?;
    let entries = doc.entries_on(&date);
    if entries.is_empty() {
        println!("No entries on {date}");
        return Ok(());
    }
    println!("Entries on {date}:");
    for entry in entries {
        println!("  {}", ledger::entry_line(entry));
    }
    Ok(())
}

fn cli_calendar(args: &[String], store: &Store) -> Result<()> {
    let month = month_or_current(args)?;
    let grid = CalendarGrid::build(month);
    print!("{}", grid.to_text());

    let doc = store.load()?;
    let busy: Vec<String> = grid
        .buttons()
        .filter(|b| !doc.entries_on(&b.date).is_empty())
        .map(|b| b.date.day().to_string())
        .collect();
    if !busy.is_empty() {
        println!();
        println!("Days with entries: {}", busy.join(", "));
    }
    Ok(())
}

fn cli_budget(args: &[String], store: &Store) -> Result<()> {
    let [month, amount] = args else {
        bail!("Usage: wallet-watch budget YYYY-MM AMOUNT");
    };
    let month = parse_month(month)?;
    let amount = parse_amount(amount)?;

    let mut prompter = PresetPrompter::new([Answer::Amount(Some(amount))]).echo();
    ledger::set_monthly_budget(store, &mut prompter, month)?;
    Ok(())
}

fn cli_add(args: &[String], store: &Store) -> Result<()> {
    let [date, kind, category, amount] = args else {
        bail!("Usage: wallet-watch add YYYY-MM-DD income|expense CATEGORY AMOUNT");
    };
    let date = parse_date(date)?;
    let kind = EntryKind::parse(kind)
        .ok_or_else(|| anyhow!("Invalid type '{kind}', expected income or expense"))?;
    let amount = parse_amount(amount)?;

    let mut prompter = PresetPrompter::new([
        Answer::Text(Some(category.clone())),
        Answer::Amount(Some(amount)),
    ])
    .echo();
    if ledger::add_entry(store, &mut prompter, date, kind)?.is_none() {
        log::warn!("Nothing added: category '{category}', amount {amount}");
        println!("Nothing added (category must be non-empty and amount non-zero)");
    }
    Ok(())
}

fn cli_export(args: &[String], store: &Store) -> Result<()> {
    let month = match args.windows(2).find(|w| w[0] == "--month") {
        Some(w) => parse_month(&w[1])?,
        None => YearMonth::current(),
    };

    // Output path is the first non-flag argument
    let path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| export::expand_home(a))
        .unwrap_or_else(|| export::default_path(month));

    let count = export::export_month(store, month, &path)?;
    if count == 0 {
        println!("No entries for {month}");
    } else {
        println!("Exported {count} entries to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rust_decimal_macros::dec;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn scratch_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(&dir.path().join("expenses.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_add_and_budget_persist() {
        let (_dir, store) = scratch_store();
        as_cli(&args(&["budget", "2024-05", "1,500"]), &store).unwrap();
        as_cli(&args(&["add", "2024-05-03", "expense", "Rent", "900"]), &store).unwrap();
        as_cli(&args(&["add", "2024-05-03", "i", "Salary", "2000"]), &store).unwrap();

        let doc = store.load().unwrap();
        let may = YearMonth::new(2024, 5).unwrap();
        let summary = doc.month(&may).unwrap().summary().unwrap();
        assert_eq!(summary.budget, dec!(1500));
        assert_eq!(summary.expense, dec!(900));
        assert_eq!(summary.income, dec!(2000));
    }

    #[test]
    fn test_add_zero_amount_is_dropped() {
        let (_dir, store) = scratch_store();
        as_cli(&args(&["add", "2024-05-03", "expense", "Tea", "0"]), &store).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_bad_arguments_are_errors() {
        let (_dir, store) = scratch_store();
        let err = as_cli(&args(&["budget", "2024-13", "10"]), &store).unwrap_err();
        assert!(err.to_string().contains("Invalid month"));
        let err = as_cli(&args(&["add", "2024-02-30", "expense", "X", "1"]), &store).unwrap_err();
        assert!(err.to_string().contains("Invalid date"));
        let err = as_cli(&args(&["add", "2024-02-03", "gift", "X", "1"]), &store).unwrap_err();
        assert!(err.to_string().contains("Invalid type"));
        let err = as_cli(&args(&["budget", "2024-02", "lots"]), &store).unwrap_err();
        assert!(err.to_string().contains("Invalid amount"));
        assert!(as_cli(&args(&["frobnicate"]), &store).is_err());
    }

    #[test]
    fn test_out_of_range_amounts_are_refused() {
        let (_dir, store) = scratch_store();
        let err = as_cli(
            &args(&["add", "2024-05-03", "income", "Lottery", "79228162514264337593543950335"]),
            &store,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid amount"));
        let err = as_cli(&args(&["budget", "2024-05", "0.1234567890123456789"]), &store).unwrap_err();
        assert!(err.to_string().contains("Invalid amount"));

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_export_with_month_flag() {
        let (dir, store) = scratch_store();
        as_cli(&args(&["add", "2024-05-03", "expense", "Rent", "900"]), &store).unwrap();
        let out = dir.path().join("out.csv");
        let out_str = out.to_str().unwrap();
        as_cli(&args(&["export", out_str, "--month", "2024-05"]), &store).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_read_only_commands_run() {
        let (_dir, store) = scratch_store();
        as_cli(&args(&["summary", "2024-05"]), &store).unwrap();
        as_cli(&args(&["day", "2024-05-01"]), &store).unwrap();
        as_cli(&args(&["calendar", "2024-05"]), &store).unwrap();
        as_cli(&args(&["version"]), &store).unwrap();
        assert!(store.load().unwrap().is_empty());
    }
}
