//! The user-facing operations: set a month's budget, add an entry, look at a
//! day, summarise a month. Each one loads the data file fresh, talks to the
//! user through a [`Prompter`], and writes the file back only when something
//! changed.

mod prompt;

pub(crate) use prompt::{Answer, PresetPrompter, Prompter};

use anyhow::Result;
use rust_decimal::Decimal;

use crate::models::{check_amount, Entry, EntryDate, EntryKind, Summary, YearMonth};
use crate::store::Store;
use crate::ui::util::format_amount;

/// Ask for a budget and store it on the month. Cancelling the prompt changes
/// nothing. Returns the budget that was set.
pub(crate) fn set_monthly_budget(
    store: &Store,
    prompter: &mut dyn Prompter,
    month: YearMonth,
) -> Result<Option<Decimal>> {
    let key = month.key();
    let Some(budget) = prompter.ask_amount("Set Budget", &format!("Enter budget for {key}:"))? else {
        return Ok(None);
    };
    if let Err(e) = check_amount(budget) {
        log::warn!("Refused budget {budget} for {key}: {e}");
        prompter.show_info("Invalid Amount", &e.to_string())?;
        return Ok(None);
    }

    store.update(|doc| doc.set_budget(&month, budget))?;
    log::info!("Budget for {key} set to {budget}");
    prompter.show_info(
        "Budget Set",
        &format!("Monthly budget set to {}", format_amount(budget)),
    )?;
    Ok(Some(budget))
}

/// Ask for a category and an amount and append the entry to `date`.
///
/// Both prompts are always shown. An empty or cancelled category, or a
/// cancelled or zero amount, drops the entry without a word. An amount too
/// large or too precise to store is refused with a message.
pub(crate) fn add_entry(
    store: &Store,
    prompter: &mut dyn Prompter,
    date: EntryDate,
    kind: EntryKind,
) -> Result<Option<Entry>> {
    let category = prompter.ask_string("Category", "Enter category:")?;
    let amount = prompter.ask_amount("Amount", "Enter amount:")?;

    let (Some(category), Some(amount)) = (category, amount) else {
        return Ok(None);
    };
    if category.is_empty() || amount.is_zero() {
        return Ok(None);
    }
    if let Err(e) = check_amount(amount) {
        log::warn!("Refused {kind} amount {amount} on {date}: {e}");
        prompter.show_info("Invalid Amount", &e.to_string())?;
        return Ok(None);
    }

    let entry = Entry::new(kind, category, amount);
    store.update(|doc| doc.push_entry(&date, entry.clone()))?;
    log::info!("Added {kind} '{}' {} on {date}", entry.category, entry.amount);
    prompter.show_info(
        "Saved",
        &format!(
            "Added {kind}: {} {} on {date}",
            entry.category,
            format_amount(entry.amount)
        ),
    )?;
    Ok(Some(entry))
}

/// Show what was recorded on `date` and offer to add an expense.
pub(crate) fn view_date_entries(
    store: &Store,
    prompter: &mut dyn Prompter,
    date: EntryDate,
) -> Result<Option<Entry>> {
    let doc = store.load()?;
    let entries = doc.entries_on(&date);

    let wants_more = if entries.is_empty() {
        prompter.ask_yes_no("No Expenses", &format!("No entries on {date}. Add one?"))?
    } else {
        let text = entries
            .iter()
            .map(entry_line)
            .collect::<Vec<_>>()
            .join("\n");
        prompter.ask_yes_no(
            "Expenses",
            &format!("Entries on {date}:\n{text}\n\nAdd more?"),
        )?
    };

    if wants_more {
        add_entry(store, prompter, date, EntryKind::Expense)
    } else {
        Ok(None)
    }
}

/// Total up a month and show it. Months that were never touched report
/// "no data" and return `None`.
pub(crate) fn monthly_summary(
    store: &Store,
    prompter: &mut dyn Prompter,
    month: YearMonth,
) -> Result<Option<Summary>> {
    let doc = store.load()?;
    let Some(record) = doc.month(&month) else {
        prompter.show_info("Summary", "No data for this month.")?;
        return Ok(None);
    };

    let summary = record.summary()?;
    prompter.show_info("Monthly Summary", &summary_text(&summary))?;
    Ok(Some(summary))
}

/// `type - category: amount`
pub(crate) fn entry_line(entry: &Entry) -> String {
    format!(
        "{} - {}: {}",
        entry.kind,
        entry.category,
        format_amount(entry.amount)
    )
}

pub(crate) fn summary_text(summary: &Summary) -> String {
    [
        ("Budget", summary.budget),
        ("Income", summary.income),
        ("Expense", summary.expense),
        ("Savings", summary.savings),
        ("Balance Left", summary.balance),
    ]
    .iter()
    .map(|(label, amount)| format!("{label}: {}", format_amount(*amount)))
    .collect::<Vec<_>>()
    .join("\n")
}
