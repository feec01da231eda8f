use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::models::YearMonth;
use crate::store::Store;

const HEADER: [&str; 4] = ["date", "type", "category", "amount"];

/// Write every entry of `month` to `path` as CSV, in date order and insertion
/// order within a date. Returns the number of rows written.
pub(crate) fn export_month(store: &Store, month: YearMonth, path: &Path) -> Result<usize> {
    let doc = store.load()?;
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    wtr.write_record(HEADER)?;

    let mut count = 0;
    if let Some(record) = doc.month(&month) {
        for (date, entries) in &record.transactions {
            for entry in entries {
                let amount = entry.amount.to_string();
                wtr.write_record([
                    date.as_str(),
                    entry.kind.as_str(),
                    entry.category.as_str(),
                    amount.as_str(),
                ])?;
                count += 1;
            }
        }
    }
    wtr.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;

    log::info!("Exported {count} entries for {month} to {}", path.display());
    Ok(count)
}

/// `~/wallet-watch-YYYY-MM.csv`, or the working directory when there is no
/// home directory.
pub(crate) fn default_path(month: YearMonth) -> PathBuf {
    home_dir().join(format!("wallet-watch-{}.csv", month.key()))
}

/// Expand a leading `~/`.
pub(crate) fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => home_dir().join(rest),
        None => PathBuf::from(path),
    }
}

fn home_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::{Entry, EntryKind};
    use rust_decimal_macros::dec;

    fn scratch_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(&dir.path().join("expenses.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_export_month_rows_in_order() {
        let (dir, store) = scratch_store();
        let may = YearMonth::new(2024, 5).unwrap();
        store
            .update(|doc| {
                doc.push_entry(
                    &may.day(9).unwrap(),
                    Entry::new(EntryKind::Expense, "Bus".into(), dec!(2.5)),
                );
                doc.push_entry(
                    &may.day(3).unwrap(),
                    Entry::new(EntryKind::Income, "Salary".into(), dec!(100)),
                );
                doc.push_entry(
                    &may.day(3).unwrap(),
                    Entry::new(EntryKind::Expense, "Food, fresh".into(), dec!(40)),
                );
                doc.push_entry(
                    &YearMonth::new(2024, 6).unwrap().day(1).unwrap(),
                    Entry::new(EntryKind::Expense, "Other month".into(), dec!(1)),
                );
            })
            .unwrap();

        let out = dir.path().join("may.csv");
        assert_eq!(export_month(&store, may, &out).unwrap(), 3);

        let text = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "date,type,category,amount",
                "2024-05-03,Income,Salary,100",
                "2024-05-03,Expense,\"Food, fresh\",40",
                "2024-05-09,Expense,Bus,2.5",
            ]
        );
    }

    #[test]
    fn test_export_empty_month_writes_header() {
        let (dir, store) = scratch_store();
        let out = dir.path().join("empty.csv");
        let count = export_month(&store, YearMonth::new(2024, 1).unwrap(), &out).unwrap();
        assert_eq!(count, 0);
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "date,type,category,amount\n"
        );
    }

    #[test]
    fn test_default_path_names_month() {
        let path = default_path(YearMonth::new(2024, 5).unwrap());
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "wallet-watch-2024-05.csv"
        );
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/tmp/x.csv"), PathBuf::from("/tmp/x.csv"));
        assert!(expand_home("~/x.csv").ends_with("x.csv"));
        assert!(!expand_home("~/x.csv").starts_with("~"));
    }
}
