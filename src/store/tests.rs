#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::models::{Entry, EntryKind, YearMonth};

fn scratch() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("expenses.json");
    (dir, path)
}

#[test]
fn test_open_creates_directory_and_empty_object() {
    let (_dir, path) = scratch();
    let store = Store::open(&path).unwrap();
    assert!(path.exists());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_open_is_idempotent_and_keeps_data() {
    let (_dir, path) = scratch();
    let store = Store::open(&path).unwrap();
    let may = YearMonth::new(2024, 5).unwrap();
    store.update(|doc| doc.set_budget(&may, dec!(500))).unwrap();

    let reopened = Store::open(&path).unwrap();
    let doc = reopened.load().unwrap();
    assert_eq!(doc.month(&may).unwrap().budget, dec!(500));
}

#[test]
fn test_load_rejects_invalid_json() {
    let (_dir, path) = scratch();
    let store = Store::open(&path).unwrap();
    std::fs::write(&path, "{not json").unwrap();
    let err = store.load().unwrap_err();
    assert!(format!("{err:#}").contains("not valid JSON"));
}

#[test]
fn test_load_missing_file_fails() {
    let (_dir, path) = scratch();
    let store = Store::open(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(store.load().is_err());
}

#[test]
fn test_save_uses_four_space_indent() {
    let (_dir, path) = scratch();
    let store = Store::open(&path).unwrap();
    let may = YearMonth::new(2024, 5).unwrap();
    store.update(|doc| doc.set_budget(&may, dec!(200))).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n    \"2024-05\": {\n        \"budget\": 200"));
    assert!(text.ends_with("}\n"));
}

#[test]
fn test_save_leaves_no_temp_files() {
    let (_dir, path) = scratch();
    let store = Store::open(&path).unwrap();
    let date = YearMonth::new(2024, 5).unwrap().day(3).unwrap();
    store
        .update(|doc| {
            doc.push_entry(&date, Entry::new(EntryKind::Expense, "Food".into(), dec!(9)))
        })
        .unwrap();

    let names: Vec<_> = std::fs::read_dir(path.parent().unwrap())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("expenses.json")]);
}

#[test]
fn test_round_trip_is_stable() {
    let (_dir, path) = scratch();
    let store = Store::open(&path).unwrap();
    let date = YearMonth::new(2024, 5).unwrap().day(3).unwrap();
    store
        .update(|doc| {
            doc.set_budget(&date.month(), dec!(1000));
            doc.push_entry(&date, Entry::new(EntryKind::Income, "Pay".into(), dec!(100)));
            doc.push_entry(&date, Entry::new(EntryKind::Expense, "Tea".into(), dec!(2.5)));
        })
        .unwrap();

    let first_text = std::fs::read_to_string(&path).unwrap();
    let doc = store.load().unwrap();
    store.save(&doc).unwrap();
    let second_text = std::fs::read_to_string(&path).unwrap();

    assert_eq!(first_text, second_text);
    assert_eq!(store.load().unwrap(), doc);
}

#[test]
fn test_sequential_updates_keep_both_entries() {
    let (_dir, path) = scratch();
    let store = Store::open(&path).unwrap();
    let date = YearMonth::new(2024, 5).unwrap().day(3).unwrap();
    store
        .update(|doc| doc.push_entry(&date, Entry::new(EntryKind::Income, "A".into(), dec!(1))))
        .unwrap();
    store
        .update(|doc| doc.push_entry(&date, Entry::new(EntryKind::Expense, "B".into(), dec!(2))))
        .unwrap();

    let doc = store.load().unwrap();
    let entries = doc.entries_on(&date);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].category, "A");
    assert_eq!(entries[1].category, "B");
}

#[test]
fn test_amounts_at_the_accepted_limits_reload_exactly() {
    let (_dir, path) = scratch();
    let store = Store::open(&path).unwrap();
    let may = YearMonth::new(2024, 5).unwrap();
    let date = may.day(3).unwrap();
    let amounts = [
        dec!(999999999999.99),
        dec!(-999999999999.99),
        dec!(0.01),
        dec!(0.125),
        dec!(123456789.25),
    ];
    for amount in amounts {
        crate::models::check_amount(amount).unwrap();
    }
    store
        .update(|doc| {
            doc.set_budget(&may, dec!(999999999999999));
            for amount in amounts {
                doc.push_entry(&date, Entry::new(EntryKind::Expense, "Big".into(), amount));
            }
        })
        .unwrap();

    let doc = store.load().unwrap();
    assert_eq!(doc.month(&may).unwrap().budget, dec!(999999999999999));
    let loaded: Vec<_> = doc.entries_on(&date).iter().map(|e| e.amount).collect();
    assert_eq!(loaded, amounts);
    assert!(doc.month(&may).unwrap().summary().is_ok());
}
