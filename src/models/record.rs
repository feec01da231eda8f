use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Entry, EntryDate, EntryKind, YearMonth};

/// The budget and every transaction of one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthRecord {
    #[serde(with = "rust_decimal::serde::float", default)]
    pub budget: Decimal,
    /// Keyed by `YYYY-MM-DD`. Each list keeps insertion order.
    #[serde(default)]
    pub transactions: BTreeMap<String, Vec<Entry>>,
}

impl MonthRecord {
    pub fn entries_on(&self, date: &EntryDate) -> &[Entry] {
        self.transactions
            .get(&date.key())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.transactions.values().flatten()
    }

    pub fn total(&self, kind: EntryKind) -> Result<Decimal> {
        self.entries()
            .filter(|e| e.kind == kind)
            .try_fold(Decimal::ZERO, |sum, e| sum.checked_add(e.amount))
            .ok_or_else(|| anyhow!("{kind} total is too large"))
    }

    pub fn summary(&self) -> Result<Summary> {
        let income = self.total(EntryKind::Income)?;
        let expense = self.total(EntryKind::Expense)?;
        let savings = income
            .checked_sub(expense)
            .ok_or_else(|| anyhow!("Savings are out of range"))?;
        let balance = self
            .budget
            .checked_sub(expense)
            .ok_or_else(|| anyhow!("Balance is out of range"))?;
        Ok(Summary {
            budget: self.budget,
            income,
            expense,
            savings,
            balance,
        })
    }

    /// Fold a second record for the same month into this one. Entries are
    /// appended after ours; its budget only applies when ours is unset.
    fn absorb(&mut self, other: MonthRecord) {
        if self.budget.is_zero() {
            self.budget = other.budget;
        }
        for (date, entries) in other.transactions {
            self.transactions.entry(date).or_default().extend(entries);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub budget: Decimal,
    pub income: Decimal,
    pub expense: Decimal,
    pub savings: Decimal,
    pub balance: Decimal,
}

/// The whole persisted file: month key to month record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, MonthRecord>",
    into = "BTreeMap<String, MonthRecord>"
)]
pub struct Document {
    months: BTreeMap<String, MonthRecord>,
}

impl From<BTreeMap<String, MonthRecord>> for Document {
    fn from(raw: BTreeMap<String, MonthRecord>) -> Self {
        let mut months: BTreeMap<String, MonthRecord> = BTreeMap::new();
        // Canonical keys sort before their unpadded twins ("2024-05" < "2024-5"),
        // so the canonical record is always the one absorbing.
        for (key, record) in raw {
            let key = YearMonth::parse_key(&key).map(|ym| ym.key()).unwrap_or(key);
            match months.get_mut(&key) {
                Some(existing) => existing.absorb(record),
                None => {
                    months.insert(key, record);
                }
            }
        }
        Self { months }
    }
}

impl From<Document> for BTreeMap<String, MonthRecord> {
    fn from(doc: Document) -> Self {
        doc.months
    }
}

impl Document {
    pub fn month(&self, month: &YearMonth) -> Option<&MonthRecord> {
        self.months.get(&month.key())
    }

    /// The record for `month`, created with a zero budget if absent.
    pub fn month_mut(&mut self, month: &YearMonth) -> &mut MonthRecord {
        self.months.entry(month.key()).or_default()
    }

    pub fn entries_on(&self, date: &EntryDate) -> &[Entry] {
        self.month(&date.month())
            .map(|r| r.entries_on(date))
            .unwrap_or(&[])
    }

    pub fn set_budget(&mut self, month: &YearMonth, budget: Decimal) {
        self.month_mut(month).budget = budget;
    }

    pub fn push_entry(&mut self, date: &EntryDate, entry: Entry) {
        self.month_mut(&date.month())
            .transactions
            .entry(date.key())
            .or_default()
            .push(entry);
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}
