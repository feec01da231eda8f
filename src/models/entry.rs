use anyhow::{bail, Context, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Amounts must stay below this magnitude.
const AMOUNT_LIMIT: i64 = 1_000_000_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" | "i" => Some(Self::Income),
            "expense" | "e" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl Entry {
    pub fn new(kind: EntryKind, category: String, amount: Decimal) -> Self {
        Self {
            kind,
            category,
            amount,
        }
    }
}

/// Parse user-typed amount text. Thousands separators are allowed.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let raw = raw.trim();
    let amount = Decimal::from_str(&raw.replace(',', ""))
        .with_context(|| format!("'{raw}' is not a number"))?;
    check_amount(amount)
}

/// Amounts are written to the data file as JSON numbers, so only values that
/// come back unchanged through an `f64` are accepted.
pub fn check_amount(amount: Decimal) -> Result<Decimal> {
    if amount.abs() >= Decimal::from(AMOUNT_LIMIT) {
        bail!("Amount must be below 1,000,000,000,000,000");
    }
    let stored = amount
        .to_f64()
        .and_then(|f| Decimal::from_str(&f.to_string()).ok());
    if stored != Some(amount) {
        bail!("Amount {amount} has too many digits to store exactly");
    }
    Ok(amount)
}
