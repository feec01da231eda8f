use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate, Weekday};

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// A calendar month. Its key is `YYYY-MM`, zero-padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            anyhow::bail!("Year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}");
        }
        if !(1..=12).contains(&month) {
            anyhow::bail!("Month must be between 1 and 12, got {month}");
        }
        Ok(Self { year, month })
    }

    /// Parse the raw contents of the year and month input fields.
    pub fn from_fields(year: &str, month: &str) -> Result<Self> {
        let year: i32 = year
            .trim()
            .parse()
            .with_context(|| format!("Invalid year: '{}'", year.trim()))?;
        let month: u32 = month
            .trim()
            .parse()
            .with_context(|| format!("Invalid month: '{}'", month.trim()))?;
        Self::new(year, month)
    }

    /// Parse a month key. Accepts the canonical `2024-05` as well as the
    /// legacy unpadded `2024-5`.
    pub fn parse_key(key: &str) -> Option<Self> {
        let (year, month) = key.split_once('-')?;
        if year.is_empty() || month.is_empty() || month.len() > 2 {
            return None;
        }
        if !year.bytes().all(|b| b.is_ascii_digit()) || !month.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        Self::new(year.parse().ok()?, month.parse().ok()?).ok()
    }

    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    pub fn first_day(&self) -> NaiveDate {
        // year and month are range-checked on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn first_weekday(&self) -> Weekday {
        self.first_day().weekday()
    }

    pub fn days_in_month(&self) -> u32 {
        let (year, month) = match self.month {
            12 => (self.year + 1, 1),
            m => (self.year, m + 1),
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.pred_opt())
            .map_or(31, |last| last.day())
    }

    /// The following month. Saturates at December 9999.
    pub fn next(&self) -> Self {
        match (self.year, self.month) {
            (MAX_YEAR, 12) => *self,
            (y, 12) => Self { year: y + 1, month: 1 },
            (y, m) => Self { year: y, month: m + 1 },
        }
    }

    /// The preceding month. Saturates at January of year 1.
    pub fn prev(&self) -> Self {
        match (self.year, self.month) {
            (MIN_YEAR, 1) => *self,
            (y, 1) => Self { year: y - 1, month: 12 },
            (y, m) => Self { year: y, month: m - 1 },
        }
    }

    pub fn day(&self, day: u32) -> Result<EntryDate> {
        if day == 0 || day > self.days_in_month() {
            anyhow::bail!("{} has no day {day}", self.key());
        }
        Ok(EntryDate { month: *self, day })
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One calendar day. Its key is `YYYY-MM-DD`, and the first seven characters
/// are the key of its month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryDate {
    month: YearMonth,
    day: u32,
}

impl EntryDate {
    pub fn parse_key(key: &str) -> Option<Self> {
        let (month, day) = key.rsplit_once('-')?;
        if day.len() != 2 || !day.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        YearMonth::parse_key(month)?.day(day.parse().ok()?).ok()
    }

    pub fn today() -> Self {
        let today = Local::now().date_naive();
        Self {
            month: YearMonth {
                year: today.year(),
                month: today.month(),
            },
            day: today.day(),
        }
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn key(&self) -> String {
        format!("{}-{:02}", self.month.key(), self.day)
    }
}

impl std::fmt::Display for EntryDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
