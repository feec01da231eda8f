mod date;
mod entry;
mod record;

pub use date::{EntryDate, YearMonth};
pub use entry::{check_amount, parse_amount, Entry, EntryKind};
pub use record::{Document, MonthRecord, Summary};
