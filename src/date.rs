use chrono::{Datelike, NaiveDate, NaiveTime};
use std::fmt;

/// A transaction date, or the marker for a value that did not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransactionDate {
    Unknown,
    Known(NaiveDate),
}

impl TransactionDate {
    pub fn parse(s: &str) -> Self {
        parse_date_flex(s).map_or(TransactionDate::Unknown, TransactionDate::Known)
    }

    pub fn known(self) -> Option<NaiveDate> {
        match self {
            TransactionDate::Known(d) => Some(d),
            TransactionDate::Unknown => None,
        }
    }

    /// `MMDDYYYY`, or eight spaces when unknown.
    pub fn to_field(self) -> String {
        match self {
            TransactionDate::Known(d) => d.format("%m%d%Y").to_string(),
            TransactionDate::Unknown => " ".repeat(8),
        }
    }
}

impl fmt::Display for TransactionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_field())
    }
}

const YEAR_FIRST: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y%m%d"];
// `%y` before `%Y`: a bare `%Y` reads `24` as the year 24.
const MONTH_FIRST: &[&str] = &["%m/%d/%y", "%m-%d-%y", "%m/%d/%Y", "%m-%d-%Y"];
const TIMES: &[&str] = &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

/// Accepts year-first (`2024-03-05`, `2024/03/05`, `2024.03.05`,
/// `20240305`) and US month-first (`03/05/2024`, `03-05-2024`, `3/5/24`)
/// dates, optionally followed by a time after a space or `T`, which is
/// discarded. Years outside 1000..=9999 do not fit `MMDDYYYY` and are
/// rejected.
pub fn parse_date_flex(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() { return None; }
    let (date, time) = match s.split_once([' ', 'T']) {
        Some((d, t)) => (d, Some(t.trim())),
        None => (s, None),
    };
    if let Some(t) = time {
        if !TIMES.iter().any(|f| NaiveTime::parse_from_str(t, f).is_ok()) { return None; }
    }
    // A bare `%Y` also accepts short or signed years, so the leading digits pick the family.
    let year_first = date.len() >= 4 && date.as_bytes()[..4].iter().all(u8::is_ascii_digit);
    let formats = if year_first { YEAR_FIRST } else { MONTH_FIRST };
    formats
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(date, f).ok())
        .filter(|d| (1000..=9999).contains(&d.year()))
}
