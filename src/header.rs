use crate::config::ReportConfig;
use crate::date::TransactionDate;
use crate::encode::REGISTRANT_WIDTH;
use crate::text::{blanks, fit_left};
use std::fmt;

/// Width of the control record. Shorter than a data line.
pub const HEADER_WIDTH: usize = 28;
const CENTRAL_REPORTER_WIDTH: usize = 9;

/// First line of the report: registrant, `*`, last transaction date,
/// frequency, blank central-reporter id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlHeader {
    registrant_id: String,
    last_date: TransactionDate,
    frequency: char,
}

impl ControlHeader {
    pub fn last_date(&self) -> TransactionDate {
        self.last_date
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity(HEADER_WIDTH);
        out.push_str(&fit_left(&self.registrant_id, REGISTRANT_WIDTH, ' '));
        out.push('*');
        out.push_str(&self.last_date.to_field());
        out.push(self.frequency);
        out.push_str(&blanks(CENTRAL_REPORTER_WIDTH));
        out
    }
}

impl fmt::Display for ControlHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Builds the header from every row's date; unknown dates never win.
pub fn build_header<I>(dates: I, config: &ReportConfig) -> ControlHeader
where
    I: IntoIterator<Item = TransactionDate>,
{
    let last_date = dates
        .into_iter()
        .filter_map(TransactionDate::known)
        .max()
        .map_or(TransactionDate::Unknown, TransactionDate::Known);
    ControlHeader {
        registrant_id: config.registrant_id.clone(),
        last_date,
        frequency: config.report_frequency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn known(y: i32, m: u32, d: u32) -> TransactionDate {
        TransactionDate::Known(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn takes_the_latest_known_date() {
        let cfg = ReportConfig::default();
        let h = build_header(
            [known(2024, 3, 2), TransactionDate::Unknown, known(2024, 3, 29), known(2023, 12, 31)],
            &cfg,
        );
        assert_eq!(h.render(), "RY0658940*03292024M         ");
        assert_eq!(h.render().len(), HEADER_WIDTH);
    }

    #[test]
    fn no_known_date_leaves_the_field_blank() {
        let cfg = ReportConfig::default();
        let h = build_header([TransactionDate::Unknown, TransactionDate::Unknown], &cfg);
        assert_eq!(h.last_date(), TransactionDate::Unknown);
        assert_eq!(h.render(), format!("RY0658940*{}M{}", " ".repeat(8), " ".repeat(9)));

        let empty = build_header(std::iter::empty(), &cfg);
        assert_eq!(empty.render().len(), HEADER_WIDTH);
    }
}
