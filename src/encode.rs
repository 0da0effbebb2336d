//! Fixed-width transaction records.
//!
//! Layout of one 80-character data line:
//!
//! | cols  | width | field             | fill                          |
//! |-------|-------|-------------------|-------------------------------|
//! | 1-9   | 9     | registrant id     | configured constant           |
//! | 10    | 1     | transaction code  | `S` / `P` / `I` / as found    |
//! | 11    | 1     | action indicator  | blank                         |
//! | 12-22 | 11    | NDC               | left, space pad, cut right    |
//! | 23-30 | 8     | quantity          | right, zero pad, keep right 8 |
//! | 31    | 1     | unit              | blank                         |
//! | 32-40 | 9     | associated id     | left, space pad, cut right    |
//! | 41-49 | 9     | order form number | blank                         |
//! | 50-57 | 8     | transaction date  | `MMDDYYYY` or blank           |
//! | 58-65 | 8     | correction number | blank                         |
//! | 66-69 | 4     | strength          | blank                         |
//! | 70-79 | 10    | transaction id    | right, zero pad               |
//! | 80    | 1     | filler            | blank                         |

use crate::config::ReportConfig;
use crate::normalize::CanonicalFields;
use crate::text::{blanks, fit_left, fit_right};
use std::fmt;

pub const REGISTRANT_WIDTH: usize = 9;
pub const NDC_WIDTH: usize = 11;
pub const QUANTITY_WIDTH: usize = 8;
pub const ASSOCIATED_ID_WIDTH: usize = 9;
pub const ORDER_FORM_WIDTH: usize = 9;
pub const DATE_WIDTH: usize = 8;
pub const CORRECTION_WIDTH: usize = 8;
pub const STRENGTH_WIDTH: usize = 4;
pub const TRANSACTION_ID_WIDTH: usize = 10;
pub const LINE_WIDTH: usize = 80;

/// Column headers of the structured export, in order.
pub const STRUCTURED_COLUMNS: [&str; 12] = [
    "Registrant Id",
    "Transaction Code",
    "Action Indicator",
    "NDC Number (no dashes)",
    "Quantity",
    "Unit",
    "Associated Registration Number",
    "Order Form Number",
    "Transaction Date",
    "Correction Number",
    "Strength",
    "Transaction Number",
];

/// One output line. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedLine(String);

impl EncodedLine {
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for EncodedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn quantity_field(quantity: &str) -> String {
    fit_right(quantity, QUANTITY_WIDTH, '0')
}

pub fn transaction_id_field(id: usize) -> String {
    fit_right(&id.to_string(), TRANSACTION_ID_WIDTH, '0')
}

#[derive(Debug, Clone, Copy)]
pub struct RecordEncoder<'a> {
    config: &'a ReportConfig,
}

impl<'a> RecordEncoder<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    fn registrant(&self) -> String {
        fit_left(&self.config.registrant_id, REGISTRANT_WIDTH, ' ')
    }

    /// Encodes one row. Never fails: oversized values are cut, short ones padded.
    pub fn encode_line(&self, fields: &CanonicalFields) -> EncodedLine {
        let mut line = String::with_capacity(LINE_WIDTH);
        line.push_str(&self.registrant());
        line.push(fields.transaction_code.as_char());
        line.push(' ');
        line.push_str(&fit_left(&fields.ndc, NDC_WIDTH, ' '));
        line.push_str(&quantity_field(&fields.quantity));
        line.push(' ');
        line.push_str(&fit_left(&fields.associated_id, ASSOCIATED_ID_WIDTH, ' '));
        line.push_str(&blanks(ORDER_FORM_WIDTH));
        line.push_str(&fields.transaction_date.to_field());
        line.push_str(&blanks(CORRECTION_WIDTH));
        line.push_str(&blanks(STRENGTH_WIDTH));
        line.push_str(&transaction_id_field(fields.transaction_id()));
        line.push(' ');
        EncodedLine(line)
    }

    /// The same record as spreadsheet cells. Reserved fields are empty and
    /// values are unpadded, except quantity and id which match the text line.
    pub fn structured_row(&self, fields: &CanonicalFields) -> StructuredRow {
        StructuredRow {
            registrant_id: self.config.registrant_id.clone(),
            transaction_code: fields.transaction_code.to_string(),
            ndc: fields.ndc.clone(),
            quantity: quantity_field(&fields.quantity),
            associated_id: fields.associated_id.clone(),
            transaction_date: fields.transaction_date.known().map(|d| d.format("%m%d%Y").to_string()).unwrap_or_default(),
            transaction_number: transaction_id_field(fields.transaction_id()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredRow {
    pub registrant_id: String,
    pub transaction_code: String,
    pub ndc: String,
    pub quantity: String,
    pub associated_id: String,
    pub transaction_date: String,
    pub transaction_number: String,
}

impl StructuredRow {
    /// Cells in [`STRUCTURED_COLUMNS`] order.
    pub fn cells(&self) -> [&str; 12] {
        [
            self.registrant_id.as_str(),
            self.transaction_code.as_str(),
            "",
            self.ndc.as_str(),
            self.quantity.as_str(),
            "",
            self.associated_id.as_str(),
            "",
            self.transaction_date.as_str(),
            "",
            "",
            self.transaction_number.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::TransactionDate;
    use crate::normalize::TransactionCode;
    use chrono::NaiveDate;

    fn fields(idx: usize, ndc: &str, qty: &str, dea: &str, date: TransactionDate) -> CanonicalFields {
        CanonicalFields {
            sequence_index: idx,
            transaction_code: TransactionCode::Sale,
            ndc: ndc.to_string(),
            quantity: qty.to_string(),
            associated_id: dea.to_string(),
            transaction_date: date,
        }
    }

    fn jan31() -> TransactionDate {
        TransactionDate::Known(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
    }

    #[test]
    fn encodes_exact_layout() {
        let cfg = ReportConfig::default();
        let line = RecordEncoder::new(&cfg).encode_line(&fields(0, "123456789", "5", "AB1234567", jan31()));
        let expected = format!(
            "RY0658940S {}00000005 AB1234567{}01312024{}{}0000000001 ",
            "123456789  ",
            " ".repeat(9),
            " ".repeat(8),
            " ".repeat(4)
        );
        assert_eq!(line.as_str(), expected);
        assert_eq!(line.as_str().chars().count(), LINE_WIDTH);
    }

    #[test]
    fn field_slices() {
        let cfg = ReportConfig::default();
        let line = RecordEncoder::new(&cfg).encode_line(&fields(41, "1234567890123", "123456789", "TOOLONGID99", TransactionDate::Unknown));
        let s = line.as_str();
        assert_eq!(s.len(), LINE_WIDTH);
        assert_eq!(&s[11..22], "12345678901");
        assert_eq!(&s[22..30], "23456789");
        assert_eq!(&s[31..40], "TOOLONGID");
        assert_eq!(&s[49..57], "        ");
        assert_eq!(&s[69..79], "0000000042");
        assert_eq!(&s[79..], " ");
    }

    #[test]
    fn every_line_is_eighty_wide() {
        let cfg = ReportConfig::default();
        let enc = RecordEncoder::new(&cfg);
        for (i, (ndc, qty, dea)) in [("", "", ""), ("1-2-3", "abc", "X"), ("00000000000000000", "999999999999", "ABCDEFGHIJKL")]
            .into_iter()
            .enumerate()
        {
            let line = enc.encode_line(&fields(i, ndc, qty, dea, TransactionDate::Unknown));
            assert_eq!(line.as_str().chars().count(), LINE_WIDTH, "row {i}");
        }
    }

    #[test]
    fn structured_row_mirrors_the_line() {
        let cfg = ReportConfig::default();
        let f = fields(0, "123456789", "5", "AB1234567", jan31());
        let row = RecordEncoder::new(&cfg).structured_row(&f);
        assert_eq!(
            row.cells(),
            ["RY0658940", "S", "", "123456789", "00000005", "", "AB1234567", "", "01312024", "", "", "0000000001"]
        );
        let unknown = RecordEncoder::new(&cfg).structured_row(&fields(0, "", "", "", TransactionDate::Unknown));
        assert_eq!(unknown.transaction_date, "");
    }
}
