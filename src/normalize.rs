//! Row normalization: raw cells in, typed canonical fields out.

use crate::date::TransactionDate;
use crate::fields::ColumnIndex;
use crate::text::clean_text;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransactionCode {
    #[default]
    Sale,
    Purchase,
    Inventory,
    /// Any other letter found in an explicit code column.
    Other(char),
}

impl TransactionCode {
    /// Infers the code from a file label: first of `sale`, `purchase`,
    /// `inventory` found (case-insensitive substring), else `S`.
    pub fn from_label(label: &str) -> Self {
        let l = label.to_lowercase();
        if l.contains("sale") {
            TransactionCode::Sale
        } else if l.contains("purchase") {
            TransactionCode::Purchase
        } else if l.contains("inventory") {
            TransactionCode::Inventory
        } else {
            TransactionCode::default()
        }
    }

    /// Reads an explicit cell value by its first letter, any case; blank
    /// falls back to `S`.
    pub fn from_cell(value: &str) -> Self {
        match value.chars().next().map(|c| c.to_ascii_uppercase()) {
            None => TransactionCode::default(),
            Some('S') => TransactionCode::Sale,
            Some('P') => TransactionCode::Purchase,
            Some('I') => TransactionCode::Inventory,
            Some(c) => TransactionCode::Other(c),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            TransactionCode::Sale => 'S',
            TransactionCode::Purchase => 'P',
            TransactionCode::Inventory => 'I',
            TransactionCode::Other(c) => c,
        }
    }
}

impl fmt::Display for TransactionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One data row of the source table, cells still raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRow {
    /// 0-based position among data rows.
    pub sequence_index: usize,
    pub cells: Vec<String>,
}

impl InputRow {
    /// Cleaned cell text; a cell the row does not reach reads as blank.
    fn cell(&self, idx: usize) -> String {
        self.cells.get(idx).map(|c| clean_text(c)).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalFields {
    pub sequence_index: usize,
    pub transaction_code: TransactionCode,
    /// Dashes removed, not yet padded.
    pub ndc: String,
    /// Text as found; never parsed as a number.
    pub quantity: String,
    pub associated_id: String,
    pub transaction_date: TransactionDate,
}

impl CanonicalFields {
    /// 1-based id, gapless in row order.
    pub fn transaction_id(&self) -> usize {
        self.sequence_index + 1
    }
}

/// Normalizes one row. Total: every locator was checked when `columns`
/// was resolved, and short rows read as blanks.
pub fn normalize(row: &InputRow, columns: &ColumnIndex, label_code: TransactionCode) -> CanonicalFields {
    let transaction_code = match columns.transaction_code {
        Some(idx) => TransactionCode::from_cell(&row.cell(idx)),
        None => label_code,
    };
    CanonicalFields {
        sequence_index: row.sequence_index,
        transaction_code,
        ndc: row.cell(columns.ndc).replace('-', ""),
        quantity: row.cell(columns.quantity),
        associated_id: row.cell(columns.associated_id),
        transaction_date: TransactionDate::parse(&row.cell(columns.transaction_date)),
    }
}
