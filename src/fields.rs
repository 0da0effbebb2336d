//! Logical fields and how they are located in a source table.
//!
//! A table is addressed either by header label or by fixed ordinal. The
//! choice is made once per table and resolved into a [`ColumnIndex`]
//! before any row is normalized.

use crate::error::{ConvertError, Result};
use crate::text::clean_text;
use serde::Deserialize;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    TransactionCode,
    Ndc,
    Quantity,
    AssociatedId,
    TransactionDate,
}

impl Field {
    /// Fields whose locator must exist; the transaction code may be inferred instead.
    pub const REQUIRED: [Field; 4] = [Field::Ndc, Field::Quantity, Field::AssociatedId, Field::TransactionDate];

    pub fn name(self) -> &'static str {
        match self {
            Field::TransactionCode => "transaction_code",
            Field::Ndc => "ndc",
            Field::Quantity => "quantity",
            Field::AssociatedId => "associated_id",
            Field::TransactionDate => "transaction_date",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a field was looked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Label(String),
    Position(usize),
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Label(l) => write!(f, "column label \"{l}\""),
            Locator::Position(p) => write!(f, "column position {p}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnLabels {
    pub transaction_code: String,
    pub ndc: String,
    pub quantity: String,
    pub associated_id: String,
    pub transaction_date: String,
}

impl Default for ColumnLabels {
    fn default() -> Self {
        Self {
            transaction_code: "TRANSACTION CODE".to_string(),
            ndc: "NDC".to_string(),
            quantity: "QUANTITY".to_string(),
            associated_id: "DEA".to_string(),
            transaction_date: "DATE".to_string(),
        }
    }
}

impl ColumnLabels {
    pub fn label(&self, field: Field) -> &str {
        match field {
            Field::TransactionCode => &self.transaction_code,
            Field::Ndc => &self.ndc,
            Field::Quantity => &self.quantity,
            Field::AssociatedId => &self.associated_id,
            Field::TransactionDate => &self.transaction_date,
        }
    }

    fn all(&self) -> [&str; 5] {
        [&self.transaction_code, &self.ndc, &self.quantity, &self.associated_id, &self.transaction_date]
    }

    /// True when any cell of `row` is one of the configured labels.
    pub fn looks_like_header(&self, row: &[String]) -> bool {
        row.iter().any(|cell| {
            let c = clean_text(cell);
            self.all().iter().any(|l| c.eq_ignore_ascii_case(l.trim()))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnPositions {
    pub transaction_code: usize,
    pub ndc: usize,
    pub quantity: usize,
    pub associated_id: usize,
    pub transaction_date: usize,
}

impl Default for ColumnPositions {
    fn default() -> Self {
        Self { transaction_code: 1, ndc: 3, quantity: 4, associated_id: 6, transaction_date: 8 }
    }
}

impl ColumnPositions {
    pub fn position(&self, field: Field) -> usize {
        match field {
            Field::TransactionCode => self.transaction_code,
            Field::Ndc => self.ndc,
            Field::Quantity => self.quantity,
            Field::AssociatedId => self.associated_id,
            Field::TransactionDate => self.transaction_date,
        }
    }
}

/// How the table layout is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Named when the first row carries a known label, positional otherwise.
    #[default]
    Auto,
    Named,
    Positional,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldResolutionMode {
    ByName(ColumnLabels),
    ByPosition(ColumnPositions),
}

impl FieldResolutionMode {
    /// Picks the mode for a table from its shape.
    pub fn detect(layout: Layout, rows: &[Vec<String>], labels: &ColumnLabels, positions: ColumnPositions) -> Self {
        let named = match layout {
            Layout::Named => true,
            Layout::Positional => false,
            Layout::Auto => rows.first().is_some_and(|r| labels.looks_like_header(r)),
        };
        if named {
            FieldResolutionMode::ByName(labels.clone())
        } else {
            FieldResolutionMode::ByPosition(positions)
        }
    }

    /// Resolves every locator against the table, failing on the first missing one.
    pub fn resolve(&self, rows: &[Vec<String>]) -> Result<ColumnIndex> {
        let index = match self {
            FieldResolutionMode::ByName(labels) => {
                let header: Vec<String> = rows.first().map(|r| r.iter().map(|c| clean_text(c)).collect()).unwrap_or_default();
                let find = |field: Field| {
                    let label = labels.label(field).trim();
                    header.iter().position(|h| h.eq_ignore_ascii_case(label))
                };
                let require = |field: Field| {
                    find(field).ok_or_else(|| ConvertError::FieldResolution {
                        field,
                        locator: Locator::Label(labels.label(field).to_string()),
                    })
                };
                ColumnIndex {
                    transaction_code: find(Field::TransactionCode),
                    ndc: require(Field::Ndc)?,
                    quantity: require(Field::Quantity)?,
                    associated_id: require(Field::AssociatedId)?,
                    transaction_date: require(Field::TransactionDate)?,
                    header_rows: 1,
                }
            }
            FieldResolutionMode::ByPosition(positions) => {
                let width = rows.iter().map(Vec::len).max().unwrap_or(0);
                if !rows.is_empty() {
                    for field in Field::REQUIRED {
                        let p = positions.position(field);
                        if p >= width {
                            return Err(ConvertError::FieldResolution { field, locator: Locator::Position(p) });
                        }
                    }
                }
                ColumnIndex {
                    transaction_code: Some(positions.transaction_code),
                    ndc: positions.ndc,
                    quantity: positions.quantity,
                    associated_id: positions.associated_id,
                    transaction_date: positions.transaction_date,
                    header_rows: 0,
                }
            }
        };
        debug!(?index, "resolved columns");
        Ok(index)
    }
}

/// Column ordinals of one table. `transaction_code` is `None` when the
/// code has to be inferred from the file label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
    pub transaction_code: Option<usize>,
    pub ndc: usize,
    pub quantity: usize,
    pub associated_id: usize,
    pub transaction_date: usize,
    /// Leading rows that are not data.
    pub header_rows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn auto_picks_named_when_first_row_has_a_label() {
        let rows = vec![row(&[" ndc\n", "QUANTITY"]), row(&["1", "2"])];
        let mode = FieldResolutionMode::detect(Layout::Auto, &rows, &ColumnLabels::default(), ColumnPositions::default());
        assert!(matches!(mode, FieldResolutionMode::ByName(_)));

        let rows = vec![row(&["x", "S", "", "123-45"])];
        let mode = FieldResolutionMode::detect(Layout::Auto, &rows, &ColumnLabels::default(), ColumnPositions::default());
        assert_eq!(mode, FieldResolutionMode::ByPosition(ColumnPositions::default()));
    }

    #[test]
    fn by_name_resolves_case_insensitively_and_code_is_optional() {
        let rows = vec![row(&["Date", "dea", "Ndc", "Quantity"])];
        let idx = FieldResolutionMode::ByName(ColumnLabels::default()).resolve(&rows).unwrap();
        assert_eq!(idx.transaction_date, 0);
        assert_eq!(idx.associated_id, 1);
        assert_eq!(idx.ndc, 2);
        assert_eq!(idx.quantity, 3);
        assert_eq!(idx.transaction_code, None);
        assert_eq!(idx.header_rows, 1);
    }

    #[test]
    fn by_name_missing_label_is_a_resolution_error() {
        let rows = vec![row(&["NDC", "QUANTITY", "DATE"])];
        let err = FieldResolutionMode::ByName(ColumnLabels::default()).resolve(&rows).unwrap_err();
        match err {
            ConvertError::FieldResolution { field, locator } => {
                assert_eq!(field, Field::AssociatedId);
                assert_eq!(locator, Locator::Label("DEA".into()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn by_position_requires_the_widest_row_to_reach_the_date() {
        let narrow = vec![row(&["a", "S", "b", "123", "5", "c", "AB1234567"])];
        let err = FieldResolutionMode::ByPosition(ColumnPositions::default()).resolve(&narrow).unwrap_err();
        assert!(matches!(err, ConvertError::FieldResolution { field: Field::TransactionDate, locator: Locator::Position(8) }));

        let wide = vec![row(&["a"]), row(&["a", "P", "b", "123", "5", "c", "AB1234567", "d", "2024-01-31"])];
        let idx = FieldResolutionMode::ByPosition(ColumnPositions::default()).resolve(&wide).unwrap();
        assert_eq!(idx.transaction_code, Some(1));
        assert_eq!(idx.header_rows, 0);
    }
}
