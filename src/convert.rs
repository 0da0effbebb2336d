//! Whole-table conversion: resolve columns, normalize, build the header,
//! encode in row order.

use crate::config::ReportConfig;
use crate::encode::{EncodedLine, RecordEncoder, StructuredRow};
use crate::error::Result;
use crate::fields::{FieldResolutionMode, Layout};
use crate::header::{ControlHeader, build_header};
use crate::normalize::{CanonicalFields, InputRow, TransactionCode, normalize};
use tracing::{debug, info, warn};

/// Raw grid as loaded from the source; the first row may be a header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTable {
    pub rows: Vec<Vec<String>>,
}

impl SourceTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub header: ControlHeader,
    pub lines: Vec<EncodedLine>,
    pub structured: Vec<StructuredRow>,
}

impl Conversion {
    /// Header then one line per row, each terminated by `\n`.
    pub fn to_text(&self) -> String {
        let mut out = self.header.render();
        out.push('\n');
        for line in &self.lines {
            out.push_str(line.as_str());
            out.push('\n');
        }
        out
    }
}

/// Converts a table. `file_label` supplies the transaction code when the
/// table has no code column of its own.
pub fn convert(table: &SourceTable, file_label: &str, layout: Layout, config: &ReportConfig) -> Result<Conversion> {
    let mode = FieldResolutionMode::detect(layout, &table.rows, &config.columns, config.positions);
    let columns = mode.resolve(&table.rows)?;
    debug!(?mode, "layout selected");

    let label_code = TransactionCode::from_label(file_label);
    let fields: Vec<CanonicalFields> = table
        .rows
        .iter()
        .skip(columns.header_rows)
        .enumerate()
        .map(|(sequence_index, cells)| InputRow { sequence_index, cells: cells.clone() })
        .map(|row| normalize(&row, &columns, label_code))
        .collect();

    let header = build_header(fields.iter().map(|f| f.transaction_date), config);
    let unknown_dates = fields.iter().filter(|f| f.transaction_date.known().is_none()).count();
    if fields.is_empty() {
        warn!("table has no data rows");
    } else if unknown_dates > 0 {
        warn!(rows = unknown_dates, "rows with unparsable transaction dates encoded blank");
    }

    let encoder = RecordEncoder::new(config);
    let lines = fields.iter().map(|f| encoder.encode_line(f)).collect();
    let structured = fields.iter().map(|f| encoder.structured_row(f)).collect();
    info!(rows = fields.len(), last_date = %header.last_date(), code = %label_code, "converted table");

    Ok(Conversion { header, lines, structured })
}
