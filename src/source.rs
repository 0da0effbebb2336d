//! Loading the source table from a workbook or CSV file.

use crate::convert::SourceTable;
use crate::error::{ConvertError, Result};
use calamine::{Reader, open_workbook_auto};
use csv::ReaderBuilder;
use std::{fs::File, path::Path};
use tracing::debug;

fn cell_to_string<T: calamine::DataType>(cell: &T) -> String {
    // Only cells typed as dates render as dates; plain numbers stay numbers.
    if cell.is_datetime() || cell.is_datetime_iso() {
        if let Some(dt) = cell.as_date() { return dt.format("%Y-%m-%d").to_string(); }
    }
    if let Some(s) = cell.get_string() { return s.to_string(); }
    if let Some(i) = cell.get_int() { return i.to_string(); }
    if let Some(f) = cell.get_float() {
        if f.fract() == 0.0 && f.abs() < 1e15 { return format!("{}", f as i64); }
        return f.to_string();
    }
    if let Some(b) = cell.get_bool() { return b.to_string(); }
    String::new()
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|v| v.trim().is_empty())
}

fn load_workbook(path: &Path, sheet: &str) -> Result<SourceTable> {
    let mut wb = open_workbook_auto(path).map_err(|e| ConvertError::unreadable(path.display().to_string(), e))?;
    let names = wb.sheet_names().to_owned();
    if !names.iter().any(|n| n == sheet) {
        return Err(ConvertError::unreadable(
            path.display().to_string(),
            format!("no sheet named {sheet:?} (sheets: {})", names.join(", ")),
        ));
    }
    let range = wb
        .worksheet_range(sheet)
        .map_err(|e| ConvertError::unreadable(path.display().to_string(), e))?;

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|r| r.iter().map(cell_to_string).collect::<Vec<_>>())
        .filter(|r| !is_blank(r))
        .collect();
    debug!(sheet, rows = rows.len(), "loaded worksheet");
    Ok(SourceTable::new(rows))
}

fn load_csv(path: &Path) -> Result<SourceTable> {
    let file = File::open(path).map_err(|e| ConvertError::unreadable(path.display().to_string(), e))?;
    let mut rdr = ReaderBuilder::new().flexible(true).has_headers(false).from_reader(file);
    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec.map_err(|e| ConvertError::unreadable(path.display().to_string(), e))?;
        let row: Vec<String> = rec.iter().map(str::to_string).collect();
        if is_blank(&row) { continue; }
        rows.push(row);
    }
    debug!(rows = rows.len(), "loaded csv");
    Ok(SourceTable::new(rows))
}

/// Loads the raw grid. Spreadsheets read `sheet`; CSV files have a single
/// table. Completely blank rows are dropped.
pub fn load_table(path: &Path, sheet: &str) -> Result<SourceTable> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(path, sheet),
        "csv" => load_csv(path),
        _ => Err(ConvertError::unreadable(path.display().to_string(), format!("unsupported file type {ext:?}"))),
    }
}
