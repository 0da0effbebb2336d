//! Spreadsheet to fixed-width controlled-substance transaction report.
//!
//! Rows of a sales, purchase or inventory sheet are normalized and encoded
//! as 80-character ARCOS-style records behind a control header carrying the
//! last transaction date of the file. The same records are also available
//! as structured rows for a mirrored spreadsheet.
//!
//! ```no_run
//! use arcos_report::{Layout, ReportConfig, convert, load_table};
//! use std::path::Path;
//!
//! let cfg = ReportConfig::default();
//! let table = load_table(Path::new("March sales.xlsx"), &cfg.sheet_name)?;
//! let report = convert(&table, "March sales.xlsx", Layout::Auto, &cfg)?;
//! print!("{}", report.to_text());
//! # Ok::<(), arcos_report::ConvertError>(())
//! ```

pub mod config;
pub mod convert;
pub mod date;
pub mod encode;
pub mod error;
pub mod fields;
pub mod header;
pub mod normalize;
pub mod source;
pub mod text;

pub use config::{ReportConfig, load_config};
pub use convert::{Conversion, SourceTable, convert};
pub use date::TransactionDate;
pub use encode::{EncodedLine, RecordEncoder, STRUCTURED_COLUMNS, StructuredRow};
pub use error::{ConvertError, Result};
pub use fields::{ColumnLabels, ColumnPositions, Field, FieldResolutionMode, Layout, Locator};
pub use header::{ControlHeader, build_header};
pub use normalize::{CanonicalFields, InputRow, TransactionCode, normalize};
pub use source::load_table;
