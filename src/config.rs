use crate::error::{ConvertError, Result};
use crate::fields::{ColumnLabels, ColumnPositions};
use serde::Deserialize;
use std::{fs, path::Path};

pub const DEFAULT_REGISTRANT_ID: &str = "RY0658940";
pub const DEFAULT_SHEET: &str = "Report";

/// Report-wide constants, injected into the encoder and header builder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub registrant_id: String,
    pub report_frequency: char,
    pub sheet_name: String,
    pub columns: ColumnLabels,
    pub positions: ColumnPositions,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            registrant_id: DEFAULT_REGISTRANT_ID.to_string(),
            report_frequency: 'M',
            sheet_name: DEFAULT_SHEET.to_string(),
            columns: ColumnLabels::default(),
            positions: ColumnPositions::default(),
        }
    }
}

impl ReportConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: ReportConfig = serde_json::from_str(text).map_err(|e| ConvertError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let id = &self.registrant_id;
        if id.len() != 9 || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConvertError::Config(format!("registrant_id must be 9 ASCII letters/digits, got {id:?}")));
        }
        if !self.report_frequency.is_ascii_alphabetic() {
            return Err(ConvertError::Config(format!(
                "report_frequency must be one ASCII letter, got {:?}",
                self.report_frequency
            )));
        }
        if self.sheet_name.trim().is_empty() {
            return Err(ConvertError::Config("sheet_name must not be empty".into()));
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<ReportConfig> {
    let text = fs::read_to_string(path)
        .map_err(|e| ConvertError::Config(format!("reading {}: {e}", path.display())))?;
    ReportConfig::from_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = ReportConfig::from_json("{}").unwrap();
        assert_eq!(cfg, ReportConfig::default());
        assert_eq!(cfg.registrant_id, "RY0658940");
        assert_eq!(cfg.report_frequency, 'M');
        assert_eq!(cfg.positions.transaction_date, 8);
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let cfg = ReportConfig::from_json(r#"{"registrant_id":"AB1234567","columns":{"associated_id":"ASSOC DEA"}}"#).unwrap();
        assert_eq!(cfg.registrant_id, "AB1234567");
        assert_eq!(cfg.columns.associated_id, "ASSOC DEA");
        assert_eq!(cfg.columns.ndc, "NDC");
        assert_eq!(cfg.sheet_name, "Report");
    }

    #[test]
    fn rejects_bad_registrant_and_unknown_keys() {
        assert!(matches!(ReportConfig::from_json(r#"{"registrant_id":"SHORT"}"#), Err(ConvertError::Config(_))));
        assert!(matches!(ReportConfig::from_json(r#"{"registrant":"AB1234567"}"#), Err(ConvertError::Config(_))));
        assert!(matches!(ReportConfig::from_json("not json"), Err(ConvertError::Config(_))));
    }
}
