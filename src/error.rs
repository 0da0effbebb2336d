use crate::fields::{Field, Locator};

#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("source unreadable: {path}: {reason}")]
    SourceUnreadable { path: String, reason: String },
    #[error("field `{field}` not found ({locator})")]
    FieldResolution { field: Field, locator: Locator },
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ConvertError {
    pub(crate) fn unreadable(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnreadable { path: path.into(), reason: reason.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
