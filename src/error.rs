//! Error type shared by the planner, the marker encoder and the renderer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Invalid configuration for `{field}`: {reason}")]
    ConfigError { field: &'static str, reason: String },
    #[error("Failed to render PDF: {0}")]
    RenderError(String),
    #[error("Failed to encode marker: {0}")]
    EncodingError(String),
    #[error("Failed to read layout file: {0}")]
    LayoutFileError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SheetError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        SheetError::ConfigError {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
