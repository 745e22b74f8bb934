use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the failures that abort an export run.
///
/// Individual cells never produce errors: malformed or missing values degrade
/// to absent fields while the row is mapped.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the YAML document or configuration cannot be parsed or emitted.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when the workbook lacks the expected sheet.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when an existing output document is not a sequence of mappings.
    #[error("invalid mentors document: {0}")]
    InvalidDocument(String),

    /// Raised when the run configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
