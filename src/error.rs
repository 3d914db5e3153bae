use thiserror::Error;

/// Failures raised by the audit itself (I/O and parse errors travel as
/// `anyhow::Error` with context attached).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuditError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("no columns to parse from file")]
    EmptyFile,

    #[error("CSV row {row}: expected {expected} fields, saw {found}")]
    TooManyFields {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("column '{0}' not found in dataset")]
    MissingColumn(String),

    #[error("column '{0}' does not hold text values")]
    NonTextColumn(String),
}
