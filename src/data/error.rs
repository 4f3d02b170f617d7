use std::path::PathBuf;

use thiserror::Error;

/// A malformed cell in the input file. `row` is zero-based, header excluded.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("row {row}: cannot parse '{value}' as a date-time")]
    Timestamp { row: usize, value: String },

    #[error("row {row}, column {column}: '{value}' is not a number")]
    Number {
        row: usize,
        column: &'static str,
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
