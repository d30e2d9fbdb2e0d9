//! Error types for csvmerge-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in csvmerge-core
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read an input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or write the output file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV reading error from the csv crate
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A source whose header row has no columns
    #[error("no columns found in '{path}'")]
    EmptyHeader { path: PathBuf },

    /// The union of all source headers is empty
    #[error("cannot build a schema without any columns")]
    EmptySchema,

    /// Input expansion produced no CSV files
    #[error("no input CSV files found")]
    NoInputs,

    /// A row's field count does not match its header
    #[error("row has {found} fields where its header has {expected}")]
    RowShape { expected: usize, found: usize },

    /// A data row whose field count does not match its source header
    #[error("malformed row {row} in '{path}': expected {expected} fields, found {found}")]
    MalformedRow {
        path: PathBuf,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// CSV writing error
    #[error("CSV write error: {0}")]
    CsvWrite(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
