//! Error types for the ingest pipeline.
//!
//! A file either yields all of its records or exactly one of these errors.
//! Field-level absence and unrecognized codes are never errors anywhere in
//! extraction.

use thiserror::Error;

/// Fatal per-file ingest failures.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Spreadsheet parse error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid document structure: {0}")]
    Structure(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for ingest operations
pub type IngestResult<T> = Result<T, IngestError>;
