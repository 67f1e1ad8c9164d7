//! Error types for formatting and record ingestion.
use thiserror::Error;

/// Failure while writing a formatted event.
///
/// The sink may already hold a partial JSON fragment when this is returned.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to write to output: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while reading an input event record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed event record: {0}")]
    Json(#[from] serde_json::Error),
}

/// An exception carried only as its rendered text, for errors captured
/// outside their original type (input records, `tracing` error fields).
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ExceptionText(pub String);
