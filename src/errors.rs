// errors.rs
use std::fmt;

/// Errors originating from the persistence side of the batch: the SQLite
/// store, the CSV snapshot writer, or the filesystem underneath it.
#[derive(Debug)]
pub enum PipelineError {
    DbError(String),
    CsvError(String),
    IoError(String),
    InternalError,
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::DbError(msg) => write!(f, "Database error: {msg}"),
            PipelineError::CsvError(msg) => write!(f, "CSV error: {msg}"),
            PipelineError::IoError(msg) => write!(f, "I/O error: {msg}"),
            PipelineError::InternalError => write!(f, "Internal error"),
        }
    }
}

impl std::error::Error for PipelineError {}
