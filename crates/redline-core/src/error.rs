//! Error types for the revision extraction pipeline.

use thiserror::Error;

/// Error types that can occur while extracting revisions or building the
/// dataset.
///
/// Structural errors are fatal for the whole input: a malformed document
/// aborts extraction rather than skipping paragraphs, and an invalid JSON
/// intermediate aborts the dataset stage with no partial output.
#[derive(Error, Debug)]
pub enum RedlineError {
    /// Malformed or unexpected markup shape (e.g. a document without a
    /// `w:body`, or unreadable XML).
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The JSON intermediate consumed by the dataset stage is not valid.
    #[error("JSON decode error: {0}")]
    DecodeError(#[from] serde_json::Error),

    /// File I/O error while reading inputs or writing outputs.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Container-level failure, e.g. `word/document.xml` missing from a
    /// `.docx` archive.
    #[error("Format error: {0}")]
    FormatError(String),
}

/// Type alias for [`Result<T, RedlineError>`].
pub type Result<T> = std::result::Result<T, RedlineError>;
