//! Error types for the Stages log parser.

use std::path::PathBuf;

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing a Stages log or writing its samples.
///
/// Malformed numbers inside a row are not errors: they decode to NaN (or `None` for
/// integer columns) and flow through the normal filtering path.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input file could not be read
    #[error("Could not read file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid parse options (e.g., a `stages` list of the wrong length)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The tokenizer rejected a record
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Normalization was requested but a sample had to be emitted before any row of the
    /// lower stage bound was seen
    #[error(
        "Cannot normalize stage {stage}: no row of stage {lo} was seen before it"
    )]
    MissingNormalizationBase { stage: i32, lo: i32 },

    /// I/O error occurred while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Sample serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}
