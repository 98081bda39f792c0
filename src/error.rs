//! Error type shared by the compiler, the matcher and the batch extractor.
//!
//! A line that does not match a format is not an error; it is reported as
//! `Ok(None)` by the matcher and skipped by the extractor.

use thiserror::Error;

/// Result type alias using [`ScanError`].
pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Error, Debug)]
pub enum ScanError {
    /// The pattern assembled from a format was rejected by the regex engine.
    #[error("Invalid pattern for format {format:?}: {source}")]
    Compile {
        format: String,
        #[source]
        source: regex::Error,
    },

    /// A captured field could not be converted to its target type.
    #[error("Cannot convert {text:?} to {target}")]
    Conversion { text: String, target: &'static str },

    /// Reading lines for batch extraction failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    pub(crate) fn conversion(text: &str, target: &'static str) -> Self {
        Self::Conversion {
            text: text.to_string(),
            target,
        }
    }
}
