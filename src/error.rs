//! Per-file failure types.
//!
//! Every variant is caught at the plan-processing boundary and recorded as a
//! failed conversion; none of them aborts a batch.

use std::path::PathBuf;

/// Reasons a single file could not be converted.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Stream metadata could not be extracted.
    #[error("failed to probe {}: {source}", path.display())]
    Probe {
        path: PathBuf,
        source: ffbatch_av::Error,
    },

    /// The probe succeeded but found no video stream to plan a re-encode for.
    #[error("no video stream found in {}", path.display())]
    NoVideoStream { path: PathBuf },

    /// The mirrored output directory could not be created.
    #[error("failed to create output directory {}: {source}", path.display())]
    DirectoryCreation {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The encoder reported an error.
    #[error("encoder failed: {0}")]
    Encode(#[source] ffbatch_av::Error),

    /// The existing output could not be inspected.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid file discovery patterns.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// A `[` or `{` was never closed.
    #[error("unclosed '{delimiter}' in pattern: {pattern}")]
    Unclosed { pattern: String, delimiter: char },

    /// The translated expression was rejected.
    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),
}
