//! Decide what to do about an output file that may already exist.

use std::io;
use std::path::Path;

/// Outcome of inspecting a plan's output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputDecision {
    /// Nothing there yet.
    Proceed,
    /// A non-empty output exists and is treated as already converted.
    Skip,
    /// An empty output exists, left behind by an earlier failed run.
    Overwrite,
}

/// Inspect `output` and decide whether to convert into it.
///
/// # Errors
///
/// Returns any metadata error other than `NotFound`.
pub async fn decide(output: &Path) -> io::Result<OutputDecision> {
    match tokio::fs::metadata(output).await {
        Ok(meta) if meta.len() > 0 => Ok(OutputDecision::Skip),
        Ok(_) => Ok(OutputDecision::Overwrite),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(OutputDecision::Proceed),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_output_proceeds() {
        let dir = tempdir().unwrap();
        let decision = decide(&dir.path().join("a.mkv")).await.unwrap();
        assert_eq!(decision, OutputDecision::Proceed);
    }

    #[tokio::test]
    async fn test_non_empty_output_is_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.mkv");
        std::fs::write(&path, b"matroska").unwrap();
        assert_eq!(decide(&path).await.unwrap(), OutputDecision::Skip);
    }

    #[tokio::test]
    async fn test_empty_output_is_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.mkv");
        std::fs::File::create(&path).unwrap();
        assert_eq!(decide(&path).await.unwrap(), OutputDecision::Overwrite);
    }

    #[tokio::test]
    async fn test_metadata_error_is_returned() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("out");
        std::fs::write(&blocker, b"x").unwrap();

        let err = decide(&blocker.join("a.mkv")).await.unwrap_err();
        assert_ne!(err.kind(), io::ErrorKind::NotFound);
    }
}
