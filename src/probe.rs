//! Media probing seam.
//!
//! The executor only sees the [`Prober`] trait; [`FfprobeProber`] is the
//! production implementation backed by ffbatch-av.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

// Re-export the probe types used throughout the crate
pub use ffbatch_av::{AudioTrack, MediaInfo, SubtitleTrack, VideoTrack};

/// Extracts stream metadata from a media file.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, path: &Path) -> ffbatch_av::Result<MediaInfo>;
}

/// Prober that shells out to ffprobe.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    program: PathBuf,
}

impl FfprobeProber {
    /// Create a prober running the ffprobe binary at `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FfprobeProber {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

#[async_trait]
impl Prober for FfprobeProber {
    async fn probe(&self, path: &Path) -> ffbatch_av::Result<MediaInfo> {
        ffbatch_av::probe(&self.program, path).await
    }
}
