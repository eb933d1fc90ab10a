//! Encoder seam.

use crate::plan::ConversionPlan;
use async_trait::async_trait;
use std::path::PathBuf;

/// Runs a conversion plan to completion.
///
/// Implementations call `on_progress` with a completion percentage (0-100)
/// zero or more times while the conversion is in flight. The callback is not
/// retained once `encode` returns.
#[async_trait]
pub trait Encoder: Send + Sync {
    async fn encode(
        &self,
        plan: &ConversionPlan,
        on_progress: &mut (dyn FnMut(u8) + Send),
    ) -> ffbatch_av::Result<()>;
}

/// Encoder that runs ffmpeg with the plan's arguments.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    program: PathBuf,
}

impl FfmpegEncoder {
    /// Create an encoder running the ffmpeg binary at `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

#[async_trait]
impl Encoder for FfmpegEncoder {
    async fn encode(
        &self,
        plan: &ConversionPlan,
        on_progress: &mut (dyn FnMut(u8) + Send),
    ) -> ffbatch_av::Result<()> {
        ffbatch_av::run_ffmpeg(&self.program, plan.args(), plan.duration(), on_progress).await
    }
}
