use super::policy::codec_policy;
use super::types::{Container, ConversionPlan, ConversionRequest, PlanParts};
use crate::error::ConversionError;
use crate::probe::Prober;
use std::sync::Arc;
use tracing::debug;

/// Settings shared by every plan of a run.
#[derive(Debug, Clone)]
pub struct PlanSettings {
    /// Output container (default: matroska).
    pub container: Container,
    /// Target codec for video re-encodes (default: hevc).
    pub video_codec: String,
    /// Encoder thread count; 0 lets the encoder decide.
    pub threads: u32,
    /// Never touch the file system.
    pub simulate: bool,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            container: Container::Mkv,
            video_codec: "hevc".to_string(),
            threads: 0,
            simulate: false,
        }
    }
}

/// Turns conversion requests into plans.
pub struct PlanBuilder {
    prober: Arc<dyn Prober>,
    settings: PlanSettings,
}

impl PlanBuilder {
    pub fn new(prober: Arc<dyn Prober>, settings: PlanSettings) -> Self {
        Self { prober, settings }
    }

    pub fn settings(&self) -> &PlanSettings {
        &self.settings
    }

    /// Probe the request's input and resolve a plan for it.
    ///
    /// Creates the mirrored output directory once the plan is known to be
    /// valid, unless running in simulate mode.
    pub async fn build(&self, request: &ConversionRequest) -> Result<ConversionPlan, ConversionError> {
        let info = self
            .prober
            .probe(&request.input_file)
            .await
            .map_err(|source| ConversionError::Probe {
                path: request.input_file.clone(),
                source,
            })?;

        let policy = codec_policy(
            request.conversion_type,
            &info,
            self.settings.container,
            &self.settings.video_codec,
        )
        .ok_or_else(|| ConversionError::NoVideoStream {
            path: request.input_file.clone(),
        })?;

        let output_dir = request.output_dir();
        if !self.settings.simulate && !tokio::fs::try_exists(&output_dir).await.unwrap_or(false) {
            debug!("Creating output directory {:?}", output_dir);
            tokio::fs::create_dir_all(&output_dir)
                .await
                .map_err(|source| ConversionError::DirectoryCreation {
                    path: output_dir.clone(),
                    source,
                })?;
        }

        Ok(ConversionPlan::from_parts(PlanParts {
            input: request.input_file.clone(),
            output: request.output_path(self.settings.container),
            container: self.settings.container,
            conversion_type: request.conversion_type,
            mappings: policy.mappings,
            video: policy.video,
            audio: policy.audio,
            subtitles: policy.subtitles,
            threads: self.settings.threads,
            duration: info.duration,
        }))
    }
}
