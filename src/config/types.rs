use crate::plan::{Container, ConversionType, PlanSettings};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub encoding: EncodingConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// Explicit ffmpeg binary; PATH lookup otherwise
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Explicit ffprobe binary; PATH lookup otherwise
    #[serde(default)]
    pub ffprobe_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EncodingConfig {
    /// Codec used when re-encoding video (default: hevc)
    #[serde(default = "default_video_codec")]
    pub video_codec: String,

    /// Output container (default: mkv)
    #[serde(default)]
    pub container: Container,

    /// Encoder threads, 0 = automatic
    #[serde(default)]
    pub threads: u32,
}

fn default_video_codec() -> String {
    "hevc".to_string()
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            video_codec: default_video_codec(),
            container: Container::default(),
            threads: 0,
        }
    }
}

/// Everything one batch run needs, assembled from the CLI and the config file.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory scanned for input files.
    pub input_dir: PathBuf,
    /// Root of the mirrored output tree.
    pub output_dir: PathBuf,
    /// Glob matched against file names.
    pub pattern: String,
    /// Dry run: no directories created, no encoder invoked.
    pub simulate: bool,
    pub conversion_type: ConversionType,
    pub config: Config,
}

impl RunConfig {
    /// Plan settings derived from this run.
    pub fn plan_settings(&self) -> PlanSettings {
        PlanSettings {
            container: self.config.encoding.container,
            video_codec: self.config.encoding.video_codec.clone(),
            threads: self.config.encoding.threads,
            simulate: self.simulate,
        }
    }
}
