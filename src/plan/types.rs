use ffbatch_av::{render_command_line, FfmpegArgs, ParameterPosition};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How a discovered file is to be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionType {
    /// Re-encode video to the target codec.
    #[default]
    Video,
    /// Copy audio and video, convert subtitles to a text codec.
    SubtitleOnly,
}

impl std::str::FromStr for ConversionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "video" => Ok(ConversionType::Video),
            "subtitle" | "subtitles" | "subtitle_only" | "subtitleonly" => {
                Ok(ConversionType::SubtitleOnly)
            }
            _ => Err(format!(
                "Unknown conversion type: {} (expected 'Video' or 'Subtitle')",
                s
            )),
        }
    }
}

impl std::fmt::Display for ConversionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionType::Video => write!(f, "Video"),
            ConversionType::SubtitleOnly => write!(f, "Subtitle"),
        }
    }
}

/// Output container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    /// Matroska container
    #[default]
    #[serde(alias = "matroska")]
    Mkv,
    /// MPEG-4 Part 14 container
    Mp4,
}

impl Container {
    /// Get the file extension for this container.
    pub fn extension(&self) -> &'static str {
        match self {
            Container::Mkv => "mkv",
            Container::Mp4 => "mp4",
        }
    }
}

impl std::str::FromStr for Container {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mkv" | "matroska" => Ok(Container::Mkv),
            "mp4" | "m4v" => Ok(Container::Mp4),
            _ => Err(format!("Unknown container format: {}", s)),
        }
    }
}

/// Text subtitle codecs written to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleCodec {
    /// MP4 timed text.
    MovText,
    /// SubRip.
    Srt,
}

impl SubtitleCodec {
    /// The ffmpeg encoder name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubtitleCodec::MovText => "mov_text",
            SubtitleCodec::Srt => "srt",
        }
    }
}

/// A file selected for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    /// The file to convert.
    pub input_file: PathBuf,
    /// The directory discovery started from.
    pub input_root: PathBuf,
    /// Root of the mirrored output tree.
    pub output_root: PathBuf,
    /// Fixed at creation; never re-derived from probed metadata.
    pub conversion_type: ConversionType,
}

impl ConversionRequest {
    pub fn new(
        input_file: impl Into<PathBuf>,
        input_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        conversion_type: ConversionType,
    ) -> Self {
        Self {
            input_file: input_file.into(),
            input_root: input_root.into(),
            output_root: output_root.into(),
            conversion_type,
        }
    }

    /// Directory the output lands in: the input's parent re-rooted under the output root.
    pub fn output_dir(&self) -> PathBuf {
        let parent = self.input_file.parent().unwrap_or_else(|| Path::new(""));
        match parent.strip_prefix(&self.input_root) {
            Ok(relative) => self.output_root.join(relative),
            Err(_) => self.output_root.clone(),
        }
    }

    /// Full output path for `container`.
    pub fn output_path(&self, container: Container) -> PathBuf {
        let stem = self
            .input_file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());
        self.output_dir()
            .join(format!("{}.{}", stem, container.extension()))
    }
}

/// Kind of stream selected by a `-map` specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Video,
    Audio,
    Subtitle,
}

/// One `-map` entry of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamMapping {
    pub kind: StreamKind,
    /// Index among streams of the same kind.
    pub index: u32,
}

impl StreamMapping {
    pub fn new(kind: StreamKind, index: u32) -> Self {
        Self { kind, index }
    }

    /// ffmpeg stream specifier for the first input, e.g. `0:v:0`.
    pub fn specifier(&self) -> String {
        let kind = match self.kind {
            StreamKind::Video => "v",
            StreamKind::Audio => "a",
            StreamKind::Subtitle => "s",
        };
        format!("0:{}:{}", kind, self.index)
    }
}

/// What happens to the video streams.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoDecision {
    Copy,
    Encode { codec: String, bitrate: u64 },
}

/// What happens to the audio streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioDecision {
    /// Leave codec selection to the muxer's default.
    EncoderDefault,
    Copy,
}

/// Subtitle conversion applied for subtitle-only runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleRemediation {
    pub codec: SubtitleCodec,
    /// Set when a DVB teletext stream needs its duration and frame rate fixed.
    pub teletext_fix: Option<TeletextFix>,
}

/// Corrective parameters for DVB teletext subtitles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeletextFix {
    /// Frame rate of the first video stream, used for the subtitle fps filter.
    pub frame_rate: Option<f64>,
}

/// Fully resolved instructions for converting one file.
///
/// Plans are immutable; [`ConversionPlan::with_overwrite`] produces a new plan.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionPlan {
    input: PathBuf,
    output: PathBuf,
    container: Container,
    conversion_type: ConversionType,
    mappings: Vec<StreamMapping>,
    video: VideoDecision,
    audio: AudioDecision,
    subtitles: Option<SubtitleRemediation>,
    threads: u32,
    overwrite: bool,
    duration: Option<Duration>,
    args: Vec<String>,
}

/// Parts of a plan decided by the builder.
#[derive(Debug, Clone)]
pub(crate) struct PlanParts {
    pub input: PathBuf,
    pub output: PathBuf,
    pub container: Container,
    pub conversion_type: ConversionType,
    pub mappings: Vec<StreamMapping>,
    pub video: VideoDecision,
    pub audio: AudioDecision,
    pub subtitles: Option<SubtitleRemediation>,
    pub threads: u32,
    pub duration: Option<Duration>,
}

impl ConversionPlan {
    pub(crate) fn from_parts(parts: PlanParts) -> Self {
        let mut plan = Self {
            input: parts.input,
            output: parts.output,
            container: parts.container,
            conversion_type: parts.conversion_type,
            mappings: parts.mappings,
            video: parts.video,
            audio: parts.audio,
            subtitles: parts.subtitles,
            threads: parts.threads,
            overwrite: false,
            duration: parts.duration,
            args: Vec::new(),
        };
        plan.args = plan.render_args();
        plan
    }

    /// Rebuild the plan with a different overwrite flag.
    ///
    /// The output path, and therefore its extension, is unchanged.
    pub fn with_overwrite(&self, overwrite: bool) -> Self {
        let mut plan = Self {
            overwrite,
            args: Vec::new(),
            ..self.clone()
        };
        plan.args = plan.render_args();
        plan
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// File name of the output, used in log lines.
    pub fn file_name(&self) -> String {
        self.output
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn container(&self) -> Container {
        self.container
    }

    pub fn conversion_type(&self) -> ConversionType {
        self.conversion_type
    }

    pub fn mappings(&self) -> &[StreamMapping] {
        &self.mappings
    }

    pub fn video(&self) -> &VideoDecision {
        &self.video
    }

    pub fn audio(&self) -> AudioDecision {
        self.audio
    }

    pub fn subtitles(&self) -> Option<&SubtitleRemediation> {
        self.subtitles.as_ref()
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Source duration, used to turn encoder timestamps into percentages.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// The ffmpeg argument list.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The argument list as one loggable line.
    pub fn command_line(&self) -> String {
        render_command_line(&self.args)
    }

    fn render_args(&self) -> Vec<String> {
        use ParameterPosition::{PostInput, PreInput};

        let mut cmd = FfmpegArgs::new(&self.input);

        for mapping in &self.mappings {
            cmd.param(PostInput, ["-map".to_string(), mapping.specifier()]);
        }

        match &self.video {
            VideoDecision::Copy => {
                cmd.param(PostInput, ["-c:v", "copy"]);
            }
            VideoDecision::Encode { codec, bitrate } => {
                cmd.param(PostInput, ["-c:v".to_string(), codec.clone()]);
                cmd.param(PostInput, ["-b:v".to_string(), bitrate.to_string()]);
            }
        }

        if self.audio == AudioDecision::Copy {
            cmd.param(PostInput, ["-c:a", "copy"]);
        }

        if let Some(ref subtitles) = self.subtitles {
            // Output subtitle streams are numbered in mapping order.
            let subtitle_streams = self
                .mappings
                .iter()
                .filter(|m| m.kind == StreamKind::Subtitle)
                .count();
            for n in 0..subtitle_streams {
                cmd.param(
                    PostInput,
                    [format!("-c:s:{}", n), subtitles.codec.as_str().to_string()],
                );
            }

            if let Some(fix) = subtitles.teletext_fix {
                cmd.param(PreInput, ["-fix_sub_duration"]);
                cmd.param(PreInput, ["-txt_format", "text"]);
                if let Some(fps) = fix.frame_rate {
                    cmd.param(PostInput, ["-filter:s".to_string(), format!("fps={}", fps)]);
                }
            }
        }

        cmd.param(PostInput, ["-threads".to_string(), self.threads.to_string()]);

        cmd.output(&self.output).overwrite(self.overwrite).build()
    }
}
