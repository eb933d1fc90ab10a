//! # ffbatch-av
//!
//! Thin wrappers around the ffmpeg command-line tools.
//!
//! This crate provides:
//! - Probing media files with ffprobe ([`probe`])
//! - Building ffmpeg argument lists ([`FfmpegArgs`])
//! - Running ffmpeg while reporting progress ([`run_ffmpeg`])
//! - Detecting the tools on the host ([`check_tool`])
//!
//! ## Features
//!
//! - `tracing` (default) - Emit tracing events
//!
//! ## Example
//!
//! ```no_run
//! # async fn example() -> ffbatch_av::Result<()> {
//! let info = ffbatch_av::probe("ffprobe", "/path/to/video.mkv").await?;
//! if let Some(video) = info.primary_video() {
//!     println!("{} {}x{}", video.codec, video.width, video.height);
//! }
//! # Ok(())
//! # }
//! ```

mod command;
mod encode;
mod error;
pub mod probe;
pub mod tools;

pub use command::{render_command_line, FfmpegArgs, ParameterPosition};
pub use encode::{parse_progress_line, run_ffmpeg};
pub use error::{Error, Result};
pub use probe::{AudioTrack, MediaInfo, SubtitleTrack, VideoTrack};
pub use tools::{check_tool, get_tool_path, require_tool, ToolInfo};

/// Probe a media file with the ffprobe binary at `program`.
pub async fn probe<P, Q>(program: P, path: Q) -> Result<MediaInfo>
where
    P: AsRef<std::path::Path>,
    Q: AsRef<std::path::Path>,
{
    probe::probe_with_ffprobe(program.as_ref(), path.as_ref()).await
}
