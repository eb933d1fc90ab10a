//! Media information types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Stream layout of a media file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Path to the media file.
    pub file_path: PathBuf,
    /// Container format as reported by the prober (e.g., "matroska,webm").
    pub container: String,
    /// Duration of the media.
    pub duration: Option<Duration>,
    /// Video tracks in the file.
    pub video_tracks: Vec<VideoTrack>,
    /// Audio tracks in the file.
    pub audio_tracks: Vec<AudioTrack>,
    /// Subtitle tracks in the file.
    pub subtitle_tracks: Vec<SubtitleTrack>,
}

/// Information about a video track.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoTrack {
    /// Position among the file's video tracks.
    pub index: u32,
    /// Codec id (e.g., "h264", "hevc").
    pub codec: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Frame rate in FPS.
    pub frame_rate: Option<f64>,
    /// Bit rate in bits per second.
    pub bit_rate: Option<u64>,
}

/// Information about an audio track.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioTrack {
    /// Position among the file's audio tracks.
    pub index: u32,
    /// Codec id (e.g., "aac", "eac3").
    pub codec: String,
    /// Number of channels.
    pub channels: u32,
    /// Bit rate in bits per second.
    pub bit_rate: Option<u64>,
    /// Language code (e.g., "eng").
    pub language: Option<String>,
}

/// Information about a subtitle track.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubtitleTrack {
    /// Position among the file's subtitle tracks.
    pub index: u32,
    /// Codec id (e.g., "subrip", "dvb_teletext").
    pub codec: String,
    /// Language code (e.g., "eng").
    pub language: Option<String>,
}

impl MediaInfo {
    /// Get the primary (first) video track.
    pub fn primary_video(&self) -> Option<&VideoTrack> {
        self.video_tracks.first()
    }
}
