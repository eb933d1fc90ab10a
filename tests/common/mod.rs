//! Shared test harness for integration tests.
//!
//! Provides a scripted [`FakeProber`] and a recording [`FakeEncoder`] so the
//! executor can be driven without ffmpeg installed.

#![allow(dead_code)]

use async_trait::async_trait;
use ffbatch::encoder::Encoder;
use ffbatch::plan::ConversionPlan;
use ffbatch::probe::Prober;
use ffbatch_av::{AudioTrack, MediaInfo, SubtitleTrack, VideoTrack};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

/// Builds a one-video, one-audio media description.
pub fn media(width: u32) -> MediaInfo {
    MediaInfo {
        container: "mov,mp4,m4a,3gp,3g2,mj2".to_string(),
        duration: Some(Duration::from_secs(120)),
        video_tracks: vec![VideoTrack {
            index: 0,
            codec: "h264".to_string(),
            width,
            height: width * 9 / 16,
            frame_rate: Some(25.0),
            bit_rate: Some(8_000_000),
        }],
        audio_tracks: vec![AudioTrack {
            index: 0,
            codec: "aac".to_string(),
            channels: 2,
            bit_rate: Some(192_000),
            language: Some("eng".to_string()),
        }],
        ..Default::default()
    }
}

/// Adds subtitle streams with the given codecs.
pub fn with_subtitles(mut info: MediaInfo, codecs: &[&str]) -> MediaInfo {
    info.subtitle_tracks = codecs
        .iter()
        .enumerate()
        .map(|(i, codec)| SubtitleTrack {
            index: i as u32,
            codec: codec.to_string(),
            language: None,
        })
        .collect();
    info
}

/// Prober answering from a per-file-name table; unknown names fail.
pub struct FakeProber {
    entries: Vec<(String, MediaInfo)>,
}

impl FakeProber {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with(mut self, file_name: &str, info: MediaInfo) -> Self {
        self.entries.push((file_name.to_string(), info));
        self
    }
}

#[async_trait]
impl Prober for FakeProber {
    async fn probe(&self, path: &Path) -> ffbatch_av::Result<MediaInfo> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, info)| MediaInfo {
                file_path: path.to_path_buf(),
                ..info.clone()
            })
            .ok_or_else(|| ffbatch_av::Error::parse_error("ffprobe", "Invalid data found"))
    }
}

/// Encoder that records every invocation and writes a small output file.
pub struct FakeEncoder {
    /// Output file names whose encode fails.
    failing: Vec<String>,
    /// Percentages fed to the progress callback on every encode.
    progress: Vec<u8>,
    pub calls: Mutex<Vec<EncodeCall>>,
}

#[derive(Debug, Clone)]
pub struct EncodeCall {
    pub output: PathBuf,
    pub args: Vec<String>,
    pub overwrite: bool,
}

impl FakeEncoder {
    pub fn new() -> Self {
        Self {
            failing: Vec::new(),
            progress: vec![0, 10, 10, 55, 100],
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, file_name: &str) -> Self {
        self.failing.push(file_name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<EncodeCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Encoder for FakeEncoder {
    async fn encode(
        &self,
        plan: &ConversionPlan,
        on_progress: &mut (dyn FnMut(u8) + Send),
    ) -> ffbatch_av::Result<()> {
        self.calls.lock().unwrap().push(EncodeCall {
            output: plan.output().to_path_buf(),
            args: plan.args().to_vec(),
            overwrite: plan.overwrite(),
        });

        if self.failing.contains(&plan.file_name()) {
            on_progress(3);
            std::fs::write(plan.output(), b"truncated")?;
            return Err(ffbatch_av::Error::tool_failed(
                "ffmpeg",
                "exited with status 1: Conversion failed!",
            ));
        }

        for percent in &self.progress {
            on_progress(*percent);
        }
        std::fs::write(plan.output(), b"encoded")?;
        Ok(())
    }
}

/// In-memory sink for formatted log output.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Creates `name` under `dir` with placeholder content.
pub fn touch_input(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, b"source").unwrap();
    path
}
