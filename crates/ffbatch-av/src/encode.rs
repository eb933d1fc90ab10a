//! Running ffmpeg with progress reporting.

use crate::{Error, Result};
use std::collections::VecDeque;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

/// Number of stderr lines kept for error reports.
const STDERR_TAIL_LINES: usize = 20;

/// Run ffmpeg with `args`, reporting completion percentages to `on_progress`.
///
/// `duration` is the source duration used to turn ffmpeg's output timestamp
/// into a percentage; without it only the final 100% is reported.
///
/// # Errors
///
/// - [`Error::ToolNotFound`] if `program` cannot be spawned because it does not exist.
/// - [`Error::ToolFailed`] if ffmpeg exits with a non-zero status; the message
///   carries the tail of its stderr.
pub async fn run_ffmpeg(
    program: &Path,
    args: &[String],
    duration: Option<Duration>,
    on_progress: &mut (dyn FnMut(u8) + Send),
) -> Result<()> {
    let mut command = Command::new(program);
    command
        .args(["-hide_banner", "-nostats", "-progress", "pipe:1"])
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    // A terminal Ctrl-C goes to the whole foreground process group. ffmpeg
    // gets its own group so an interrupt only stops the batch between files.
    #[cfg(unix)]
    command.process_group(0);

    let mut child = command
        .spawn()
        .map_err(|e| Error::from_spawn("ffmpeg", e))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| Error::tool_failed("ffmpeg", "stdout was not captured"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| Error::tool_failed("ffmpeg", "stderr was not captured"))?;

    // Drain stderr concurrently so a chatty encoder cannot fill the pipe.
    let stderr_task = tokio::spawn(async move {
        let mut tail = VecDeque::with_capacity(STDERR_TAIL_LINES);
        let mut lines = BufReader::new(stderr).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tail.len() == STDERR_TAIL_LINES {
                tail.pop_front();
            }
            tail.push_back(line);
        }
        tail.into_iter().collect::<Vec<_>>().join("\n")
    });

    let mut lines = BufReader::new(stdout).lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(percent) = parse_progress_line(&line, duration) {
            on_progress(percent);
        }
    }

    let status = child.wait().await?;
    let stderr_tail = stderr_task.await.unwrap_or_default();

    if !status.success() {
        return Err(Error::tool_failed(
            "ffmpeg",
            format!("exited with status {}: {}", status, stderr_tail.trim()),
        ));
    }

    #[cfg(feature = "tracing")]
    tracing::debug!("ffmpeg finished with status {}", status);

    Ok(())
}

/// Turn one `-progress` key/value line into a completion percentage.
///
/// `out_time_ms` is reported in microseconds despite its name.
pub fn parse_progress_line(line: &str, duration: Option<Duration>) -> Option<u8> {
    let (key, value) = line.trim().split_once('=')?;
    match key {
        "progress" if value == "end" => Some(100),
        "out_time_ms" | "out_time_us" => {
            let total = duration?.as_micros();
            if total == 0 {
                return None;
            }
            let elapsed: u128 = value.parse::<i64>().ok()?.max(0) as u128;
            Some((elapsed * 100 / total).min(100) as u8)
        }
        _ => None,
    }
}
