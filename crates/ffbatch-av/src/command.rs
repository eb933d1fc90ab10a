//! Builder for ffmpeg argument lists.

use std::path::{Path, PathBuf};

/// Where a parameter is placed relative to the `-i <input>` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterPosition {
    /// Before `-i`; applies to input decoding.
    PreInput,
    /// After the input; applies to the output.
    PostInput,
}

/// A builder for ffmpeg invocations.
///
/// The produced list excludes the program name and the progress plumbing
/// added by [`crate::run_ffmpeg`].
///
/// # Example
///
/// ```
/// use ffbatch_av::{FfmpegArgs, ParameterPosition};
///
/// let args = FfmpegArgs::new("in.ts")
///     .param(ParameterPosition::PostInput, ["-c:v", "copy"])
///     .output("out.mkv")
///     .build();
/// assert_eq!(args, ["-i", "in.ts", "-c:v", "copy", "-n", "out.mkv"]);
/// ```
#[derive(Debug, Clone)]
pub struct FfmpegArgs {
    input: PathBuf,
    pre_input: Vec<String>,
    post_input: Vec<String>,
    output: Option<PathBuf>,
    overwrite: bool,
}

impl FfmpegArgs {
    /// Start a builder reading from `input`.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            pre_input: Vec::new(),
            post_input: Vec::new(),
            output: None,
            overwrite: false,
        }
    }

    /// Append parameters at the given position.
    pub fn param(
        &mut self,
        position: ParameterPosition,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> &mut Self {
        let target = match position {
            ParameterPosition::PreInput => &mut self.pre_input,
            ParameterPosition::PostInput => &mut self.post_input,
        };
        target.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the output file.
    pub fn output(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.output = Some(path.into());
        self
    }

    /// Emit `-y` instead of `-n`.
    pub fn overwrite(&mut self, overwrite: bool) -> &mut Self {
        self.overwrite = overwrite;
        self
    }

    /// Materialize the argument list.
    pub fn build(&self) -> Vec<String> {
        let mut args = self.pre_input.clone();
        args.push("-i".to_string());
        args.push(path_arg(&self.input));
        args.extend(self.post_input.iter().cloned());
        args.push(if self.overwrite { "-y" } else { "-n" }.to_string());
        if let Some(ref output) = self.output {
            args.push(path_arg(output));
        }
        args
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// Render an argument list as a single shell-like line for logging.
pub fn render_command_line(args: &[String]) -> String {
    args.iter()
        .map(|arg| {
            if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || c == '"' || c == '\'')
            {
                format!("\"{}\"", arg.replace('\\', "\\\\").replace('"', "\\\""))
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
