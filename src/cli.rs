use clap::Parser;
use ffbatch::plan::ConversionType;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ffbatch")]
#[command(author, version, about = "Batch transcode media files with ffmpeg")]
pub struct Cli {
    /// The input directory to run ffmpeg over
    #[arg(short, long)]
    pub input: PathBuf,

    /// The pattern used to find files to transcode in the input directory
    #[arg(short, long)]
    pub pattern: String,

    /// The output directory to save transcoded files to
    #[arg(short, long)]
    pub output: PathBuf,

    /// Simulate the run without creating directories or transcoding any files
    #[arg(short, long)]
    pub simulate: bool,

    /// The type of transcode to do: 'Video' or 'Subtitle' (subtitles only)
    #[arg(short = 't', long = "type", default_value = "video")]
    pub conversion_type: ConversionType,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
