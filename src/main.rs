mod cli;

use ffbatch::{
    config::{self, RunConfig},
    discovery::{discover, FilePattern},
    encoder::FfmpegEncoder,
    executor::ConversionExecutor,
    plan::{ConversionRequest, PlanBuilder},
    probe::FfprobeProber,
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use std::sync::atomic::Ordering;
use std::sync::Arc;

async fn run_batch(run: RunConfig) -> Result<()> {
    let pattern = FilePattern::new(&run.pattern)
        .with_context(|| format!("Invalid search pattern: {}", run.pattern))?;

    let requests: Vec<ConversionRequest> = discover(&run.input_dir, &pattern)
        .map(|file| {
            ConversionRequest::new(file, &run.input_dir, &run.output_dir, run.conversion_type)
        })
        .collect();

    tracing::info!(
        "Found {} files to transcode using the pattern {}",
        requests.len(),
        pattern
    );

    if requests.is_empty() {
        tracing::info!("No files to convert, there is nothing to process");
        return Ok(());
    }

    let tools = &run.config.tools;
    let ffprobe = config::resolve_tool("ffprobe", tools.ffprobe_path.as_deref(), true);
    let ffmpeg = config::resolve_tool("ffmpeg", tools.ffmpeg_path.as_deref(), !run.simulate);

    let builder = PlanBuilder::new(Arc::new(FfprobeProber::new(ffprobe)), run.plan_settings());
    let executor = ConversionExecutor::new(builder, Arc::new(FfmpegEncoder::new(ffmpeg)));

    // Ctrl-C lets the current conversion finish, then stops the batch
    let stop = executor.stop_signal();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current conversion");
            stop.store(true, Ordering::Relaxed);
        }
    });

    let report = executor.run(requests).await;
    report.summary.log();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "ffbatch=trace,ffbatch_av=debug".to_string()
        } else {
            "ffbatch=info,ffbatch_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    let config = config::load_config_or_default(cli.config.as_deref())?;

    let run = RunConfig {
        input_dir: cli.input,
        output_dir: cli.output,
        pattern: cli.pattern,
        simulate: cli.simulate,
        conversion_type: cli.conversion_type,
        config,
    };
    config::validate_run(&run)?;

    tracing::info!("Input directory: {}", run.input_dir.display());
    if run.simulate {
        tracing::info!("[SIMULATE] No directories will be created and nothing will be encoded");
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_batch(run))
}
