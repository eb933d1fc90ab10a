//! Sequential conversion executor.
//!
//! Each request is planned, checked against its existing output, and handed
//! to the encoder, one file at a time. A failure is logged and recorded for
//! that file only; the batch always moves on to the next request.

mod progress;

pub use progress::ProgressTracker;

use crate::encoder::Encoder;
use crate::error::ConversionError;
use crate::output_policy::{self, OutputDecision};
use crate::plan::{ConversionPlan, ConversionRequest, PlanBuilder};
use crate::summary::RunSummary;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Terminal state of one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStatus {
    Succeeded,
    Skipped,
    Failed,
}

/// Outcome of processing one request.
#[derive(Debug)]
pub struct ConversionResult {
    /// Output file name, or the input file name when no plan was built.
    pub file_name: String,
    pub status: ConversionStatus,
    pub elapsed: Duration,
    /// Set when `status` is [`ConversionStatus::Failed`].
    pub error: Option<ConversionError>,
}

/// Results in discovery order plus their summary.
#[derive(Debug)]
pub struct BatchReport {
    pub results: Vec<ConversionResult>,
    pub summary: RunSummary,
}

/// Runs conversion requests one after another.
pub struct ConversionExecutor {
    builder: PlanBuilder,
    encoder: Arc<dyn Encoder>,
    stop_signal: Arc<AtomicBool>,
}

impl ConversionExecutor {
    /// Create an executor. Simulate mode is taken from the builder's settings.
    pub fn new(builder: PlanBuilder, encoder: Arc<dyn Encoder>) -> Self {
        Self {
            builder,
            encoder,
            stop_signal: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a clone of the stop signal for external control.
    ///
    /// Setting it lets the running conversion finish and stops before the next one.
    pub fn stop_signal(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_signal)
    }

    fn simulate(&self) -> bool {
        self.builder.settings().simulate
    }

    /// Process every request in order.
    pub async fn run(&self, requests: Vec<ConversionRequest>) -> BatchReport {
        let total = requests.len();
        let mut results = Vec::with_capacity(total);
        let batch_start = Instant::now();

        for (i, request) in requests.iter().enumerate() {
            if self.stop_signal.load(Ordering::Relaxed) {
                warn!(
                    "Stop requested, {} conversions were not started",
                    total - i
                );
                break;
            }

            results.push(self.process(i + 1, total, request).await);
        }

        let mut summary = RunSummary::from_results(total, &results);
        summary.elapsed = batch_start.elapsed();
        BatchReport { results, summary }
    }

    /// Process one request through to a terminal state.
    async fn process(
        &self,
        position: usize,
        total: usize,
        request: &ConversionRequest,
    ) -> ConversionResult {
        let started = Instant::now();

        let plan = match self.builder.build(request).await {
            Ok(plan) => plan,
            Err(e) => {
                let file_name = request
                    .input_file
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                error!(
                    "There was a problem planning the conversion of {}: {}",
                    request.input_file.display(),
                    e
                );
                return failed(file_name, started, e);
            }
        };

        let plan = match output_policy::decide(plan.output()).await {
            Ok(OutputDecision::Proceed) => plan,
            Ok(OutputDecision::Skip) => {
                info!(
                    "File {} already exists in {}, skipping",
                    plan.file_name(),
                    plan.output().display()
                );
                return ConversionResult {
                    file_name: plan.file_name(),
                    status: ConversionStatus::Skipped,
                    elapsed: started.elapsed(),
                    error: None,
                };
            }
            Ok(OutputDecision::Overwrite) => {
                info!(
                    "File {} already exists in {}, however it contained no data. Overwriting",
                    plan.file_name(),
                    plan.output().display()
                );
                plan.with_overwrite(true)
            }
            Err(e) => return self.plan_failed(&plan, started, ConversionError::Io(e)),
        };

        info!(
            "[{}/{}] Attempting to run the following conversion: {} with the following arguments:\n\n{}\n",
            position,
            total,
            plan.file_name(),
            plan.command_line()
        );

        if self.simulate() {
            info!("[SIMULATE] Would encode {}", plan.file_name());
            return succeeded(&plan, started);
        }

        let mut tracker = ProgressTracker::new(plan.file_name());
        let encoded = self
            .encoder
            .encode(&plan, &mut |percent: u8| {
                tracker.report(percent);
            })
            .await;

        match encoded {
            Ok(()) => {
                info!("Finished in {:.2}s", started.elapsed().as_secs_f64());
                succeeded(&plan, started)
            }
            Err(e) => {
                discard_partial_output(&plan).await;
                self.plan_failed(&plan, started, ConversionError::Encode(e))
            }
        }
    }

    fn plan_failed(
        &self,
        plan: &ConversionPlan,
        started: Instant,
        e: ConversionError,
    ) -> ConversionResult {
        error!(
            "There was a problem processing the conversion {} with the arguments {}: {}",
            plan.file_name(),
            plan.command_line(),
            e
        );
        failed(plan.file_name(), started, e)
    }
}

/// Remove whatever a failed encode left at the output path.
///
/// A non-empty output is skipped on the next run, so a truncated file must
/// not survive.
async fn discard_partial_output(plan: &ConversionPlan) {
    match tokio::fs::remove_file(plan.output()).await {
        Ok(()) => warn!("Removed incomplete output {}", plan.output().display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(
            "Could not remove incomplete output {}: {}",
            plan.output().display(),
            e
        ),
    }
}

fn succeeded(plan: &ConversionPlan, started: Instant) -> ConversionResult {
    ConversionResult {
        file_name: plan.file_name(),
        status: ConversionStatus::Succeeded,
        elapsed: started.elapsed(),
        error: None,
    }
}

fn failed(file_name: String, started: Instant, e: ConversionError) -> ConversionResult {
    ConversionResult {
        file_name,
        status: ConversionStatus::Failed,
        elapsed: started.elapsed(),
        error: Some(e),
    }
}
