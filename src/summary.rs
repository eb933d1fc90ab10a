//! Aggregate outcome of a batch run.

use crate::executor::{ConversionResult, ConversionStatus};
use std::time::Duration;
use tracing::{info, warn};

/// Counters accumulated over every conversion result of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files handed to the executor.
    pub total: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Wall-clock time from the first plan start to the last completion.
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// Fold results left to right into a summary.
    pub fn from_results<'a>(
        total: usize,
        results: impl IntoIterator<Item = &'a ConversionResult>,
    ) -> Self {
        results.into_iter().fold(Self::new(total), |mut summary, result| {
            summary.record(result);
            summary
        })
    }

    pub fn record(&mut self, result: &ConversionResult) {
        match result.status {
            ConversionStatus::Succeeded => self.succeeded += 1,
            ConversionStatus::Skipped => self.skipped += 1,
            ConversionStatus::Failed => self.failed += 1,
        }
    }

    /// Number of files that reached a terminal state.
    pub fn completed(&self) -> usize {
        self.succeeded + self.skipped + self.failed
    }

    /// Files never started because the run was stopped.
    pub fn not_started(&self) -> usize {
        self.total.saturating_sub(self.completed())
    }

    pub fn log(&self) {
        info!(
            "Finished all conversions in {:.2}s",
            self.elapsed.as_secs_f64()
        );
        info!(
            "Skipped {} files, {} files failed to be transcoded",
            self.skipped, self.failed
        );
        if self.not_started() > 0 {
            warn!("{} files were not started", self.not_started());
        }
    }
}
