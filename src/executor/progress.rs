use tracing::info;

/// Logs encoder progress for one plan, dropping repeated percentages.
#[derive(Debug)]
pub struct ProgressTracker {
    file_name: String,
    last_percent: u8,
}

impl ProgressTracker {
    /// Start tracking at 0%.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            last_percent: 0,
        }
    }

    /// Record a progress report, logging it if it changed.
    ///
    /// Returns whether a line was emitted.
    pub fn report(&mut self, percent: u8) -> bool {
        if percent == self.last_percent {
            return false;
        }
        self.last_percent = percent;
        info!("Current progress: {}% for {}", percent, self.file_name);
        true
    }
}
