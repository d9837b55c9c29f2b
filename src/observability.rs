use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{info, warn};

/// Step execution counters for one process lifetime
#[derive(Debug, Default)]
pub struct StepMetrics {
    pub steps_run: AtomicU64,
    pub steps_skipped: AtomicU64,
    pub steps_failed: AtomicU64,
}

impl StepMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_run(&self) {
        self.steps_run.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skip(&self) {
        self.steps_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.steps_failed.fetch_add(1, Ordering::Relaxed);
        warn!("Step failure recorded");
    }

    pub fn log_stats(&self) {
        info!(
            "Step metrics: run={}, skipped={}, failed={}",
            self.steps_run.load(Ordering::Relaxed),
            self.steps_skipped.load(Ordering::Relaxed),
            self.steps_failed.load(Ordering::Relaxed)
        );
    }
}

/// Global metrics instance
static STEP_METRICS: std::sync::LazyLock<StepMetrics> = std::sync::LazyLock::new(StepMetrics::new);

pub fn step_metrics() -> &'static StepMetrics {
    &STEP_METRICS
}

/// Time an operation and record it on drop-free completion
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }

    pub fn finish(self) -> std::time::Duration {
        let duration = self.start.elapsed();
        info!(
            operation = %self.operation,
            duration_ms = duration.as_millis() as u64,
            "Operation completed"
        );
        duration
    }
}
