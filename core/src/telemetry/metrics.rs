use std::sync::Mutex;

/// Counts refresh cycles by outcome.
///
/// `DataSync` records every cycle here; front ends read [`Self::snapshot`]
/// to show how many polls reached the backend and how many were lost.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub completed: usize,
    pub failed: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_completed(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.completed += 1;
        }
    }

    pub fn record_failed(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.failed += 1;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_outcomes_separately() {
        let recorder = MetricsRecorder::new();
        recorder.record_completed();
        recorder.record_completed();
        recorder.record_failed();
        assert_eq!(
            recorder.snapshot(),
            Metrics {
                completed: 2,
                failed: 1
            }
        );
    }
}
