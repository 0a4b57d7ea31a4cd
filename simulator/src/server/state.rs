use crate::generator::classifier::MockClassifier;
use crate::scenario::stats::{aggregate, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use dashcore::model::{
    ClassificationRecord, ClassifyNowResponse, StatisticsSnapshot, StatusLevel, SystemInfo,
    SystemStatus,
};
use serde_json::json;
use std::time::Instant;

/// Failures in a row before the backend reports itself degraded.
const DEGRADED_AFTER: u32 = 3;
pub const RECENT_LIMIT: usize = 50;

/// In-memory backend: classification history plus the mock classifier.
pub struct BackendState {
    classifier: MockClassifier,
    /// Newest first.
    history: Vec<ClassificationRecord>,
    next_id: u64,
    consecutive_failures: u32,
    started: Instant,
}

impl BackendState {
    pub fn new(mut classifier: MockClassifier, now: NaiveDateTime) -> Self {
        let mut history = classifier.seed_history(now);
        for (index, record) in history.iter_mut().rev().enumerate() {
            record.id = Some(index as u64 + 1);
        }
        let next_id = history.len() as u64 + 1;
        Self {
            classifier,
            history,
            next_id,
            consecutive_failures: 0,
            started: Instant::now(),
        }
    }

    pub fn classify(&mut self, now: NaiveDateTime) -> ClassifyNowResponse {
        let started = Instant::now();
        let mut response = match self.classifier.predict() {
            Ok(result) => {
                self.consecutive_failures = 0;
                let mut record = ClassificationRecord::new(
                    result.system_class.clone(),
                    result.confidence,
                    now.format(TIMESTAMP_FORMAT).to_string(),
                );
                record.id = Some(self.next_id);
                record.model_type = Some("mock".into());
                self.next_id += 1;
                self.history.insert(0, record);
                self.history.truncate(self.classifier.config().max_history.max(1));
                ClassifyNowResponse::classified(result.system_class, result.confidence)
            }
            Err(reason) => {
                self.consecutive_failures += 1;
                ClassifyNowResponse::failed(reason)
            }
        };
        response.processing_time = Some(started.elapsed().as_secs_f64());
        response
    }

    pub fn recent(&self) -> Vec<ClassificationRecord> {
        self.history.iter().take(RECENT_LIMIT).cloned().collect()
    }

    pub fn statistics(&self) -> StatisticsSnapshot {
        let mut stats = aggregate(&self.history);
        stats.server_uptime = Some(self.uptime());
        stats.device_count = Some(0);
        stats
    }

    pub fn status(&self) -> SystemStatus {
        if self.consecutive_failures >= DEGRADED_AFTER {
            SystemStatus {
                status: StatusLevel::Degraded,
                message: Some(format!(
                    "{} classification failures in a row",
                    self.consecutive_failures
                )),
            }
        } else {
            SystemStatus::new(StatusLevel::Operational)
        }
    }

    pub fn system_info(&self) -> SystemInfo {
        let cpus = std::thread::available_parallelism()
            .map(|count| count.get())
            .unwrap_or(1);
        SystemInfo(json!({
            "platform": std::env::consts::OS,
            "architecture": std::env::consts::ARCH,
            "cpu_count": cpus,
            "model": "mock",
            "version": env!("CARGO_PKG_VERSION"),
            "uptime": self.uptime(),
        }))
    }

    fn uptime(&self) -> String {
        let seconds = self.started.elapsed().as_secs();
        format!(
            "{}:{:02}:{:02}",
            seconds / 3600,
            (seconds / 60) % 60,
            seconds % 60
        )
    }
}
