use crate::scenario::config::ScenarioConfig;
use crate::scenario::stats::TIMESTAMP_FORMAT;
use chrono::{Duration, NaiveDateTime};
use dashcore::model::{ClassificationRecord, ClassifyResult};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// Stand-in for the image classifier: random class, bounded confidence.
pub struct MockClassifier {
    config: ScenarioConfig,
    rng: StdRng,
}

impl MockClassifier {
    pub fn new(config: ScenarioConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// One prediction, or the failure reason the backend would report.
    pub fn predict(&mut self) -> Result<ClassifyResult, String> {
        if self.rng.gen_bool(self.config.failure_rate) {
            return Err("Classification failed".into());
        }
        Ok(self.draw())
    }

    fn draw(&mut self) -> ClassifyResult {
        let system_class = self
            .config
            .classes
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| "LIXO".into());
        let raw = self
            .rng
            .gen_range(self.config.confidence_min..=self.config.confidence_max);
        ClassifyResult {
            system_class,
            confidence: (raw * 10_000.0).round() / 10_000.0,
        }
    }

    /// Startup history spread over the configured window, newest first.
    pub fn seed_history(&mut self, now: NaiveDateTime) -> Vec<ClassificationRecord> {
        let window_minutes = i64::from(self.config.seed_hours.max(1)) * 60;
        let mut history: Vec<(NaiveDateTime, ClassifyResult)> = (0..self.config.seed_records)
            .map(|_| {
                let age = self.rng.gen_range(0..window_minutes);
                (now - Duration::minutes(age), self.draw())
            })
            .collect();
        history.sort_by(|a, b| b.0.cmp(&a.0));
        history
            .into_iter()
            .map(|(time, result)| {
                let mut record = ClassificationRecord::new(
                    result.system_class,
                    result.confidence,
                    time.format(TIMESTAMP_FORMAT).to_string(),
                );
                record.model_type = Some("mock".into());
                record
            })
            .collect()
    }
}
