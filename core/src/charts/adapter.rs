use crate::charts::buckets::ConfidenceBuckets;
use crate::charts::series::{ChartConfig, ChartId, ChartState};
use crate::model::{parse_timestamp, ClassificationRecord, StatisticsSnapshot};
use crate::prelude::ChartEngine;
use log::debug;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Owns the series of every dashboard chart and pushes redraws to the engine.
pub struct ChartAdapter<E: ChartEngine> {
    engine: E,
    charts: BTreeMap<ChartId, ChartState>,
    hour_format: String,
}

impl<E: ChartEngine> ChartAdapter<E> {
    pub fn new(engine: E, hour_format: impl Into<String>) -> Self {
        Self {
            engine,
            charts: BTreeMap::new(),
            hour_format: hour_format.into(),
        }
    }

    /// Creates the three charts with empty series.
    pub fn initialize(&mut self) {
        for id in ChartId::ALL {
            let config = ChartConfig::for_chart(id);
            self.engine.create(id, &config);
            self.charts.insert(id, ChartState::new(&config));
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.charts.len() == ChartId::ALL.len()
    }

    pub fn state(&self, id: ChartId) -> Option<&ChartState> {
        self.charts.get(&id)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Applies one refresh cycle. Returns the charts that were redrawn; the
    /// others keep their previous series.
    pub fn update(
        &mut self,
        stats: &StatisticsSnapshot,
        classifications: &[ClassificationRecord],
    ) -> Vec<ChartId> {
        let mut updated = Vec::new();
        if self.update_class_distribution(stats) {
            updated.push(ChartId::ClassDistribution);
        }
        if self.update_hourly_activity(stats) {
            updated.push(ChartId::HourlyActivity);
        }
        if self.update_confidence_distribution(classifications) {
            updated.push(ChartId::ConfidenceDistribution);
        }
        for id in &updated {
            self.redraw(*id);
        }
        debug!("charts updated: {:?}", updated);
        updated
    }

    fn update_class_distribution(&mut self, stats: &StatisticsSnapshot) -> bool {
        let (Some(by_class), Some(chart)) = (
            stats.by_class.as_ref(),
            self.charts.get_mut(&ChartId::ClassDistribution),
        ) else {
            return false;
        };
        let labels = by_class.iter().map(|item| item.class_name.clone()).collect();
        let data = by_class.iter().map(|item| item.count as f64).collect();
        chart.replace(Some(labels), data);
        true
    }

    fn update_hourly_activity(&mut self, stats: &StatisticsSnapshot) -> bool {
        let (Some(hourly), Some(chart)) = (
            stats.hourly_data.as_ref(),
            self.charts.get_mut(&ChartId::HourlyActivity),
        ) else {
            return false;
        };
        // Backend order is newest-first.
        let chronological: Vec<_> = hourly.iter().rev().collect();
        let labels = chronological
            .iter()
            .map(|item| hour_label(&item.hour, &self.hour_format))
            .collect();
        let data = chronological.iter().map(|item| item.count as f64).collect();
        chart.replace(Some(labels), data);
        true
    }

    fn update_confidence_distribution(&mut self, classifications: &[ClassificationRecord]) -> bool {
        if classifications.is_empty() {
            return false;
        }
        let Some(chart) = self.charts.get_mut(&ChartId::ConfidenceDistribution) else {
            return false;
        };
        let counts = ConfidenceBuckets::histogram(classifications);
        chart.replace(None, counts.iter().map(|&count| count as f64).collect());
        true
    }

    fn redraw(&mut self, id: ChartId) {
        if let Some(state) = self.charts.get(&id) {
            self.engine.redraw(id, state);
        }
    }
}

/// Hour-only label for a backend hour key. Unparseable keys are shown as-is.
pub fn hour_label(raw: &str, format: &str) -> String {
    let Some(time) = parse_timestamp(raw) else {
        return raw.to_string();
    };
    let mut label = String::new();
    if write!(label, "{}", time.format(format)).is_err() {
        return raw.to_string();
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassCount, HourlyCount};

    #[derive(Default)]
    struct RecordingEngine {
        created: Vec<ChartId>,
        redraws: Vec<ChartId>,
    }

    impl ChartEngine for RecordingEngine {
        fn create(&mut self, id: ChartId, _config: &ChartConfig) {
            self.created.push(id);
        }

        fn redraw(&mut self, id: ChartId, _state: &ChartState) {
            self.redraws.push(id);
        }
    }

    fn adapter() -> ChartAdapter<RecordingEngine> {
        let mut adapter = ChartAdapter::new(RecordingEngine::default(), "%H");
        adapter.initialize();
        adapter
    }

    fn hourly(hours: &[(&str, u64)]) -> StatisticsSnapshot {
        StatisticsSnapshot {
            hourly_data: Some(
                hours
                    .iter()
                    .map(|(hour, count)| HourlyCount::new(*hour, *count))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn initialize_creates_all_charts() {
        let adapter = adapter();
        assert!(adapter.is_initialized());
        assert_eq!(adapter.engine().created, ChartId::ALL.to_vec());
        assert!(adapter.engine().redraws.is_empty());
    }

    #[test]
    fn class_distribution_replaces_labels_and_data() {
        let mut adapter = adapter();
        let stats = StatisticsSnapshot {
            by_class: Some(vec![ClassCount::new("A", 3), ClassCount::new("B", 1)]),
            ..Default::default()
        };
        let updated = adapter.update(&stats, &[]);
        assert_eq!(updated, vec![ChartId::ClassDistribution]);

        let chart = adapter.state(ChartId::ClassDistribution).unwrap();
        assert_eq!(chart.labels, vec!["A", "B"]);
        assert_eq!(chart.values(), &[3.0, 1.0]);
        assert_eq!(adapter.engine().redraws, vec![ChartId::ClassDistribution]);
    }

    #[test]
    fn hourly_activity_is_chronological() {
        let mut adapter = adapter();
        adapter.update(
            &hourly(&[
                ("2024-03-01 12:00:00", 7),
                ("2024-03-01 11:00:00", 5),
                ("2024-03-01 10:00:00", 2),
            ]),
            &[],
        );
        let chart = adapter.state(ChartId::HourlyActivity).unwrap();
        assert_eq!(chart.labels, vec!["10", "11", "12"]);
        assert_eq!(chart.values(), &[2.0, 5.0, 7.0]);
    }

    #[test]
    fn reversing_twice_restores_input_order() {
        let mut adapter = adapter();
        let newest_first = [("2024-03-01 09:00:00", 1), ("2024-03-01 08:00:00", 4)];
        adapter.update(&hourly(&newest_first), &[]);
        let first: Vec<String> = adapter.state(ChartId::HourlyActivity).unwrap().labels.clone();
        assert_eq!(first, vec!["08", "09"]);

        let oldest_first = [("2024-03-01 08:00:00", 4), ("2024-03-01 09:00:00", 1)];
        adapter.update(&hourly(&oldest_first), &[]);
        let second = &adapter.state(ChartId::HourlyActivity).unwrap().labels;
        assert_eq!(second, &vec!["09", "08"]);
    }

    #[test]
    fn confidence_distribution_recomputes_each_update() {
        let mut adapter = adapter();
        let records = vec![
            ClassificationRecord::new("A", 0.2, ""),
            ClassificationRecord::new("A", 0.55, ""),
            ClassificationRecord::new("B", 0.81, ""),
        ];
        adapter.update(&StatisticsSnapshot::default(), &records);
        assert_eq!(
            adapter.state(ChartId::ConfidenceDistribution).unwrap().values(),
            &[1.0, 0.0, 1.0, 0.0, 1.0]
        );

        adapter.update(&StatisticsSnapshot::default(), &records[..1]);
        assert_eq!(
            adapter.state(ChartId::ConfidenceDistribution).unwrap().values(),
            &[1.0, 0.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn missing_payload_keeps_previous_state() {
        let mut adapter = adapter();
        let stats = StatisticsSnapshot {
            by_class: Some(vec![ClassCount::new("A", 2)]),
            ..Default::default()
        };
        adapter.update(&stats, &[ClassificationRecord::new("A", 0.9, "")]);
        let redraws_before = adapter.engine().redraws.len();

        let updated = adapter.update(&StatisticsSnapshot::default(), &[]);
        assert!(updated.is_empty());
        assert_eq!(adapter.engine().redraws.len(), redraws_before);
        assert_eq!(
            adapter.state(ChartId::ClassDistribution).unwrap().labels,
            vec!["A"]
        );
        assert_eq!(
            adapter.state(ChartId::ConfidenceDistribution).unwrap().values(),
            &[0.0, 0.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn uninitialized_adapter_ignores_updates() {
        let mut adapter = ChartAdapter::new(RecordingEngine::default(), "%H");
        let stats = StatisticsSnapshot {
            by_class: Some(vec![ClassCount::new("A", 2)]),
            ..Default::default()
        };
        assert!(adapter
            .update(&stats, &[ClassificationRecord::new("A", 0.5, "")])
            .is_empty());
        assert!(adapter.engine().redraws.is_empty());
    }

    #[test]
    fn unparseable_hours_are_shown_verbatim() {
        assert_eq!(hour_label("not-a-time", "%H"), "not-a-time");
        assert_eq!(hour_label("2024-03-01 18:00:00", "%Hh"), "18h");
    }
}
