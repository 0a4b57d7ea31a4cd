use chrono::{NaiveDateTime, Timelike};
use dashcore::model::{ClassCount, ClassificationRecord, HourlyCount, StatisticsSnapshot};
use std::collections::BTreeMap;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const HOUR_FORMAT: &str = "%Y-%m-%d %H:00:00";
const HOURS_REPORTED: usize = 24;

/// Aggregates the history the way the production backend reports it:
/// per-class counts and per-hour counts, newest hour first.
pub fn aggregate(history: &[ClassificationRecord]) -> StatisticsSnapshot {
    let mut by_class: BTreeMap<&str, u64> = BTreeMap::new();
    let mut by_hour: BTreeMap<NaiveDateTime, u64> = BTreeMap::new();
    let mut confidence_sum = 0.0;

    for record in history {
        *by_class.entry(record.system_class.as_str()).or_default() += 1;
        confidence_sum += record.confidence;
        if let Ok(time) = NaiveDateTime::parse_from_str(&record.timestamp, TIMESTAMP_FORMAT) {
            let hour = time.date().and_hms_opt(time.hour(), 0, 0).unwrap_or(time);
            *by_hour.entry(hour).or_default() += 1;
        }
    }

    let average = if history.is_empty() {
        0.0
    } else {
        (confidence_sum / history.len() as f64 * 1000.0).round() / 1000.0
    };

    StatisticsSnapshot {
        by_class: Some(
            by_class
                .into_iter()
                .map(|(class_name, count)| ClassCount::new(class_name, count))
                .collect(),
        ),
        hourly_data: Some(
            by_hour
                .into_iter()
                .rev()
                .take(HOURS_REPORTED)
                .map(|(hour, count)| HourlyCount::new(hour.format(HOUR_FORMAT).to_string(), count))
                .collect(),
        ),
        total_classifications: Some(history.len() as u64),
        average_confidence: Some(average),
        server_uptime: None,
        device_count: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_classes_and_hours_newest_first() {
        let history = vec![
            ClassificationRecord::new("METAL", 0.9, "2024-03-01 11:45:00"),
            ClassificationRecord::new("VIDRO", 0.7, "2024-03-01 11:05:00"),
            ClassificationRecord::new("METAL", 0.8, "2024-03-01 09:30:00"),
        ];
        let stats = aggregate(&history);

        assert_eq!(
            stats.by_class.unwrap(),
            vec![ClassCount::new("METAL", 2), ClassCount::new("VIDRO", 1)]
        );
        assert_eq!(
            stats.hourly_data.unwrap(),
            vec![
                HourlyCount::new("2024-03-01 11:00:00", 2),
                HourlyCount::new("2024-03-01 09:00:00", 1),
            ]
        );
        assert_eq!(stats.total_classifications, Some(3));
        assert_eq!(stats.average_confidence, Some(0.8));
    }

    #[test]
    fn empty_history_reports_zeroes() {
        let stats = aggregate(&[]);
        assert_eq!(stats.by_class, Some(Vec::new()));
        assert_eq!(stats.average_confidence, Some(0.0));
    }
}
