use crate::model::{
    parse_timestamp, ClassificationRecord, StatisticsSnapshot, StatusLevel, SystemStatus,
};

pub const EMPTY_CLASSIFICATIONS: &str = "No classifications yet.";

pub fn status_text(level: StatusLevel) -> &'static str {
    match level {
        StatusLevel::Operational => "Operational",
        StatusLevel::Degraded => "Degraded",
        StatusLevel::Offline | StatusLevel::Unknown => "Offline",
    }
}

/// Ratio in `[0, 1]` as a percentage with one decimal, e.g. `87.3%`.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|time| time.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Normalized content of the status panel.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSummary {
    pub level: StatusLevel,
    pub text: &'static str,
    pub message: Option<String>,
    /// Whichever aggregate figures the backend reported.
    pub details: Vec<(&'static str, String)>,
}

impl StatusSummary {
    pub fn new(status: &SystemStatus, stats: &StatisticsSnapshot) -> Self {
        let mut details = Vec::new();
        if let Some(total) = stats.total_classifications {
            details.push(("Total classifications", total.to_string()));
        }
        if let Some(average) = stats.average_confidence {
            details.push(("Average confidence", format_percent(average)));
        }
        if let Some(uptime) = &stats.server_uptime {
            details.push(("Server uptime", uptime.clone()));
        }
        if let Some(devices) = stats.device_count {
            details.push(("Connected devices", devices.to_string()));
        }
        Self {
            level: status.status,
            text: status_text(status.status),
            message: status.message.clone(),
            details,
        }
    }
}

/// One line of the recent classifications list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRow {
    pub class_name: String,
    pub timestamp: String,
    pub confidence: String,
}

impl From<&ClassificationRecord> for ClassificationRow {
    fn from(record: &ClassificationRecord) -> Self {
        Self {
            class_name: record.system_class.clone(),
            timestamp: format_timestamp(&record.timestamp),
            confidence: format_percent(record.confidence),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_reads_offline() {
        assert_eq!(status_text(StatusLevel::Operational), "Operational");
        assert_eq!(status_text(StatusLevel::Degraded), "Degraded");
        assert_eq!(status_text(StatusLevel::Unknown), "Offline");
    }

    #[test]
    fn rows_format_confidence_and_time() {
        let row = ClassificationRow::from(&ClassificationRecord::new(
            "PLASTICO",
            0.873,
            "2024-03-01T10:40:05",
        ));
        assert_eq!(row.confidence, "87.3%");
        assert_eq!(row.timestamp, "2024-03-01 10:40:05");
        assert_eq!(row.class_name, "PLASTICO");
    }

    #[test]
    fn summary_lists_reported_figures_only() {
        let stats = StatisticsSnapshot {
            total_classifications: Some(12),
            average_confidence: Some(0.8),
            ..Default::default()
        };
        let summary = StatusSummary::new(&SystemStatus::new(StatusLevel::Degraded), &stats);
        assert_eq!(summary.text, "Degraded");
        assert_eq!(
            summary.details,
            vec![
                ("Total classifications", "12".to_string()),
                ("Average confidence", "80.0%".to_string()),
            ]
        );
    }
}
