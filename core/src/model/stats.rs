use serde::{Deserialize, Serialize};

/// Per-class classification count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCount {
    #[serde(rename = "class")]
    pub class_name: String,
    pub count: u64,
}

impl ClassCount {
    pub fn new(class_name: impl Into<String>, count: u64) -> Self {
        Self {
            class_name: class_name.into(),
            count,
        }
    }
}

/// Classifications observed within one hour. The backend reports these
/// newest-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyCount {
    pub hour: String,
    pub count: u64,
}

impl HourlyCount {
    pub fn new(hour: impl Into<String>, count: u64) -> Self {
        Self {
            hour: hour.into(),
            count,
        }
    }
}

/// Aggregated statistics returned by `/api/statistics`.
///
/// Every field is optional: an error body from the backend still decodes and
/// simply leaves the charts untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_class: Option<Vec<ClassCount>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_data: Option<Vec<HourlyCount>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_classifications: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_uptime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_class_key() {
        let stats: StatisticsSnapshot = serde_json::from_str(
            r#"{"by_class":[{"class":"A","count":3}],"hourly_data":[{"hour":"2024-01-01 10:00:00","count":2}]}"#,
        )
        .unwrap();
        assert_eq!(stats.by_class.unwrap()[0], ClassCount::new("A", 3));
        assert_eq!(stats.hourly_data.unwrap()[0].count, 2);
    }

    #[test]
    fn error_body_decodes_as_empty_snapshot() {
        let stats: StatisticsSnapshot =
            serde_json::from_str(r#"{"error":"db offline","timestamp":"now"}"#).unwrap();
        assert_eq!(stats, StatisticsSnapshot::default());
    }
}
