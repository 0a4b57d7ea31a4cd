//! Wire types reported by the classification backend.

pub mod record;
pub mod stats;
pub mod status;

pub use record::{ClassificationList, ClassificationRecord, ClassifyNowResponse, ClassifyResult};
pub use stats::{ClassCount, HourlyCount, StatisticsSnapshot};
pub use status::{StatusLevel, SystemInfo, SystemStatus};

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses a backend timestamp into local time.
///
/// Offset-carrying RFC 3339 values are converted; naive values are taken as
/// already local, which is how the backend writes them.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Local));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_naive_backend_timestamps() {
        let parsed = parse_timestamp("2024-05-02 14:00:00").unwrap();
        assert_eq!(parsed.hour(), 14);
        let iso = parse_timestamp("2024-05-02T09:15:30.125").unwrap();
        assert_eq!((iso.hour(), iso.minute()), (9, 15));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
    }
}
