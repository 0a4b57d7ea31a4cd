use crate::prelude::ConfigError;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Runtime settings for a dashboard instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub base_url: String,
    pub refresh_interval_ms: u64,
    pub notification_display_ms: u64,
    pub notification_exit_ms: u64,
    /// chrono strftime pattern used for hourly activity labels.
    pub hour_label_format: String,
    pub request_timeout_ms: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".into(),
            refresh_interval_ms: 10_000,
            notification_display_ms: 4_000,
            notification_exit_ms: 300,
            hour_label_format: "%H".into(),
            request_timeout_ms: None,
        }
    }
}

impl DashboardConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config: DashboardConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".into()));
        }
        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "refresh_interval_ms must be positive".into(),
            ));
        }
        let bad_format = StrftimeItems::new(&self.hour_label_format)
            .any(|item| matches!(item, Item::Error));
        if self.hour_label_format.trim().is_empty() || bad_format {
            return Err(ConfigError::Invalid(format!(
                "unusable hour_label_format {:?}",
                self.hour_label_format
            )));
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn notification_display(&self) -> Duration {
        Duration::from_millis(self.notification_display_ms)
    }

    pub fn notification_exit(&self) -> Duration {
        Duration::from_millis(self.notification_exit_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_dashboard_cadence() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(10));
        assert_eq!(cfg.notification_display(), Duration::from_millis(4000));
        assert_eq!(cfg.notification_exit(), Duration::from_millis(300));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn load_reads_partial_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"base_url: http://backend:8080\nrefresh_interval_ms: 2500\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = DashboardConfig::load(&path).unwrap();
        assert_eq!(cfg.base_url, "http://backend:8080");
        assert_eq!(cfg.refresh_interval_ms, 2500);
        assert_eq!(cfg.notification_display_ms, 4000);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let cfg = DashboardConfig {
            refresh_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn broken_hour_format_is_rejected() {
        let cfg = DashboardConfig {
            hour_label_format: "%Q".into(),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
