use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Health level reported by `/api/system/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Operational,
    Degraded,
    Offline,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub status: StatusLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SystemStatus {
    pub fn new(status: StatusLevel) -> Self {
        Self {
            status,
            message: None,
        }
    }
}

/// Opaque host metadata from `/api/system_info`, passed through for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemInfo(pub Value);

impl SystemInfo {
    /// Top-level key/value pairs, for an info panel. Non-object payloads
    /// yield nothing.
    pub fn entries(&self) -> Vec<(String, String)> {
        match &self.0 {
            Value::Object(map) => map
                .iter()
                .map(|(key, value)| {
                    let shown = match value {
                        Value::String(text) => text.clone(),
                        other => other.to_string(),
                    };
                    (key.clone(), shown)
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}
