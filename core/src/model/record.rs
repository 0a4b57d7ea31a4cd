use serde::{Deserialize, Serialize};

/// One classification as listed by `/api/classifications`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub system_class: String,
    pub confidence: f64,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
}

impl ClassificationRecord {
    pub fn new(
        system_class: impl Into<String>,
        confidence: f64,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            system_class: system_class.into(),
            confidence,
            timestamp: timestamp.into(),
            id: None,
            original_class: None,
            processing_time: None,
            model_type: None,
        }
    }
}

/// Body of `/api/classifications`. When its store is unavailable the
/// backend answers with an error object instead of a list; that reads as an
/// empty list, the same way an error body reads as an empty
/// [`StatisticsSnapshot`](super::StatisticsSnapshot).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ClassificationList {
    Records(Vec<ClassificationRecord>),
    Unavailable { error: String },
}

impl ClassificationList {
    pub fn into_records(self) -> Vec<ClassificationRecord> {
        match self {
            ClassificationList::Records(records) => records,
            ClassificationList::Unavailable { .. } => Vec::new(),
        }
    }
}

/// Prediction carried by a successful classify-now response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResult {
    pub system_class: String,
    pub confidence: f64,
}

/// Body of `/api/classify_now`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyNowResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ClassifyResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<f64>,
}

impl ClassifyNowResponse {
    pub fn classified(system_class: impl Into<String>, confidence: f64) -> Self {
        Self {
            success: true,
            result: Some(ClassifyResult {
                system_class: system_class.into(),
                confidence,
            }),
            error: None,
            processing_time: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(reason.into()),
            processing_time: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_tolerates_extra_backend_columns() {
        let record: ClassificationRecord = serde_json::from_str(
            r#"{"id":7,"timestamp":"2024-01-01 10:00:00","original_class":"glass","system_class":"VIDRO","system_index":2,"confidence":0.91,"image_path":null}"#,
        )
        .unwrap();
        assert_eq!(record.system_class, "VIDRO");
        assert_eq!(record.id, Some(7));
        assert_eq!(record.model_type, None);
    }

    #[test]
    fn error_body_decodes_as_empty_list() {
        let list: ClassificationList =
            serde_json::from_str(r#"{"error":"no such table: classifications"}"#).unwrap();
        assert_eq!(
            list,
            ClassificationList::Unavailable {
                error: "no such table: classifications".into()
            }
        );
        assert!(list.into_records().is_empty());

        let list: ClassificationList = serde_json::from_str(
            r#"[{"system_class":"METAL","confidence":0.7,"timestamp":"2024-01-01 10:00:00"}]"#,
        )
        .unwrap();
        assert_eq!(list.into_records().len(), 1);
    }

    #[test]
    fn failed_response_carries_reason() {
        let response: ClassifyNowResponse =
            serde_json::from_str(r#"{"success":false,"error":"Classification failed","processing_time":0.4}"#)
                .unwrap();
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Classification failed"));
        assert!(response.result.is_none());
    }
}
