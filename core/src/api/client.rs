use crate::api::backend::{endpoints, Backend};
use crate::config::DashboardConfig;
use crate::model::{
    ClassificationList, ClassificationRecord, ClassifyNowResponse, StatisticsSnapshot,
    SystemInfo, SystemStatus,
};
use crate::prelude::{SyncError, SyncResult};
use log::debug;
use serde::de::DeserializeOwned;

/// [`Backend`] over HTTP/JSON.
///
/// Response status codes are not inspected: the backend reports its own
/// failures inside JSON bodies, so only an unreachable host or a body that
/// does not decode counts as a failed retrieval.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &DashboardConfig) -> SyncResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| SyncError::Transport {
            resource: "client",
            reason: e.to_string(),
        })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        path: &str,
    ) -> SyncResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SyncError::Transport {
                resource,
                reason: e.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            debug!("{} answered {}", url, status);
        }
        let body = response.text().await.map_err(|e| SyncError::Transport {
            resource,
            reason: e.to_string(),
        })?;
        serde_json::from_str(&body).map_err(|e| SyncError::Decode {
            resource,
            reason: e.to_string(),
        })
    }
}

impl Backend for HttpBackend {
    async fn statistics(&self) -> SyncResult<StatisticsSnapshot> {
        self.get_json("statistics", endpoints::STATISTICS).await
    }

    async fn classifications(&self) -> SyncResult<Vec<ClassificationRecord>> {
        let list: ClassificationList = self
            .get_json("classifications", endpoints::CLASSIFICATIONS)
            .await?;
        if let ClassificationList::Unavailable { error } = &list {
            debug!("classifications unavailable: {}", error);
        }
        Ok(list.into_records())
    }

    async fn system_status(&self) -> SyncResult<SystemStatus> {
        self.get_json("system status", endpoints::SYSTEM_STATUS).await
    }

    async fn system_info(&self) -> SyncResult<SystemInfo> {
        self.get_json("system info", endpoints::SYSTEM_INFO).await
    }

    async fn classify_now(&self) -> SyncResult<ClassifyNowResponse> {
        self.get_json("classify now", endpoints::CLASSIFY_NOW).await
    }
}
