use crate::model::{
    ClassificationRecord, ClassifyNowResponse, StatisticsSnapshot, SystemInfo, SystemStatus,
};
use crate::prelude::SyncResult;
use std::future::Future;

/// REST paths exposed by the classification backend.
pub mod endpoints {
    pub const STATISTICS: &str = "/api/statistics";
    pub const CLASSIFICATIONS: &str = "/api/classifications";
    pub const SYSTEM_STATUS: &str = "/api/system/status";
    pub const SYSTEM_INFO: &str = "/api/system_info";
    pub const CLASSIFY_NOW: &str = "/api/classify_now";
}

/// Source of the dashboard resources. Each call is one independent retrieval.
pub trait Backend {
    fn statistics(&self) -> impl Future<Output = SyncResult<StatisticsSnapshot>> + Send;
    fn classifications(&self) -> impl Future<Output = SyncResult<Vec<ClassificationRecord>>> + Send;
    fn system_status(&self) -> impl Future<Output = SyncResult<SystemStatus>> + Send;
    fn system_info(&self) -> impl Future<Output = SyncResult<SystemInfo>> + Send;
    fn classify_now(&self) -> impl Future<Output = SyncResult<ClassifyNowResponse>> + Send;
}
