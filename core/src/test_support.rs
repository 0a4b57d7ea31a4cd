//! In-memory collaborators shared by the unit tests.

use crate::api::Backend;
use crate::charts::{ChartConfig, ChartId, ChartState};
use crate::dashboard::present::{ClassificationRow, StatusSummary};
use crate::model::{
    ClassCount, ClassificationRecord, ClassifyNowResponse, HourlyCount, StatisticsSnapshot,
    StatusLevel, SystemInfo, SystemStatus,
};
use crate::prelude::{ChartEngine, DashboardView, SyncError, SyncResult};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
pub enum ClassifyReply {
    Respond(ClassifyNowResponse),
    Unreachable,
}

#[derive(Clone)]
pub struct FakeBackend {
    stats: StatisticsSnapshot,
    classifications: Vec<ClassificationRecord>,
    status: SystemStatus,
    info: SystemInfo,
    failing: Option<&'static str>,
    delay: Duration,
    classify: ClassifyReply,
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl FakeBackend {
    pub fn sample() -> Self {
        Self {
            stats: StatisticsSnapshot {
                by_class: Some(vec![ClassCount::new("A", 3), ClassCount::new("B", 1)]),
                hourly_data: Some(vec![
                    HourlyCount::new("2024-03-01 11:00:00", 3),
                    HourlyCount::new("2024-03-01 10:00:00", 1),
                ]),
                total_classifications: Some(4),
                ..Default::default()
            },
            classifications: vec![
                ClassificationRecord::new("A", 0.2, "2024-03-01 11:20:00"),
                ClassificationRecord::new("A", 0.55, "2024-03-01 11:05:00"),
                ClassificationRecord::new("B", 0.81, "2024-03-01 10:40:00"),
            ],
            status: SystemStatus::new(StatusLevel::Operational),
            info: SystemInfo(json!({"platform": "Linux"})),
            failing: None,
            delay: Duration::ZERO,
            classify: ClassifyReply::Respond(ClassifyNowResponse::classified("X", 0.873)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(mut self, resource: &'static str) -> Self {
        self.failing = Some(resource);
        self
    }

    /// Delays every successful retrieval; failures return immediately.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_classify(mut self, reply: ClassifyReply) -> Self {
        self.classify = reply;
        self
    }

    /// Resources in the order their retrievals settled.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, resource: &str) -> usize {
        self.calls().iter().filter(|call| **call == resource).count()
    }

    async fn resolve<T: Clone + Sync>(&self, resource: &'static str, value: &T) -> SyncResult<T> {
        let fails = self.failing == Some(resource);
        if !fails && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.calls.lock().unwrap().push(resource);
        if fails {
            return Err(SyncError::Transport {
                resource,
                reason: "connection refused".into(),
            });
        }
        Ok(value.clone())
    }
}

impl Backend for FakeBackend {
    async fn statistics(&self) -> SyncResult<StatisticsSnapshot> {
        self.resolve("statistics", &self.stats).await
    }

    async fn classifications(&self) -> SyncResult<Vec<ClassificationRecord>> {
        self.resolve("classifications", &self.classifications).await
    }

    async fn system_status(&self) -> SyncResult<SystemStatus> {
        self.resolve("system status", &self.status).await
    }

    async fn system_info(&self) -> SyncResult<SystemInfo> {
        self.resolve("system info", &self.info).await
    }

    async fn classify_now(&self) -> SyncResult<ClassifyNowResponse> {
        self.calls.lock().unwrap().push("classify now");
        match &self.classify {
            ClassifyReply::Respond(response) => Ok(response.clone()),
            ClassifyReply::Unreachable => Err(SyncError::Transport {
                resource: "classify now",
                reason: "connection reset".into(),
            }),
        }
    }
}

#[derive(Default)]
pub struct NullEngine {
    pub redraws: Vec<ChartId>,
}

impl ChartEngine for NullEngine {
    fn create(&mut self, _id: ChartId, _config: &ChartConfig) {}

    fn redraw(&mut self, id: ChartId, _state: &ChartState) {
        self.redraws.push(id);
    }
}

#[derive(Default)]
pub struct RecordingView {
    pub loading: Vec<bool>,
    pub status: Option<StatusSummary>,
    pub rows: Option<Vec<ClassificationRow>>,
    pub auto_refresh_label: String,
}

impl DashboardView for RecordingView {
    fn set_loading(&mut self, loading: bool) {
        self.loading.push(loading);
    }

    fn render_status(&mut self, summary: &StatusSummary, _info: &SystemInfo) {
        self.status = Some(summary.clone());
    }

    fn render_classifications(&mut self, rows: &[ClassificationRow]) {
        self.rows = Some(rows.to_vec());
    }

    fn set_auto_refresh_label(&mut self, label: &str) {
        self.auto_refresh_label = label.to_string();
    }
}
