use crate::api::Backend;
use crate::model::{ClassificationRecord, StatisticsSnapshot, SystemInfo, SystemStatus};
use crate::prelude::{RenderCallbacks, SyncResult};
use crate::telemetry::MetricsRecorder;
use log::{debug, warn};
use std::sync::Arc;

/// Message shown when a refresh cycle or request cannot reach the backend.
pub const CONNECTION_ERROR: &str = "Could not connect to the classification server";

/// Everything one refresh cycle retrieves.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshPayload {
    pub stats: StatisticsSnapshot,
    pub classifications: Vec<ClassificationRecord>,
    pub status: SystemStatus,
    pub info: SystemInfo,
}

/// Fetches the dashboard resources and hands them to render callbacks.
pub struct DataSync<B: Backend> {
    backend: B,
    metrics: Arc<MetricsRecorder>,
}

impl<B: Backend> DataSync<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn metrics(&self) -> Arc<MetricsRecorder> {
        Arc::clone(&self.metrics)
    }

    /// Retrieves all four resources concurrently. Every retrieval settles
    /// before the outcome is decided; any failure fails the whole cycle.
    pub async fn fetch(&self) -> SyncResult<RefreshPayload> {
        let (stats, classifications, status, info) = tokio::join!(
            self.backend.statistics(),
            self.backend.classifications(),
            self.backend.system_status(),
            self.backend.system_info(),
        );
        Ok(RefreshPayload {
            stats: stats?,
            classifications: classifications?,
            status: status?,
            info: info?,
        })
    }

    /// Runs one refresh cycle. Renders everything or nothing; the loading-end
    /// hook fires on both paths.
    pub async fn refresh<R: RenderCallbacks + ?Sized>(&self, render: &mut R) -> SyncResult<()> {
        render.on_loading_start();
        let outcome = match self.fetch().await {
            Ok(payload) => {
                render.on_status(&payload.status, &payload.stats, &payload.info);
                render.on_classifications(&payload.classifications);
                render.on_charts(&payload.stats, &payload.classifications);
                self.metrics.record_completed();
                debug!(
                    "refresh cycle rendered {} classifications",
                    payload.classifications.len()
                );
                Ok(())
            }
            Err(err) => {
                warn!("refresh cycle failed: {}", err);
                self.metrics.record_failed();
                render.on_error(CONNECTION_ERROR);
                Err(err)
            }
        };
        render.on_loading_end();
        outcome
    }
}
