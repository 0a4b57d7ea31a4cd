use crate::api::Backend;
use crate::charts::ChartAdapter;
use crate::config::DashboardConfig;
use crate::dashboard::control::{BusyGuard, BUSY_LABEL};
use crate::dashboard::present::{format_percent, ClassificationRow, StatusSummary};
use crate::model::{
    ClassificationRecord, ClassifyNowResponse, ClassifyResult, StatisticsSnapshot, SystemInfo,
    SystemStatus,
};
use crate::notify::NotificationManager;
use crate::prelude::{ChartEngine, DashboardView, RenderCallbacks, SyncResult, TriggerControl};
use crate::refresh::{AutoRefreshController, RefreshState};
use crate::sync::{DataSync, CONNECTION_ERROR};
use crate::telemetry::MetricsRecorder;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::SendError};

/// User actions delivered to [`DashboardController::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardCommand {
    Refresh,
    ClassifyNow,
    ToggleAutoRefresh,
    Shutdown,
}

/// How a classify-now request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyOutcome {
    Classified(ClassifyResult),
    /// The backend answered with `success: false` and this reason.
    Rejected(String),
    Unreachable,
    /// Another request is still in flight.
    Busy,
}

/// Sending half of the command channel returned by
/// [`DashboardController::command_channel`].
///
/// A classify-now request is claimed when it is sent and released once the
/// loop has handled it. Further classify-now sends in between are dropped,
/// so clicks made while earlier work is still queued never reach the backend.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<DashboardCommand>,
    classify_pending: Arc<AtomicBool>,
}

impl CommandSender {
    /// Queues `command`. `Ok(false)` means a classify-now request was already
    /// pending and this one was dropped.
    pub fn send(&self, command: DashboardCommand) -> Result<bool, SendError<DashboardCommand>> {
        let classify = command == DashboardCommand::ClassifyNow;
        if classify && self.classify_pending.swap(true, Ordering::AcqRel) {
            return Ok(false);
        }
        self.tx.send(command).map(|()| true).map_err(|err| {
            if classify {
                self.classify_pending.store(false, Ordering::Release);
            }
            err
        })
    }

    pub fn classify_pending(&self) -> bool {
        self.classify_pending.load(Ordering::Acquire)
    }
}

enum LoopEvent {
    Tick,
    Command(Option<DashboardCommand>),
}

/// Routes a refresh cycle to the view, the charts and the notifications.
struct ViewRenderer<'a, E: ChartEngine, V: DashboardView> {
    view: &'a mut V,
    charts: &'a mut ChartAdapter<E>,
    notifications: &'a NotificationManager,
}

impl<E: ChartEngine, V: DashboardView> RenderCallbacks for ViewRenderer<'_, E, V> {
    fn on_loading_start(&mut self) {
        self.view.set_loading(true);
    }

    fn on_loading_end(&mut self) {
        self.view.set_loading(false);
    }

    fn on_status(&mut self, status: &SystemStatus, stats: &StatisticsSnapshot, info: &SystemInfo) {
        self.view.render_status(&StatusSummary::new(status, stats), info);
    }

    fn on_classifications(&mut self, records: &[ClassificationRecord]) {
        let rows: Vec<ClassificationRow> = records.iter().map(ClassificationRow::from).collect();
        self.view.render_classifications(&rows);
    }

    fn on_charts(&mut self, stats: &StatisticsSnapshot, records: &[ClassificationRecord]) {
        self.charts.update(stats, records);
    }

    fn on_error(&mut self, message: &str) {
        self.notifications.error(message);
    }
}

/// Owns every dashboard component for one dashboard instance.
pub struct DashboardController<B: Backend, E: ChartEngine, V: DashboardView> {
    sync: DataSync<B>,
    charts: ChartAdapter<E>,
    notifications: NotificationManager,
    auto_refresh: AutoRefreshController,
    view: V,
    classify_pending: Arc<AtomicBool>,
}

impl<B: Backend, E: ChartEngine, V: DashboardView> DashboardController<B, E, V> {
    /// Builds the components and creates the charts. The timer is not
    /// started until [`Self::start_auto_refresh`] or [`Self::run`].
    pub fn new(config: &DashboardConfig, backend: B, engine: E, mut view: V) -> Self {
        let mut charts = ChartAdapter::new(engine, config.hour_label_format.clone());
        charts.initialize();
        let auto_refresh = AutoRefreshController::new(config.refresh_interval());
        view.set_auto_refresh_label(auto_refresh.label());
        Self {
            sync: DataSync::new(backend),
            charts,
            notifications: NotificationManager::new(
                config.notification_display(),
                config.notification_exit(),
            ),
            auto_refresh,
            view,
            classify_pending: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Command channel for [`Self::run`] with classify-now deduplication on
    /// the sending side.
    pub fn command_channel(&self) -> (CommandSender, mpsc::UnboundedReceiver<DashboardCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sender = CommandSender {
            tx,
            classify_pending: self.classify_pending.clone(),
        };
        (sender, rx)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn charts(&self) -> &ChartAdapter<E> {
        &self.charts
    }

    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    pub fn auto_refresh(&self) -> &AutoRefreshController {
        &self.auto_refresh
    }

    pub fn metrics(&self) -> Arc<MetricsRecorder> {
        self.sync.metrics()
    }

    /// One full refresh cycle. Failures are already reported to the user
    /// when this returns `Err`.
    pub async fn refresh(&mut self) -> SyncResult<()> {
        let mut renderer = ViewRenderer {
            view: &mut self.view,
            charts: &mut self.charts,
            notifications: &self.notifications,
        };
        self.sync.refresh(&mut renderer).await
    }

    pub fn start_auto_refresh(&mut self) {
        self.auto_refresh.start();
        self.view.set_auto_refresh_label(self.auto_refresh.label());
    }

    pub fn stop_auto_refresh(&mut self) {
        self.auto_refresh.stop();
        self.view.set_auto_refresh_label(self.auto_refresh.label());
    }

    pub fn toggle_auto_refresh(&mut self) -> RefreshState {
        let state = self.auto_refresh.toggle();
        self.view.set_auto_refresh_label(self.auto_refresh.label());
        info!("auto-refresh {:?}", state);
        state
    }

    /// Requests an immediate classification on behalf of `control`.
    ///
    /// The control stays disabled with a busy label until this returns, and
    /// is restored on every path. A successful classification is followed by
    /// a full refresh before the control is released.
    pub async fn classify_now<C: TriggerControl + ?Sized>(
        &mut self,
        control: &mut C,
    ) -> ClassifyOutcome {
        let Some(_busy) = BusyGuard::engage(control, BUSY_LABEL) else {
            debug!("classify-now ignored: request already in flight");
            return ClassifyOutcome::Busy;
        };

        let response = self.sync.backend().classify_now().await;
        match response {
            Ok(ClassifyNowResponse {
                success: true,
                result: Some(result),
                ..
            }) => {
                info!(
                    "classified as {} ({:.3})",
                    result.system_class, result.confidence
                );
                self.notifications.success(format!(
                    "Classification complete: {} ({} confidence)",
                    result.system_class,
                    format_percent(result.confidence)
                ));
                if let Err(err) = self.refresh().await {
                    debug!("refresh after classification failed: {}", err);
                }
                ClassifyOutcome::Classified(result)
            }
            Ok(ClassifyNowResponse {
                success: false,
                error,
                ..
            }) => {
                let reason = error.unwrap_or_else(|| "unknown error".into());
                warn!("classification rejected: {}", reason);
                self.notifications
                    .error(format!("Classification failed: {}", reason));
                ClassifyOutcome::Rejected(reason)
            }
            Ok(_) => {
                warn!("classify-now reported success without a result");
                self.notifications.error(CONNECTION_ERROR);
                ClassifyOutcome::Unreachable
            }
            Err(err) => {
                warn!("classify-now failed: {}", err);
                self.notifications.error(CONNECTION_ERROR);
                ClassifyOutcome::Unreachable
            }
        }
    }

    /// Drives the dashboard until `Shutdown` arrives or every command sender
    /// is dropped. Ticks and commands are handled one at a time.
    pub async fn run<C: TriggerControl + ?Sized>(
        &mut self,
        mut commands: mpsc::UnboundedReceiver<DashboardCommand>,
        control: &mut C,
    ) {
        if let Err(err) = self.refresh().await {
            debug!("initial refresh failed: {}", err);
        }
        self.start_auto_refresh();

        loop {
            let event = tokio::select! {
                _ = self.auto_refresh.tick() => LoopEvent::Tick,
                command = commands.recv() => LoopEvent::Command(command),
            };
            match event {
                LoopEvent::Tick | LoopEvent::Command(Some(DashboardCommand::Refresh)) => {
                    if let Err(err) = self.refresh().await {
                        debug!("refresh cycle failed: {}", err);
                    }
                }
                LoopEvent::Command(Some(DashboardCommand::ClassifyNow)) => {
                    let outcome = self.classify_now(control).await;
                    self.classify_pending.store(false, Ordering::Release);
                    debug!("classify-now finished: {:?}", outcome);
                }
                LoopEvent::Command(Some(DashboardCommand::ToggleAutoRefresh)) => {
                    self.toggle_auto_refresh();
                }
                LoopEvent::Command(Some(DashboardCommand::Shutdown)) | LoopEvent::Command(None) => {
                    break;
                }
            }
        }

        self.stop_auto_refresh();
        info!("dashboard loop stopped");
    }
}
