use anyhow::Context;
use dashcore::api::HttpBackend;
use dashcore::charts::{ChartConfig, ChartId, ChartState};
use dashcore::dashboard::{ButtonState, ClassificationRow, StatusSummary};
use dashcore::model::SystemInfo;
use dashcore::notify::{Notification, NotificationManager};
use dashcore::telemetry::{Metrics, MetricsRecorder};
use dashcore::{
    ChartEngine, CommandSender, DashboardCommand, DashboardConfig, DashboardController,
    DashboardView, TriggerControl,
};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use std::thread;
use tokio::runtime::Builder;

pub const CLASSIFY_LABEL: &str = "Classify now";

/// Everything the GUI draws, as last written by the dashboard loop.
#[derive(Debug, Clone)]
pub struct DashboardModel {
    pub loading: bool,
    pub status: Option<StatusSummary>,
    pub info: Vec<(String, String)>,
    pub rows: Option<Vec<ClassificationRow>>,
    pub charts: BTreeMap<ChartId, ChartState>,
    pub chart_titles: BTreeMap<ChartId, &'static str>,
    pub auto_refresh_label: String,
    pub classify_button: ButtonState,
    /// A classify-now click is queued or in flight.
    pub classify_pending: bool,
    pub notifications: Vec<Notification>,
    pub metrics: Metrics,
}

impl Default for DashboardModel {
    fn default() -> Self {
        Self {
            loading: false,
            status: None,
            info: Vec::new(),
            rows: None,
            charts: BTreeMap::new(),
            chart_titles: BTreeMap::new(),
            auto_refresh_label: String::new(),
            classify_button: ButtonState::new(CLASSIFY_LABEL),
            classify_pending: false,
            notifications: Vec::new(),
            metrics: Metrics::default(),
        }
    }
}

type SharedModel = Arc<RwLock<DashboardModel>>;

fn write_model(model: &SharedModel, apply: impl FnOnce(&mut DashboardModel)) {
    if let Ok(mut guard) = model.write() {
        apply(&mut guard);
    }
}

struct SharedView {
    model: SharedModel,
}

impl DashboardView for SharedView {
    fn set_loading(&mut self, loading: bool) {
        write_model(&self.model, |model| model.loading = loading);
    }

    fn render_status(&mut self, summary: &StatusSummary, info: &SystemInfo) {
        let entries = info.entries();
        write_model(&self.model, |model| {
            model.status = Some(summary.clone());
            model.info = entries;
        });
    }

    fn render_classifications(&mut self, rows: &[ClassificationRow]) {
        write_model(&self.model, |model| model.rows = Some(rows.to_vec()));
    }

    fn set_auto_refresh_label(&mut self, label: &str) {
        write_model(&self.model, |model| {
            model.auto_refresh_label = label.to_string()
        });
    }
}

/// Chart engine backed by the shared model; the canvases redraw from it.
struct SharedCharts {
    model: SharedModel,
}

impl ChartEngine for SharedCharts {
    fn create(&mut self, id: ChartId, config: &ChartConfig) {
        write_model(&self.model, |model| {
            model.charts.insert(id, ChartState::new(config));
            model.chart_titles.insert(id, config.title);
        });
    }

    fn redraw(&mut self, id: ChartId, state: &ChartState) {
        write_model(&self.model, |model| {
            model.charts.insert(id, state.clone());
        });
    }
}

struct SharedButton {
    model: SharedModel,
}

impl TriggerControl for SharedButton {
    fn label(&self) -> String {
        self.model
            .read()
            .map(|model| model.classify_button.label.clone())
            .unwrap_or_else(|_| CLASSIFY_LABEL.into())
    }

    fn set_label(&mut self, label: &str) {
        write_model(&self.model, |model| {
            model.classify_button.label = label.to_string()
        });
    }

    fn is_enabled(&self) -> bool {
        self.model
            .read()
            .map(|model| model.classify_button.enabled)
            .unwrap_or(false)
    }

    fn set_enabled(&mut self, enabled: bool) {
        write_model(&self.model, |model| {
            model.classify_button.enabled = enabled
        });
    }
}

/// Hosts the dashboard loop on its own single-threaded runtime and relays
/// commands and state to the GUI thread. The loop ends once every clone of
/// the bridge is dropped.
#[derive(Clone)]
pub struct DashboardBridge {
    model: SharedModel,
    notifications: NotificationManager,
    metrics: Arc<MetricsRecorder>,
    commands: CommandSender,
}

impl DashboardBridge {
    pub fn start(config: &DashboardConfig) -> anyhow::Result<Self> {
        let model: SharedModel = Arc::new(RwLock::new(DashboardModel::default()));
        let backend = HttpBackend::new(config).context("building HTTP client")?;
        let mut controller = DashboardController::new(
            config,
            backend,
            SharedCharts {
                model: model.clone(),
            },
            SharedView {
                model: model.clone(),
            },
        );
        let notifications = controller.notifications().clone();
        let metrics = controller.metrics();
        let (commands, receiver) = controller.command_channel();
        let mut button = SharedButton {
            model: model.clone(),
        };

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for the dashboard loop")?;
        thread::Builder::new()
            .name("dashboard-sync".into())
            .spawn(move || {
                runtime.block_on(controller.run(receiver, &mut button));
            })
            .context("spawning dashboard thread")?;

        Ok(Self {
            model,
            notifications,
            metrics,
            commands,
        })
    }

    pub fn send(&self, command: DashboardCommand) {
        match self.commands.send(command) {
            Ok(true) => {}
            Ok(false) => debug!("classify-now already pending; click dropped"),
            Err(_) => warn!("dashboard loop is gone; dropped {:?}", command),
        }
    }

    pub fn snapshot(&self) -> DashboardModel {
        let mut snapshot = self
            .model
            .read()
            .map(|model| model.clone())
            .unwrap_or_default();
        snapshot.notifications = self.notifications.active();
        snapshot.metrics = self.metrics.snapshot();
        snapshot.classify_pending = self.commands.classify_pending();
        snapshot
    }
}
