use crate::charts::{ChartConfig, ChartId, ChartState};
use crate::dashboard::present::{ClassificationRow, StatusSummary};
use crate::model::{ClassificationRecord, StatisticsSnapshot, SystemInfo, SystemStatus};

/// Errors raised while retrieving a backend resource.
#[derive(thiserror::Error, Debug)]
pub enum SyncError {
    #[error("transport failure on {resource}: {reason}")]
    Transport {
        resource: &'static str,
        reason: String,
    },
    #[error("could not decode {resource}: {reason}")]
    Decode {
        resource: &'static str,
        reason: String,
    },
}

impl SyncError {
    pub fn resource(&self) -> &'static str {
        match self {
            SyncError::Transport { resource, .. } | SyncError::Decode { resource, .. } => resource,
        }
    }
}

pub type SyncResult<T> = Result<T, SyncError>;

/// Errors raised by an invalid [`crate::DashboardConfig`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Sinks for one refresh cycle. DataSync only ever talks to this trait.
pub trait RenderCallbacks {
    fn on_loading_start(&mut self) {}
    fn on_loading_end(&mut self) {}
    fn on_status(&mut self, status: &SystemStatus, stats: &StatisticsSnapshot, info: &SystemInfo);
    fn on_classifications(&mut self, records: &[ClassificationRecord]);
    fn on_charts(&mut self, stats: &StatisticsSnapshot, records: &[ClassificationRecord]);
    /// User-visible failure report for a cycle that rendered nothing.
    fn on_error(&mut self, message: &str);
}

/// Narrow contract with the charting library.
pub trait ChartEngine {
    fn create(&mut self, id: ChartId, config: &ChartConfig);
    /// Redraws a single chart from its current series.
    fn redraw(&mut self, id: ChartId, state: &ChartState);
}

/// Status panel and classification list renderers.
pub trait DashboardView {
    fn set_loading(&mut self, loading: bool);
    fn render_status(&mut self, summary: &StatusSummary, info: &SystemInfo);
    /// An empty slice means "nothing classified yet".
    fn render_classifications(&mut self, rows: &[ClassificationRow]);
    fn set_auto_refresh_label(&mut self, label: &str);
}

/// The control that invoked "classify now", passed explicitly to the action.
pub trait TriggerControl {
    fn label(&self) -> String;
    fn set_label(&mut self, label: &str);
    fn is_enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);
}
