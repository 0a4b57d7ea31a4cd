//! Data-synchronization and render-update core for the classification
//! monitoring dashboard.
//!
//! The crate retrieves statistics, recent classifications and health status
//! from the classification backend, normalizes them and routes them to
//! presentation adapters (status text, list rendering, chart series). It also
//! owns the auto-refresh timer and the transient notification stack. Front
//! ends plug in through the traits in [`prelude`].

pub mod api;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod model;
pub mod notify;
pub mod prelude;
pub mod refresh;
pub mod sync;
pub mod telemetry;

#[cfg(test)]
mod test_support;

pub use config::DashboardConfig;
pub use dashboard::{CommandSender, DashboardCommand, DashboardController};
pub use prelude::{
    ChartEngine, ConfigError, DashboardView, RenderCallbacks, SyncError, TriggerControl,
};
