//! Composition root wiring sync, charts, notifications and auto-refresh.

pub mod control;
pub mod controller;
pub mod present;

pub use control::{BusyGuard, ButtonState, BUSY_LABEL};
pub use controller::{ClassifyOutcome, CommandSender, DashboardCommand, DashboardController};
pub use present::{ClassificationRow, StatusSummary};
