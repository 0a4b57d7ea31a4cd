pub mod controller;

pub use controller::{AutoRefreshController, RefreshState};
