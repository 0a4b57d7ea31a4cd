pub mod data_sync;

pub use data_sync::{DataSync, RefreshPayload, CONNECTION_ERROR};
