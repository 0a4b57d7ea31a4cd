pub mod manager;

pub use manager::{Notification, NotificationKind, NotificationManager, NotificationPhase};
