use crate::charts::Rgb;
use chrono::{DateTime, Local};
use log::debug;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Error,
}

impl NotificationKind {
    pub fn color(self) -> Rgb {
        match self {
            NotificationKind::Info => Rgb::from_hex(0x3498db),
            NotificationKind::Success => Rgb::from_hex(0x27ae60),
            NotificationKind::Error => Rgb::from_hex(0xe74c3c),
        }
    }
}

/// Display stage of a notification. `Exiting` covers the exit transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    Visible,
    Exiting,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Local>,
    pub phase: NotificationPhase,
}

#[derive(Default)]
struct Board {
    next_id: u64,
    active: Vec<Notification>,
}

/// Transient overlay messages, each dismissed by its own timer.
///
/// Clones share the same board, so a renderer can hold one while the
/// dashboard posts through another. Posting requires a tokio runtime.
#[derive(Clone)]
pub struct NotificationManager {
    board: Arc<Mutex<Board>>,
    display: Duration,
    exit: Duration,
}

impl NotificationManager {
    pub fn new(display: Duration, exit: Duration) -> Self {
        Self {
            board: Arc::new(Mutex::new(Board::default())),
            display,
            exit,
        }
    }

    /// Shows `message` and schedules its removal. There is no cap on how many
    /// notifications can be shown at once.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        let message = message.into();
        debug!("notification ({:?}): {}", kind, message);
        let id = match self.board.lock() {
            Ok(mut board) => {
                board.next_id += 1;
                let id = board.next_id;
                board.active.push(Notification {
                    id,
                    message,
                    kind,
                    created_at: Local::now(),
                    phase: NotificationPhase::Visible,
                });
                id
            }
            Err(_) => return 0,
        };

        let board = Arc::clone(&self.board);
        let (display, exit) = (self.display, self.exit);
        tokio::spawn(async move {
            tokio::time::sleep(display).await;
            if let Ok(mut board) = board.lock() {
                if let Some(entry) = board.active.iter_mut().find(|entry| entry.id == id) {
                    entry.phase = NotificationPhase::Exiting;
                }
            }
            tokio::time::sleep(exit).await;
            if let Ok(mut board) = board.lock() {
                board.active.retain(|entry| entry.id != id);
            }
        });
        id
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationKind::Info)
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationKind::Error)
    }

    /// Notifications currently on screen, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        self.board
            .lock()
            .map(|board| board.active.clone())
            .unwrap_or_default()
    }
}
