use log::debug;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

pub const RUNNING_LABEL: &str = "Auto-refresh: On";
pub const PAUSED_LABEL: &str = "Auto-refresh: Paused";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Running,
    Paused,
}

/// Recurring refresh timer with start/stop semantics.
///
/// The timer task only emits ticks; the owner awaits [`Self::tick`] and runs
/// the refresh itself. At most one tick is buffered, so a slow refresh never
/// queues a burst of catch-up cycles. Starting requires a tokio runtime.
pub struct AutoRefreshController {
    interval: Duration,
    state: RefreshState,
    handle: Option<JoinHandle<()>>,
    tick_tx: mpsc::Sender<()>,
    tick_rx: mpsc::Receiver<()>,
}

impl AutoRefreshController {
    pub fn new(interval: Duration) -> Self {
        let (tick_tx, tick_rx) = mpsc::channel(1);
        Self {
            interval,
            state: RefreshState::Running,
            handle: None,
            tick_tx,
            tick_rx,
        }
    }

    pub fn state(&self) -> RefreshState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RefreshState::Running
    }

    /// True while a timer task is scheduled.
    pub fn has_timer(&self) -> bool {
        self.handle.is_some()
    }

    pub fn label(&self) -> &'static str {
        match self.state {
            RefreshState::Running => RUNNING_LABEL,
            RefreshState::Paused => PAUSED_LABEL,
        }
    }

    /// Schedules the timer. No-op when one is already scheduled.
    pub fn start(&mut self) {
        self.state = RefreshState::Running;
        if self.handle.is_some() {
            return;
        }
        let tx = self.tick_tx.clone();
        let period = self.interval;
        debug!("auto-refresh started every {:?}", period);
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                // Full means a tick is already pending.
                if let Err(TrySendError::Closed(_)) = tx.try_send(()) {
                    break;
                }
            }
        }));
    }

    /// Cancels the timer and drops any pending tick. A refresh already
    /// running is not affected.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("auto-refresh stopped");
        }
        while self.tick_rx.try_recv().is_ok() {}
        self.state = RefreshState::Paused;
    }

    pub fn toggle(&mut self) -> RefreshState {
        match self.state {
            RefreshState::Running => self.stop(),
            RefreshState::Paused => self.start(),
        }
        self.state
    }

    /// Resolves on the next timer tick; pends forever while paused.
    pub async fn tick(&mut self) {
        let _ = self.tick_rx.recv().await;
    }
}

impl Drop for AutoRefreshController {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
