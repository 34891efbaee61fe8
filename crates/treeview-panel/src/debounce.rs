use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Quiet period after the last resize before the panel is re-placed.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(300);

/// Emitted once a burst of resize events has gone quiet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSettled;

/// Coalesces resize events into a single deferred tick.
///
/// Each [`notify`](Self::notify) aborts the pending timer and starts a fresh
/// one, so a continuous resize produces one tick after it stops. Must be
/// used inside a tokio runtime.
pub struct ResizeDebouncer {
    interval: Duration,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<ResizeSettled>,
}

impl ResizeDebouncer {
    pub fn new(interval: Duration) -> (Self, mpsc::UnboundedReceiver<ResizeSettled>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            interval,
            pending: None,
            tx,
        };
        (debouncer, rx)
    }

    /// Record a resize event, rescheduling the pending tick.
    pub fn notify(&mut self) {
        self.cancel();
        let tx = self.tx.clone();
        let interval = self.interval;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            // Receiver gone means the session ended.
            let _ = tx.send(ResizeSettled);
        }));
    }

    /// Drop the pending tick, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for ResizeDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
