//! Trailing-edge debounce over a tokio timer.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Delivers a value on `output` once no newer value has been triggered for
/// the quiet period.
///
/// At most one timer is outstanding: `trigger` aborts the pending timer
/// before starting a new one, and dropping the debouncer aborts it too.
/// Must be used from within a tokio runtime.
pub struct Debouncer<T> {
    delay: Duration,
    output: UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration, output: UnboundedSender<T>) -> Self {
        Self {
            delay,
            output,
            pending: None,
        }
    }

    /// Replace any pending value with `value` and restart the quiet period.
    pub fn trigger(&mut self, value: T) {
        self.cancel();

        let output = self.output.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the page is shutting down
            let _ = output.send(value);
        }));
    }

    /// Drop the pending value, if any, without delivering it.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a value is waiting for its quiet period to end.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
