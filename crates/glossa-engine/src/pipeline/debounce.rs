use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A cancellable single-slot timer.
///
/// [`arm`](Debouncer::arm) schedules a value for delivery after the delay and
/// cancels whatever was scheduled before, so at most one value is pending.
/// Delivered values arrive on the receiver returned by [`Debouncer::new`].
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    fired_tx: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            delay,
            pending: None,
            fired_tx,
        };
        (debouncer, fired_rx)
    }

    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self, value: T) {
        self.cancel();
        let fired_tx = self.fired_tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the owner was dropped.
            let _ = fired_tx.send(value);
        }));
    }

    /// Cancels the pending timer. Returns whether one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
