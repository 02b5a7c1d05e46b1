//! Trailing-edge debouncing for search input.
//!
//! Keystrokes are pushed into a channel; a background task waits until the
//! input has been quiet for the configured delay and then hands the latest
//! value to a callback. Values superseded inside the window are dropped.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};

/// Quiet period before a search query is applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(200);

/// Source of debounced values; implemented for unbounded mpsc receivers.
#[allow(async_fn_in_trait)]
pub trait EventReceiver<E> {
    /// Receive the next value, returning `None` when the channel is closed.
    async fn recv(&mut self) -> Option<E>;
}

impl<E> EventReceiver<E> for mpsc::UnboundedReceiver<E> {
    async fn recv(&mut self) -> Option<E> {
        mpsc::UnboundedReceiver::recv(self).await
    }
}

/// Drain `rx`, calling `on_settle` with the last value of each burst.
///
/// A burst ends once `delay` passes without a new value. When the channel
/// closes, a still-pending value is flushed before returning.
pub async fn debounce<T, Rx>(mut rx: Rx, delay: Duration, mut on_settle: impl FnMut(T))
where
    Rx: EventReceiver<T> + Unpin,
{
    let mut pending: Option<T> = None;
    let mut superseded: u64 = 0;
    let timer = tokio::time::sleep(delay);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            value = rx.recv() => match value {
                Some(v) => {
                    if pending.replace(v).is_some() {
                        superseded += 1;
                    }
                    timer.as_mut().reset(Instant::now() + delay);
                }
                None => {
                    if let Some(v) = pending.take() {
                        log::debug!("debounce: channel closed, flushing pending value");
                        on_settle(v);
                    }
                    break;
                }
            },
            () = &mut timer, if pending.is_some() => {
                if let Some(v) = pending.take() {
                    log::debug!("debounce: settled ({} superseded)", superseded);
                    superseded = 0;
                    on_settle(v);
                }
            }
        }
    }
}

/// Handle to a spawned debounce task.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the debounce loop on the current tokio runtime.
    pub fn spawn<F>(delay: Duration, on_settle: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(debounce(rx, delay, on_settle));
        Self { tx, task }
    }

    /// Queue a new value. Returns `false` if the task has stopped.
    pub fn push(&self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }

    /// Close the input and wait for any pending value to be delivered.
    pub async fn finish(self) {
        drop(self.tx);
        if let Err(e) = self.task.await {
            log::warn!("debounce task ended abnormally: {}", e);
        }
    }
}
