//! Debounced value propagation backed by a tokio task.

use std::time::Duration;

use log::debug;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::sleep,
};

/// Aborts the wrapped task when dropped.
#[derive(Debug)]
pub struct AbortOnDrop(JoinHandle<()>);

impl AbortOnDrop {
    pub fn new(handle: JoinHandle<()>) -> Self {
        Self(handle)
    }

    /// Returns true once the task has run to completion or was aborted.
    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Delays a changing value until it has been stable for a fixed interval.
///
/// Values are fed with [`push`](Self::push). Each push restarts the quiet
/// period, so only the last value of a burst is emitted. Settled values are
/// published on a [`watch`] channel; intermediate values are never observed.
///
/// The timer runs on a tokio task owned by the debouncer. Dropping the
/// debouncer aborts that task and discards any pending value.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use paddock_core::autosave::Debouncer;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let debouncer = Debouncer::new(Duration::from_millis(10));
/// let mut settled = debouncer.subscribe();
///
/// debouncer.push("S");
/// debouncer.push("St");
/// debouncer.push("Star");
///
/// settled.changed().await.unwrap();
/// assert_eq!(*settled.borrow(), Some("Star"));
/// # }
/// ```
#[derive(Debug)]
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
    output: watch::Receiver<Option<T>>,
    delay: Duration,
    _task: AbortOnDrop,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawns the debounce task. Must be called inside a tokio runtime.
    pub fn new(delay: Duration) -> Self {
        let (input, mut pending_rx) = mpsc::unbounded_channel::<T>();
        let (settled_tx, output) = watch::channel(None);

        let task = tokio::spawn(async move {
            let mut pending: Option<T> = None;
            loop {
                if pending.is_none() {
                    match pending_rx.recv().await {
                        Some(value) => pending = Some(value),
                        None => break,
                    }
                    continue;
                }

                tokio::select! {
                    next = pending_rx.recv() => match next {
                        Some(value) => pending = Some(value),
                        None => break,
                    },
                    _ = sleep(delay) => {
                        settled_tx.send_replace(pending.take());
                    }
                }
            }
        });

        Self {
            input,
            output,
            delay,
            _task: AbortOnDrop::new(task),
        }
    }

    /// Feeds a new value, restarting the quiet period.
    pub fn push(&self, value: T) {
        if self.input.send(value).is_err() {
            debug!("Debounce task has stopped, dropping value");
        }
    }

    /// Returns a receiver notified each time a value settles.
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.output.clone()
    }

    /// The most recently settled value, if any.
    pub fn settled(&self) -> Option<T> {
        self.output.borrow().clone()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_burst_emits_only_last_value() {
        let debouncer = Debouncer::new(Duration::from_millis(1000));
        let mut rx = debouncer.subscribe();

        for value in 1..=5 {
            debouncer.push(value);
            tokio::time::advance(Duration::from_millis(200)).await;
        }
        assert_eq!(debouncer.settled(), None);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), Some(5));
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_pushes_each_settle() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let mut rx = debouncer.subscribe();

        debouncer.push("a");
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), Some("a"));

        debouncer.push("b");
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), Some("b"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_discards_pending_value() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let mut rx = debouncer.subscribe();

        debouncer.push(7);
        drop(debouncer);
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(*rx.borrow_and_update(), None);
        assert!(rx.changed().await.is_err());
    }
}
