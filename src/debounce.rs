//! # Debounce Scheduler Module
//!
//! ## Purpose
//! A single-slot scheduler for input events: holds at most one pending
//! delayed task, and every new schedule cancels the pending one. Used to
//! coalesce rapid value changes into one query once typing pauses.
//!
//! ## Input/Output Specification
//! - **Input**: Futures to run after the quiet period
//! - **Output**: At most one of the scheduled futures runs — the latest
//!   scheduled when the quiet period elapses uninterrupted

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Single-slot cancellable delayed-task scheduler
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Create a scheduler with the given quiet period
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule a task to run after the quiet period, cancelling and
    /// replacing any pending task
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    /// Cancel the pending task, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_rapid_schedules_collapse_to_the_last() {
        let runs = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(30));

        for value in 1..=3 {
            let runs = runs.clone();
            let last = last.clone();
            debouncer.schedule(async move {
                runs.fetch_add(1, Ordering::SeqCst);
                last.store(value, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(last.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_cancel_prevents_execution() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(20));

        let counter = runs.clone();
        debouncer.schedule(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_spaced_schedules_each_run() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(10));

        for _ in 0..2 {
            let counter = runs.clone();
            debouncer.schedule(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(60)).await;
        }

        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }
}
