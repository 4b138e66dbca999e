//! Search input debouncing
//!
//! Keystrokes in the course and user search boxes each call [`Debouncer::settle`];
//! only the call that is still the latest once the delay has elapsed is told
//! to proceed with the fetch.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use lms_shared::SearchConfig;

/// Trailing-edge debouncer shared by clones
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.debounce())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the delay; `true` when no newer call arrived in the meantime
    pub async fn settle(&self) -> bool {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        self.generation.load(Ordering::SeqCst) == ticket
    }

    /// Run `action` only if this call survives the delay
    pub async fn run<F, Fut, T>(&self, action: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if self.settle().await {
            Some(action().await)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_only_last_call_in_window_proceeds() {
        let debouncer = Debouncer::new(Duration::from_millis(400));

        let mut calls = Vec::new();
        for _ in 0..3 {
            let debouncer = debouncer.clone();
            calls.push(tokio::spawn(async move { debouncer.settle().await }));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        let mut outcomes = Vec::new();
        for call in calls {
            outcomes.push(call.await.unwrap());
        }
        assert_eq!(outcomes, vec![false, false, true]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_calls_all_proceed() {
        let debouncer = Debouncer::new(Duration::from_millis(400));

        assert!(debouncer.settle().await);
        assert!(debouncer.settle().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_skips_superseded_action() {
        let debouncer = Debouncer::from_config(&SearchConfig::default());
        assert_eq!(debouncer.delay(), Duration::from_millis(400));

        let early = {
            let debouncer = debouncer.clone();
            tokio::spawn(async move { debouncer.run(|| async { "early" }).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        let late = debouncer.run(|| async { "late" }).await;

        assert_eq!(early.await.unwrap(), None);
        assert_eq!(late, Some("late"));
    }
}
