//! Debounced value settling
//!
//! A [`Debouncer`] holds two values: the source value, which follows every
//! keystroke, and the settled value, which only catches up once the source
//! has stayed unchanged for the quiet period.
//!
//! Each change aborts the pending settle task and spawns a new one. The task
//! also carries a generation number checked under a lock right before it
//! publishes, so a superseded timer can never fire even if it was already
//! running on another worker when it was aborted.

use parking_lot::Mutex;
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Quiet period used when a call site does not configure one
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Quiet period used by the table search box
pub const SEARCH_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// State shared with the spawned settle task
struct Shared<T> {
    /// Bumped on every reschedule/cancel; a task only publishes if it still matches
    generation: Mutex<u64>,
    /// Settled value and its observers
    settled_tx: watch::Sender<T>,
    /// Number of settle events published
    settle_count: AtomicU64,
}

/// Settles a rapidly changing value after a quiet period
///
/// Must be used from within a tokio runtime: scheduling spawns a task.
pub struct Debouncer<T> {
    /// Latest value submitted (may not be settled yet)
    source: T,
    /// Minimum time without change before the source is settled
    quiet_period: Duration,
    /// Pending settle task, if any
    pending: Option<JoinHandle<()>>,
    shared: Arc<Shared<T>>,
}

impl<T> Debouncer<T>
where
    T: Clone + PartialEq + Debug + Send + Sync + 'static,
{
    /// Create a debouncer with the default 500ms quiet period
    ///
    /// The initial value is settled immediately.
    pub fn new(initial: T) -> Self {
        Self::with_quiet_period(initial, DEFAULT_QUIET_PERIOD)
    }

    /// Create a debouncer with an explicit quiet period
    pub fn with_quiet_period(initial: T, quiet_period: Duration) -> Self {
        let (settled_tx, _) = watch::channel(initial.clone());
        Self {
            source: initial,
            quiet_period,
            pending: None,
            shared: Arc::new(Shared {
                generation: Mutex::new(0),
                settled_tx,
                settle_count: AtomicU64::new(0),
            }),
        }
    }

    /// Submit the current source value and return the settled value
    ///
    /// A value different from the previous source cancels any pending
    /// settle and schedules a new one for `now + quiet_period`. Submitting
    /// the same value again leaves the pending timer untouched.
    pub fn settle(&mut self, value: T) -> T {
        if value != self.source {
            self.source = value;
            self.schedule();
        }
        self.settled()
    }

    /// The most recently settled value
    pub fn settled(&self) -> T {
        self.shared.settled_tx.borrow().clone()
    }

    /// The most recently submitted value
    pub fn source(&self) -> &T {
        &self.source
    }

    /// Observe settle events
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.shared.settled_tx.subscribe()
    }

    /// Whether a settle is scheduled but has not fired yet
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }

    /// Current quiet period
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Change the quiet period
    ///
    /// A pending settle is re-armed with the new period, measured from now.
    pub fn set_quiet_period(&mut self, quiet_period: Duration) {
        if quiet_period == self.quiet_period {
            return;
        }
        self.quiet_period = quiet_period;
        if self.is_pending() {
            self.schedule();
        }
    }

    /// Number of settle events published so far
    pub fn settle_count(&self) -> u64 {
        self.shared.settle_count.load(Ordering::Acquire)
    }

    /// Drop any pending settle; the source reverts to the settled value
    pub fn cancel(&mut self) {
        self.invalidate();
        self.source = self.settled();
    }

    /// Abort the pending task and bump the generation
    fn invalidate(&mut self) -> u64 {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let mut generation = self.shared.generation.lock();
        *generation += 1;
        *generation
    }

    fn schedule(&mut self) {
        let generation = self.invalidate();
        let shared = Arc::clone(&self.shared);
        let value = self.source.clone();
        let quiet_period = self.quiet_period;

        debug!(?value, ?quiet_period, generation, "Scheduling settle");

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;

            let current = shared.generation.lock();
            if *current != generation {
                return;
            }
            let count = shared.settle_count.fetch_add(1, Ordering::AcqRel) + 1;
            debug!(?value, count, "Settled");
            shared.settled_tx.send_replace(value);
        }));
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Instant};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_value_is_settled_immediately() {
        let debouncer = Debouncer::new(String::from("start"));
        assert_eq!(debouncer.settled(), "start");
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.quiet_period(), DEFAULT_QUIET_PERIOD);
        assert_eq!(debouncer.settle_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_settles_once_with_final_value() {
        let mut debouncer = Debouncer::with_quiet_period(String::new(), SEARCH_QUIET_PERIOD);
        let mut rx = debouncer.subscribe();

        for text in ["j", "ja", "jan", "jane"] {
            assert_eq!(debouncer.settle(text.to_string()), "");
            sleep(ms(100)).await;
        }
        // 100ms since the last keystroke
        assert_eq!(debouncer.settled(), "");
        assert!(debouncer.is_pending());

        sleep(ms(199)).await;
        assert_eq!(debouncer.settled(), "");

        sleep(ms(2)).await;
        assert_eq!(debouncer.settled(), "jane");
        assert_eq!(debouncer.settle_count(), 1);

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), "jane");
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_settles_one_quiet_period_after_last_change() {
        let mut debouncer = Debouncer::with_quiet_period(0u32, ms(300));
        let mut rx = debouncer.subscribe();

        debouncer.settle(1);
        sleep(ms(50)).await;
        debouncer.settle(2);
        let last_change = Instant::now();

        rx.changed().await.unwrap();
        let waited = last_change.elapsed();
        assert!(waited >= ms(300), "settled too early: {:?}", waited);
        assert!(waited < ms(302), "settled too late: {:?}", waited);
        assert_eq!(*rx.borrow(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_timer_never_fires() {
        let mut debouncer = Debouncer::with_quiet_period("a", ms(300));

        debouncer.settle("b");
        sleep(ms(200)).await;
        debouncer.settle("c");

        // "b" would have fired at 300ms
        sleep(ms(200)).await;
        assert_eq!(debouncer.settled(), "a");
        assert_eq!(debouncer.settle_count(), 0);

        sleep(ms(101)).await;
        assert_eq!(debouncer.settled(), "c");
        assert_eq!(debouncer.settle_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_quiet_period_is_not_synchronous() {
        let mut debouncer = Debouncer::with_quiet_period(0u8, Duration::ZERO);
        let mut rx = debouncer.subscribe();

        assert_eq!(debouncer.settle(9), 0);
        assert_eq!(debouncer.settled(), 0);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 9);
        assert_eq!(debouncer.settle_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeating_the_source_value_does_not_reset_timer() {
        let mut debouncer = Debouncer::with_quiet_period(0i64, ms(300));

        debouncer.settle(5);
        sleep(ms(200)).await;
        debouncer.settle(5);
        sleep(ms(101)).await;

        assert_eq!(debouncer.settled(), 5);
        assert_eq!(debouncer.settle_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_value() {
        let mut debouncer = Debouncer::with_quiet_period("idle", ms(100));

        debouncer.settle("typing");
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert_eq!(*debouncer.source(), "idle");

        sleep(ms(500)).await;
        assert_eq!(debouncer.settled(), "idle");
        assert_eq!(debouncer.settle_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_changing_quiet_period_rearms_pending_settle() {
        let mut debouncer = Debouncer::with_quiet_period(0u16, ms(500));

        debouncer.settle(1);
        sleep(ms(100)).await;
        debouncer.set_quiet_period(ms(50));
        assert_eq!(debouncer.quiet_period(), ms(50));

        sleep(ms(49)).await;
        assert_eq!(debouncer.settled(), 0);
        sleep(ms(2)).await;
        assert_eq!(debouncer.settled(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_settle_event_notifies_once() {
        let mut debouncer = Debouncer::with_quiet_period(String::new(), ms(10));
        let mut rx = debouncer.subscribe();
        let mut seen = Vec::new();

        for text in ["a", "ab", "a"] {
            debouncer.settle(text.to_string());
            rx.changed().await.unwrap();
            seen.push(rx.borrow_and_update().clone());
        }

        assert_eq!(seen, vec!["a", "ab", "a"]);
        assert_eq!(debouncer.settle_count(), 3);
    }
}
