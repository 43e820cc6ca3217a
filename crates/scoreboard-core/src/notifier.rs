// ── Server change notifier ──
//
// A single background poll of `last_changed` serves every subscriber.
// A detected change bumps a counter held in a `watch` channel; every
// subscriber wakes on the bump and re-fetches whatever it displays.

use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};
use std::time::Duration;

use arc_swap::ArcSwapOption;
use futures_core::Stream;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use scoreboard_api::ChangeMarker;

use crate::config::NotifierConfig;
use crate::error::PollError;
use crate::source::ChangeSource;

/// Floor for the poll period; `tokio::time::interval` rejects zero.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// What a single poll tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Nobody is subscribed; no request was made.
    Idle,
    /// First marker observed and recorded. Subscribers are not notified.
    Baseline,
    /// Marker equal to the recorded one.
    Unchanged,
    /// Marker differed; recorded and subscribers notified.
    Changed,
}

/// State shared between the notifier and the subscription handles.
struct Shared {
    counter: watch::Sender<u64>,
    subscribers: AtomicUsize,
    cancel: CancellationToken,
}

/// Keeps one subscriber counted for as long as it lives.
struct SubscriberSlot {
    shared: Arc<Shared>,
}

impl SubscriberSlot {
    fn acquire(shared: &Arc<Shared>) -> Self {
        let active = shared.subscribers.fetch_add(1, Ordering::AcqRel) + 1;
        trace!(active, "subscriber registered");
        Self {
            shared: Arc::clone(shared),
        }
    }
}

impl Drop for SubscriberSlot {
    fn drop(&mut self) {
        let active = self.shared.subscribers.fetch_sub(1, Ordering::AcqRel) - 1;
        trace!(active, "subscriber released");
    }
}

// ── ChangeNotifier ───────────────────────────────────────────────

/// Polls a [`ChangeSource`] and fans detected changes out to subscribers.
///
/// Cheaply cloneable; clones share the counter, the subscriber count and
/// the recorded marker. Construct one per server session and hand clones
/// to whatever needs freshness signals.
pub struct ChangeNotifier<S: ChangeSource> {
    inner: Arc<Inner<S>>,
}

struct Inner<S> {
    source: S,
    poll_interval: Duration,
    shared: Arc<Shared>,
    last_marker: ArcSwapOption<ChangeMarker>,
}

impl<S: ChangeSource> Clone for ChangeNotifier<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ChangeSource> ChangeNotifier<S> {
    /// Create a notifier. Does NOT start polling -- call
    /// [`spawn()`](Self::spawn) from within a tokio runtime.
    pub fn new(source: S, config: &NotifierConfig) -> Self {
        let (counter, _) = watch::channel(0u64);
        Self {
            inner: Arc::new(Inner {
                source,
                poll_interval: config.poll_interval.max(MIN_POLL_INTERVAL),
                shared: Arc::new(Shared {
                    counter,
                    subscribers: AtomicUsize::new(0),
                    cancel: CancellationToken::new(),
                }),
                last_marker: ArcSwapOption::empty(),
            }),
        }
    }

    /// The effective poll period.
    pub fn poll_interval(&self) -> Duration {
        self.inner.poll_interval
    }

    /// Start the background poll loop.
    ///
    /// The loop ticks every [`poll_interval`](Self::poll_interval) until
    /// [`shutdown()`](Self::shutdown). Ticks never overlap: each poll is
    /// awaited before the next tick, and ticks missed meanwhile are skipped.
    pub fn spawn(&self) -> JoinHandle<()> {
        tokio::spawn(poll_loop(self.clone()))
    }

    /// Stop the poll loop and end every pending [`Subscription::changed`].
    pub fn shutdown(&self) {
        self.inner.shared.cancel.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.shared.cancel.is_cancelled()
    }

    /// Register a subscriber.
    ///
    /// The first [`Subscription::changed`] completes immediately; treat it
    /// as "check now", not as evidence of a change. Dropping the handle
    /// unregisters it.
    pub fn subscribe(&self) -> Subscription {
        let slot = SubscriberSlot::acquire(&self.inner.shared);
        let mut receiver = self.inner.shared.counter.subscribe();
        receiver.mark_changed();
        Subscription { receiver, slot }
    }

    /// Register a callback.
    ///
    /// `callback` runs once before this returns, then on every detected
    /// change from a spawned task (requires a tokio runtime). It stops
    /// running, and the subscriber is released, when the returned guard
    /// is dropped.
    pub fn on_change<F>(&self, mut callback: F) -> CallbackGuard
    where
        F: FnMut() + Send + 'static,
    {
        let slot = SubscriberSlot::acquire(&self.inner.shared);
        let mut receiver = self.inner.shared.counter.subscribe();
        callback();

        let cancel = self.inner.shared.cancel.child_token();
        let task = tokio::spawn({
            let cancel = cancel.clone();
            async move {
                loop {
                    tokio::select! {
                        biased;
                        () = cancel.cancelled() => break,
                        res = receiver.changed() => {
                            if res.is_err() {
                                break;
                            }
                            drop(receiver.borrow_and_update());
                            callback();
                        }
                    }
                }
            }
        });

        CallbackGuard {
            cancel,
            task,
            _slot: slot,
        }
    }

    /// Number of live subscriptions and callback guards.
    pub fn active_subscribers(&self) -> usize {
        self.inner.shared.subscribers.load(Ordering::Acquire)
    }

    /// Number of changes detected so far.
    pub fn counter(&self) -> u64 {
        *self.inner.shared.counter.borrow()
    }

    /// The most recently recorded change marker.
    pub fn last_marker(&self) -> Option<ChangeMarker> {
        self.inner
            .last_marker
            .load_full()
            .map(|marker| ChangeMarker::clone(&marker))
    }

    /// Run a single poll tick.
    ///
    /// Skips the request when nobody is subscribed. On failure the recorded
    /// marker is left untouched.
    pub async fn poll_once(&self) -> Result<PollOutcome, PollError> {
        if self.active_subscribers() == 0 {
            return Ok(PollOutcome::Idle);
        }

        let marker = self.inner.source.fetch_marker().await?;
        let previous = self.inner.last_marker.swap(Some(Arc::new(marker.clone())));

        let outcome = match previous {
            None => {
                debug!(%marker, "recorded baseline change marker");
                PollOutcome::Baseline
            }
            Some(prev) if *prev == marker => PollOutcome::Unchanged,
            Some(prev) => {
                debug!(from = %prev, to = %marker, "change marker moved");
                self.inner.shared.counter.send_modify(|n| *n += 1);
                PollOutcome::Changed
            }
        };
        Ok(outcome)
    }
}

// ── Subscription handles ─────────────────────────────────────────

/// A live registration with a [`ChangeNotifier`].
pub struct Subscription {
    receiver: watch::Receiver<u64>,
    slot: SubscriberSlot,
}

impl Subscription {
    /// Wait for the next change, returning the change counter.
    ///
    /// Completes immediately the first time. Changes that happen between
    /// two calls are coalesced into one wake-up. Returns `None` once the
    /// notifier has been shut down.
    pub async fn changed(&mut self) -> Option<u64> {
        let cancelled = tokio::select! {
            biased;
            () = self.slot.shared.cancel.cancelled() => true,
            res = self.receiver.changed() => res.is_err(),
        };
        if cancelled {
            return None;
        }
        Some(*self.receiver.borrow_and_update())
    }

    /// Convert into a `Stream` that yields once immediately and then once
    /// per change, ending when the notifier shuts down.
    pub fn into_stream(self) -> SubscriptionStream {
        let Self { receiver, slot } = self;
        let cancelled = slot.shared.cancel.clone().cancelled_owned();
        SubscriptionStream {
            inner: WatchStream::new(receiver).take_until(cancelled).boxed(),
            _slot: slot,
        }
    }
}

/// `Stream` adapter over a [`Subscription`].
pub struct SubscriptionStream {
    inner: BoxStream<'static, u64>,
    _slot: SubscriberSlot,
}

impl Stream for SubscriptionStream {
    type Item = u64;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

/// Keeps an [`on_change`](ChangeNotifier::on_change) callback registered.
///
/// Dropping the guard stops the callback task and releases the subscriber.
pub struct CallbackGuard {
    cancel: CancellationToken,
    task: JoinHandle<()>,
    _slot: SubscriberSlot,
}

impl Drop for CallbackGuard {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

// ── Background loop ──────────────────────────────────────────────

async fn poll_loop<S: ChangeSource>(notifier: ChangeNotifier<S>) {
    let cancel = notifier.inner.shared.cancel.clone();
    let mut interval = tokio::time::interval(notifier.inner.poll_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await; // consume the immediate first tick

    info!(interval = ?notifier.inner.poll_interval, "change notifier started");

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {}
        }

        // A request in flight is dropped on shutdown; the marker is only
        // written once a fetch completes.
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            result = notifier.poll_once() => result,
        };
        match result {
            Ok(PollOutcome::Changed) => {
                debug!(counter = notifier.counter(), "server data changed");
            }
            Ok(outcome) => trace!(?outcome, "change poll tick"),
            Err(e) => warn!(error = %e, "failed to get last_changed"),
        }
    }

    debug!("change notifier stopped");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use tokio::sync::mpsc;
    use tokio_test::{assert_pending, assert_ready_eq, task};

    use super::*;
    use crate::error::CoreError;

    /// Replays a fixed list of `last_changed` answers.
    struct Script {
        responses: Mutex<VecDeque<Result<ChangeMarker, CoreError>>>,
        calls: AtomicUsize,
    }

    impl Script {
        fn new(markers: &[Option<&str>]) -> Arc<Self> {
            let responses = markers
                .iter()
                .map(|m| match m {
                    Some(date) => Ok(ChangeMarker::new(*date)),
                    None => Err(CoreError::ConnectionFailed {
                        url: "http://test/api/last_changed".into(),
                        reason: "connection refused".into(),
                    }),
                })
                .collect();
            Arc::new(Self {
                responses: Mutex::new(responses),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ChangeSource for Script {
        async fn fetch_marker(&self) -> Result<ChangeMarker, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(CoreError::Internal("script exhausted".into())))
        }
    }

    fn notifier(script: &Arc<Script>) -> ChangeNotifier<Arc<Script>> {
        ChangeNotifier::new(Arc::clone(script), &NotifierConfig::default())
    }

    #[tokio::test]
    async fn single_change_after_baseline() {
        let script = Script::new(&[Some("A"), Some("A"), Some("B")]);
        let notifier = notifier(&script);
        let _sub = notifier.subscribe();

        assert_eq!(notifier.poll_once().await.unwrap(), PollOutcome::Baseline);
        assert_eq!(notifier.counter(), 0);
        assert_eq!(notifier.poll_once().await.unwrap(), PollOutcome::Unchanged);
        assert_eq!(notifier.counter(), 0);
        assert_eq!(notifier.poll_once().await.unwrap(), PollOutcome::Changed);
        assert_eq!(notifier.counter(), 1);
        assert_eq!(notifier.last_marker(), Some(ChangeMarker::new("B")));
    }

    #[tokio::test]
    async fn every_distinct_marker_counts_once() {
        let script = Script::new(&[Some("A"), Some("B"), Some("B"), Some("A")]);
        let notifier = notifier(&script);
        let _sub = notifier.subscribe();

        for _ in 0..4 {
            notifier.poll_once().await.unwrap();
        }
        assert_eq!(notifier.counter(), 2);
    }

    #[test]
    fn subscription_fires_immediately_then_waits() {
        let script = Script::new(&[]);
        let notifier = notifier(&script);
        let mut sub = notifier.subscribe();

        {
            let mut first = task::spawn(sub.changed());
            assert_ready_eq!(first.poll(), Some(0));
        }

        let mut second = task::spawn(sub.changed());
        assert_pending!(second.poll());
    }

    #[tokio::test]
    async fn idle_without_subscribers() {
        let script = Script::new(&[Some("A"), Some("B")]);
        let notifier = notifier(&script);

        assert_eq!(notifier.poll_once().await.unwrap(), PollOutcome::Idle);
        assert_eq!(script.calls(), 0);

        let sub = notifier.subscribe();
        assert_eq!(notifier.active_subscribers(), 1);
        assert_eq!(notifier.poll_once().await.unwrap(), PollOutcome::Baseline);
        drop(sub);

        assert_eq!(notifier.active_subscribers(), 0);
        assert_eq!(notifier.poll_once().await.unwrap(), PollOutcome::Idle);
        assert_eq!(script.calls(), 1);
    }

    #[tokio::test]
    async fn failed_poll_keeps_marker() {
        let script = Script::new(&[Some("A"), None, Some("A"), Some("B")]);
        let notifier = notifier(&script);
        let _sub = notifier.subscribe();

        assert_eq!(notifier.poll_once().await.unwrap(), PollOutcome::Baseline);
        assert!(notifier.poll_once().await.is_err());
        assert_eq!(notifier.last_marker(), Some(ChangeMarker::new("A")));
        assert_eq!(notifier.counter(), 0);

        assert_eq!(notifier.poll_once().await.unwrap(), PollOutcome::Unchanged);
        assert_eq!(notifier.poll_once().await.unwrap(), PollOutcome::Changed);
    }

    #[tokio::test]
    async fn failure_before_baseline_records_nothing() {
        let script = Script::new(&[None, Some("A")]);
        let notifier = notifier(&script);
        let _sub = notifier.subscribe();

        assert!(notifier.poll_once().await.is_err());
        assert_eq!(notifier.last_marker(), None);
        assert_eq!(notifier.poll_once().await.unwrap(), PollOutcome::Baseline);
    }

    #[tokio::test]
    async fn callback_fires_on_register_and_on_change() {
        let script = Script::new(&[Some("A"), Some("B")]);
        let notifier = notifier(&script);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let guard = notifier.on_change(move || {
            let _ = tx.send(());
        });
        assert!(rx.try_recv().is_ok(), "callback should run during registration");
        assert!(rx.try_recv().is_err());

        notifier.poll_once().await.unwrap();
        notifier.poll_once().await.unwrap();
        tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();

        drop(guard);
        assert_eq!(notifier.active_subscribers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn poll_loop_notifies_on_transition() {
        let script = Script::new(&[Some("A"), Some("A"), Some("B")]);
        let notifier = notifier(&script);
        let mut sub = notifier.subscribe();
        let handle = notifier.spawn();

        assert_eq!(sub.changed().await, Some(0));
        assert_eq!(sub.changed().await, Some(1));
        assert_eq!(script.calls(), 3);

        notifier.shutdown();
        handle.await.unwrap();
        assert_eq!(sub.changed().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn poll_loop_survives_failures() {
        let script = Script::new(&[Some("A"), None, None, Some("B")]);
        let notifier = notifier(&script);
        let mut sub = notifier.subscribe();
        let handle = notifier.spawn();

        assert_eq!(sub.changed().await, Some(0));
        assert_eq!(sub.changed().await, Some(1));
        assert_eq!(script.calls(), 4);

        notifier.shutdown();
        handle.await.unwrap();
    }

    /// Never answers, like a server that accepted the connection and hung.
    struct Hang {
        calls: AtomicUsize,
    }

    impl ChangeSource for Hang {
        async fn fetch_marker(&self) -> Result<ChangeMarker, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_interrupts_poll_in_flight() {
        let source = Arc::new(Hang {
            calls: AtomicUsize::new(0),
        });
        let notifier = ChangeNotifier::new(Arc::clone(&source), &NotifierConfig::default());
        let _sub = notifier.subscribe();
        let handle = notifier.spawn();

        while source.calls.load(Ordering::SeqCst) == 0 {
            tokio::time::sleep(notifier.poll_interval()).await;
        }

        notifier.shutdown();
        tokio::time::timeout(Duration::from_millis(10), handle)
            .await
            .expect("poll loop should stop while a fetch is pending")
            .unwrap();
        assert_eq!(notifier.last_marker(), None);
    }

    #[tokio::test]
    async fn stream_yields_immediately_and_ends_on_shutdown() {
        let script = Script::new(&[Some("A"), Some("B")]);
        let notifier = notifier(&script);
        let mut stream = notifier.subscribe().into_stream();

        assert_eq!(stream.next().await, Some(0));
        notifier.poll_once().await.unwrap();
        notifier.poll_once().await.unwrap();
        assert_eq!(stream.next().await, Some(1));

        notifier.shutdown();
        assert_eq!(stream.next().await, None);
        drop(stream);
        assert_eq!(notifier.active_subscribers(), 0);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let script = Script::new(&[]);
        let notifier = ChangeNotifier::new(
            script,
            &NotifierConfig {
                poll_interval: Duration::ZERO,
            },
        );
        assert_eq!(notifier.poll_interval(), MIN_POLL_INTERVAL);
    }
}
