use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{self, Instant, Interval, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::{
    error::{Result, WardrobeError},
    models::{DecisionTimer, TimerKey},
    store::{TimerReceiver, TimerStore},
    utils::KeyLocks,
};

use super::{
    clock::{Clock, SystemClock},
    state::{TimerState, TimerView},
};

const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

/// Starts decision timers and streams countdown updates to observers.
///
/// The store is the only source of truth: every subscription re-derives the
/// countdown from the stored end time and the wall clock, so restarts and
/// device sleep never leave a stale countdown behind.
pub struct DecisionTimerManager<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    tick_interval: Duration,
    verbose_ticks: bool,
    start_locks: KeyLocks<TimerKey>,
}

impl<S> Clone for DecisionTimerManager<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            clock: self.clock.clone(),
            tick_interval: self.tick_interval,
            verbose_ticks: self.verbose_ticks,
            start_locks: self.start_locks.clone(),
        }
    }
}

impl<S> DecisionTimerManager<S>
where
    S: TimerStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        let debug_mode = std::env::var("WARDROBE_DEBUG")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            store,
            clock: Arc::new(SystemClock),
            tick_interval: Duration::from_secs(1),
            verbose_ticks: debug_mode,
            start_locks: KeyLocks::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval.max(Duration::from_millis(1));
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Start (or restart) the 48 hour countdown for a wishlist item.
    ///
    /// The new record replaces any earlier one for the same key. On a failed
    /// write nothing changes and the error is returned to the caller.
    pub async fn start(&self, user_id: &str, item_id: &str) -> Result<DecisionTimer> {
        if user_id.trim().is_empty() {
            return Err(WardrobeError::InputUnavailable(
                "no signed-in user".to_string(),
            ));
        }

        let key = TimerKey::new(user_id, item_id);
        let _in_flight = self.start_locks.lock(&key).await;
        let record = DecisionTimer::starting_at(&key, self.clock.now_ms());
        match self.store.write(&record).await {
            Ok(()) => {
                log_info!(
                    "Started decision timer for item {} (ends at {})",
                    item_id,
                    record.end_time_ms
                );
                Ok(record)
            }
            Err(err) => {
                log_error!("Failed to start decision timer for item {item_id}: {err:#}");
                Err(WardrobeError::TimerWriteFailure(format!("{err:#}")))
            }
        }
    }

    /// One-off view of an item's timer without keeping a subscription.
    pub async fn snapshot(&self, user_id: &str, item_id: &str) -> TimerView {
        let key = TimerKey::new(user_id, item_id);
        match self.store.subscribe(&key).await {
            Ok(rx) => {
                let record = rx.borrow().clone();
                TimerState::derive(item_id, record.as_ref(), self.clock.now_ms(), Instant::now())
                    .view()
            }
            Err(err) => {
                log_warn!("Could not read decision timer for item {item_id}: {err:#}");
                TimerView::inactive(item_id)
            }
        }
    }

    /// Watch an item's timer. `on_tick` fires right away with the current
    /// state, once per tick while running, and again whenever the store
    /// reports a new record.
    ///
    /// A subscription that cannot be opened reports `Inactive` once; the
    /// cause is kept on the returned handle.
    pub async fn observe<F>(&self, user_id: &str, item_id: &str, on_tick: F) -> TimerSubscription
    where
        F: FnMut(TimerView) + Send + 'static,
    {
        let key = TimerKey::new(user_id, item_id);
        let (receiver, read_failure) = match self.store.subscribe(&key).await {
            Ok(rx) => (Some(rx), None),
            Err(err) => {
                log_warn!(
                    "Decision timer subscription failed for item {item_id}; showing inactive: {err:#}"
                );
                (None, Some(WardrobeError::TimerReadFailure(format!("{err:#}"))))
            }
        };

        let cancel_token = CancellationToken::new();
        let observer = Observer {
            key,
            clock: self.clock.clone(),
            tick_interval: self.tick_interval,
            verbose_ticks: self.verbose_ticks,
            cancel_token: cancel_token.clone(),
        };
        let handle = tokio::spawn(observer.run(receiver, on_tick));

        TimerSubscription {
            cancel_token,
            handle: Some(handle),
            read_failure,
        }
    }
}

/// Handle for an active observation. Dropping it cancels the observer too,
/// but only `unsubscribe` waits for the task to finish.
pub struct TimerSubscription {
    cancel_token: CancellationToken,
    handle: Option<JoinHandle<()>>,
    read_failure: Option<WardrobeError>,
}

impl TimerSubscription {
    /// Stop the store listener and the tick task. No callback runs after this
    /// returns.
    pub async fn unsubscribe(mut self) {
        self.cancel_token.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                if !err.is_cancelled() {
                    log_error!("Decision timer observer failed: {err}");
                }
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Why the store subscription could not be opened, if it could not.
    pub fn read_failure(&self) -> Option<&WardrobeError> {
        self.read_failure.as_ref()
    }
}

impl Drop for TimerSubscription {
    fn drop(&mut self) {
        self.cancel_token.cancel();
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

struct Observer {
    key: TimerKey,
    clock: Arc<dyn Clock>,
    tick_interval: Duration,
    verbose_ticks: bool,
    cancel_token: CancellationToken,
}

impl Observer {
    async fn run<F>(self, receiver: Option<TimerReceiver>, mut on_tick: F)
    where
        F: FnMut(TimerView) + Send + 'static,
    {
        let item_id = self.key.item_id.clone();

        let Some(mut receiver) = receiver else {
            if !self.cancel_token.is_cancelled() {
                on_tick(TimerView::inactive(item_id));
            }
            return;
        };

        let mut listening = true;
        loop {
            // Every snapshot is authoritative: rebuild the countdown from it.
            let record = receiver.borrow_and_update().clone();
            let mut state =
                TimerState::derive(&item_id, record.as_ref(), self.clock.now_ms(), Instant::now());

            if self.cancel_token.is_cancelled() {
                break;
            }
            on_tick(state.view());

            let mut ticker = state.is_running().then(|| self.new_ticker());

            let resync = loop {
                tokio::select! {
                    biased;
                    _ = self.cancel_token.cancelled() => break false,
                    changed = receiver.changed(), if listening => match changed {
                        Ok(()) => {
                            log_info!("Decision timer for item {item_id} changed in store; resyncing");
                            break true;
                        }
                        Err(_) => {
                            log_warn!("Decision timer store closed for item {item_id}");
                            listening = false;
                        }
                    },
                    _ = next_tick(&mut ticker) => {
                        let expired = state.sync_expiry();
                        let view = state.view();
                        if self.verbose_ticks {
                            log_info!("Decision timer tick for item {item_id}: {:?}", view.remaining_ms);
                        }
                        on_tick(view);
                        if expired {
                            log_info!("Decision timer for item {item_id} expired");
                            ticker = None;
                        }
                    }
                }
            };

            if !resync {
                break;
            }
        }

        log_info!("Stopped observing decision timer for item {item_id}");
    }

    fn new_ticker(&self) -> Interval {
        let mut ticker = time::interval_at(Instant::now() + self.tick_interval, self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
