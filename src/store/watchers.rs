use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use tokio::sync::watch;

use crate::models::{DecisionTimer, TimerKey};

use super::TimerReceiver;

type Channels = HashMap<TimerKey, watch::Sender<Option<DecisionTimer>>>;

/// One watch channel per timer key, shared by every subscriber of that key.
///
/// Channels nobody listens to are swept on the next subscribe or publish.
/// With `keep_values` a channel holding a record survives the sweep, since
/// the channel is then the only copy of it.
pub(super) struct Watchers {
    channels: Mutex<Channels>,
    keep_values: bool,
}

impl Watchers {
    pub(super) fn new(keep_values: bool) -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
            keep_values,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Channels> {
        match self.channels.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn sweep(&self, channels: &mut Channels) {
        let keep_values = self.keep_values;
        channels.retain(|_, sender| {
            sender.receiver_count() > 0 || (keep_values && sender.borrow().is_some())
        });
    }

    /// Subscribe to `key`. When `current` is given it replaces the cached
    /// value first (subscribers only see a change if it differs).
    pub(super) fn subscribe(
        &self,
        key: &TimerKey,
        current: Option<Option<DecisionTimer>>,
    ) -> TimerReceiver {
        let mut channels = self.lock();
        self.sweep(&mut channels);
        let sender = channels
            .entry(key.clone())
            .or_insert_with(|| watch::channel(None).0);

        if let Some(current) = current {
            sender.send_if_modified(|cached| {
                if *cached != current {
                    *cached = current;
                    true
                } else {
                    false
                }
            });
        }

        sender.subscribe()
    }

    pub(super) fn publish(&self, record: &DecisionTimer) {
        let mut channels = self.lock();
        self.sweep(&mut channels);
        let sender = channels
            .entry(record.key())
            .or_insert_with(|| watch::channel(None).0);
        sender.send_replace(Some(record.clone()));
    }

    pub(super) fn current(&self, key: &TimerKey) -> Option<DecisionTimer> {
        self.lock()
            .get(key)
            .and_then(|sender| sender.borrow().clone())
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.lock().len()
    }
}
