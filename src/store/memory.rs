use anyhow::Result;
use async_trait::async_trait;

use crate::models::{DecisionTimer, TimerKey};

use super::{watchers::Watchers, TimerReceiver, TimerStore};

/// Process-local store that pushes every write to live subscribers, the way
/// a realtime database would.
pub struct MemoryTimerStore {
    watchers: Watchers,
}

impl Default for MemoryTimerStore {
    fn default() -> Self {
        Self {
            watchers: Watchers::new(true),
        }
    }
}

impl MemoryTimerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &TimerKey) -> Option<DecisionTimer> {
        self.watchers.current(key)
    }
}

#[async_trait]
impl TimerStore for MemoryTimerStore {
    async fn write(&self, record: &DecisionTimer) -> Result<()> {
        self.watchers.publish(record);
        Ok(())
    }

    async fn subscribe(&self, key: &TimerKey) -> Result<TimerReceiver> {
        Ok(self.watchers.subscribe(key, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_sees_current_value_then_changes() {
        let store = MemoryTimerStore::new();
        let key = TimerKey::new("u1", "item42");

        let mut rx = store.subscribe(&key).await.unwrap();
        assert!(rx.borrow_and_update().is_none());

        let first = DecisionTimer::starting_at(&key, 0);
        store.write(&first).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref(), Some(&first));

        let second = DecisionTimer::starting_at(&key, 1_000);
        store.write(&second).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref(), Some(&second));
        assert_eq!(store.get(&key), Some(second));
    }

    #[tokio::test]
    async fn keys_are_isolated_per_user() {
        let store = MemoryTimerStore::new();
        let mine = TimerKey::new("u1", "item42");
        let theirs = TimerKey::new("u2", "item42");

        store
            .write(&DecisionTimer::starting_at(&mine, 0))
            .await
            .unwrap();

        let rx = store.subscribe(&theirs).await.unwrap();
        assert!(rx.borrow().is_none());
        assert!(store.get(&theirs).is_none());
    }
}
