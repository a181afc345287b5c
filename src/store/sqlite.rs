use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::db::Database;
use crate::models::{DecisionTimer, TimerKey};
use crate::utils::KeyLocks;

use super::{watchers::Watchers, TimerReceiver, TimerStore};

const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Durable store backed by the `decision_timers` table.
///
/// Subscriptions are refreshed from disk when they are opened and notified
/// after every successful write made through this store. Writes and
/// refreshes on the same key hold a per-key lock, so a refresh never
/// publishes a row older than one a writer has already announced.
#[derive(Clone)]
pub struct SqliteTimerStore {
    db: Database,
    watchers: Arc<Watchers>,
    key_locks: KeyLocks<TimerKey>,
}

impl SqliteTimerStore {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            watchers: Arc::new(Watchers::new(false)),
            key_locks: KeyLocks::default(),
        }
    }
}

#[async_trait]
impl TimerStore for SqliteTimerStore {
    async fn write(&self, record: &DecisionTimer) -> Result<()> {
        let _guard = self.key_locks.lock(&record.key()).await;
        self.db.upsert_decision_timer(record).await?;
        self.watchers.publish(record);
        log_info!(
            "Stored decision timer for item {} (ends at {})",
            record.wishlist_item_id,
            record.end_time_ms
        );
        Ok(())
    }

    async fn subscribe(&self, key: &TimerKey) -> Result<TimerReceiver> {
        let _guard = self.key_locks.lock(key).await;
        let current = self.db.get_decision_timer(key).await?;
        Ok(self.watchers.subscribe(key, Some(current)))
    }
}
