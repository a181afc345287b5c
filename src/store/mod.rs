//! Persistence for decision timers.
//!
//! A store upserts records and hands out subscriptions. A subscription is a
//! `watch::Receiver`: its current value is the record at subscribe time and
//! every later write to the same key shows up as a change. Dropping the
//! receiver releases the subscription.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::watch;

use crate::models::{DecisionTimer, TimerKey};

mod memory;
mod sqlite;
mod watchers;

pub use memory::MemoryTimerStore;
pub use sqlite::SqliteTimerStore;

pub type TimerReceiver = watch::Receiver<Option<DecisionTimer>>;

#[async_trait]
pub trait TimerStore: Send + Sync {
    /// Upsert `record`, replacing whatever its key held before.
    async fn write(&self, record: &DecisionTimer) -> Result<()>;

    async fn subscribe(&self, key: &TimerKey) -> Result<TimerReceiver>;
}
