use serde::{Deserialize, Serialize};

/// Every decision timer runs for 48 hours.
pub const DECISION_WINDOW_MS: i64 = 48 * 60 * 60 * 1000;

/// Addresses one timer record: a (user, wishlist item) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerKey {
    pub user_id: String,
    pub item_id: String,
}

impl TimerKey {
    pub fn new(user_id: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            item_id: item_id.into(),
        }
    }
}

/// Persisted countdown. Remaining time is never stored; it is always derived
/// as `end_time_ms - now`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionTimer {
    pub user_id: String,
    pub wishlist_item_id: String,
    pub start_time_ms: i64,
    pub end_time_ms: i64,
}

impl DecisionTimer {
    pub fn starting_at(key: &TimerKey, now_ms: i64) -> Self {
        Self {
            user_id: key.user_id.clone(),
            wishlist_item_id: key.item_id.clone(),
            start_time_ms: now_ms,
            end_time_ms: now_ms.saturating_add(DECISION_WINDOW_MS),
        }
    }

    pub fn key(&self) -> TimerKey {
        TimerKey::new(self.user_id.clone(), self.wishlist_item_id.clone())
    }

    pub fn duration_ms(&self) -> i64 {
        self.end_time_ms - self.start_time_ms
    }

    /// Milliseconds left at `now_ms`, or `None` once the timer has run out.
    pub fn remaining_at(&self, now_ms: i64) -> Option<u64> {
        if now_ms < self.end_time_ms {
            Some(self.end_time_ms.saturating_sub(now_ms) as u64)
        } else {
            None
        }
    }
}
