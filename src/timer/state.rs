use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::models::DecisionTimer;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum DecisionTimerStatus {
    /// No timer on record, or the record could not be read.
    #[default]
    Inactive,
    Running,
    /// The stored record has run out. It stays in the store but is inert.
    Expired,
}

/// What an observer is shown on every update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimerView {
    pub item_id: String,
    pub status: DecisionTimerStatus,
    /// Only set while running.
    pub remaining_ms: Option<u64>,
    pub end_time_ms: Option<i64>,
}

impl TimerView {
    pub fn inactive(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            status: DecisionTimerStatus::Inactive,
            remaining_ms: None,
            end_time_ms: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == DecisionTimerStatus::Running
    }
}

/// Local countdown for one observed item.
///
/// Seeded from a store snapshot and the wall clock, then advanced purely by
/// monotonic time elapsed since `running_anchor`. A fresh snapshot replaces
/// the whole state rather than adjusting it.
#[derive(Debug, Clone)]
pub struct TimerState {
    pub item_id: String,
    pub status: DecisionTimerStatus,
    pub end_time_ms: Option<i64>,
    seeded_remaining_ms: u64,
    running_anchor: Option<Instant>,
}

impl TimerState {
    pub fn inactive(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            status: DecisionTimerStatus::Inactive,
            end_time_ms: None,
            seeded_remaining_ms: 0,
            running_anchor: None,
        }
    }

    pub fn derive(
        item_id: impl Into<String>,
        record: Option<&DecisionTimer>,
        now_ms: i64,
        anchor: Instant,
    ) -> Self {
        let mut state = Self::inactive(item_id);
        let Some(record) = record else {
            return state;
        };

        state.end_time_ms = Some(record.end_time_ms);
        match record.remaining_at(now_ms) {
            Some(remaining) => {
                state.status = DecisionTimerStatus::Running;
                state.seeded_remaining_ms = remaining;
                state.running_anchor = Some(anchor);
            }
            None => state.status = DecisionTimerStatus::Expired,
        }
        state
    }

    pub fn is_running(&self) -> bool {
        self.status == DecisionTimerStatus::Running
    }

    pub fn remaining_ms(&self) -> Option<u64> {
        match (self.status, self.running_anchor) {
            (DecisionTimerStatus::Running, Some(anchor)) => Some(
                self.seeded_remaining_ms
                    .saturating_sub(anchor.elapsed().as_millis() as u64),
            ),
            _ => None,
        }
    }

    /// Move to `Expired` once the local countdown reaches zero. Returns true
    /// on that transition.
    pub fn sync_expiry(&mut self) -> bool {
        if self.remaining_ms() == Some(0) {
            self.status = DecisionTimerStatus::Expired;
            self.running_anchor = None;
            return true;
        }
        false
    }

    pub fn view(&self) -> TimerView {
        TimerView {
            item_id: self.item_id.clone(),
            status: self.status,
            remaining_ms: self.remaining_ms(),
            end_time_ms: self.end_time_ms,
        }
    }
}
