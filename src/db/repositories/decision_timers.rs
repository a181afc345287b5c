use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use crate::db::Database;
use crate::models::{DecisionTimer, TimerKey};

impl Database {
    /// Insert or replace the timer for its (user, item) key. Last write wins.
    pub async fn upsert_decision_timer(&self, timer: &DecisionTimer) -> Result<()> {
        let record = timer.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO decision_timers (user_id, item_id, start_time_ms, end_time_ms)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(user_id, item_id) DO UPDATE SET
                     start_time_ms = excluded.start_time_ms,
                     end_time_ms = excluded.end_time_ms",
                params![
                    record.user_id,
                    record.wishlist_item_id,
                    record.start_time_ms,
                    record.end_time_ms,
                ],
            )
            .with_context(|| "failed to upsert decision timer")?;
            Ok(())
        })
        .await
    }

    pub async fn get_decision_timer(&self, key: &TimerKey) -> Result<Option<DecisionTimer>> {
        let key = key.clone();
        self.execute(move |conn| {
            let timer = conn
                .query_row(
                    "SELECT user_id, item_id, start_time_ms, end_time_ms
                     FROM decision_timers
                     WHERE user_id = ?1 AND item_id = ?2",
                    params![key.user_id, key.item_id],
                    |row| {
                        Ok(DecisionTimer {
                            user_id: row.get(0)?,
                            wishlist_item_id: row.get(1)?,
                            start_time_ms: row.get(2)?,
                            end_time_ms: row.get(3)?,
                        })
                    },
                )
                .optional()
                .with_context(|| "failed to read decision timer")?;
            Ok(timer)
        })
        .await
    }
}
