//! Wishlist similarity scoring and 48 hour decision timers for a wardrobe app.
//!
//! The presentation layer hands plain data in and renders what comes back:
//! ranked closet matches for a wishlist item, and a ticking countdown that a
//! user starts before deciding whether to buy it.

pub mod db;
pub mod error;
pub mod models;
pub mod settings;
pub mod similarity;
pub mod store;
pub mod timer;
pub mod utils;

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use log::info;

pub use db::Database;
pub use error::WardrobeError;
pub use settings::{Settings, SettingsStore};
pub use similarity::{compute_similarity, find_similar_items, SimilarityConfig, SimilarityResult};
pub use store::{MemoryTimerStore, SqliteTimerStore, TimerStore};
pub use timer::{DecisionTimerManager, TimerSubscription, TimerView};
pub use utils::init_logging;

/// Everything a screen needs, opened from one data directory.
pub struct WardrobeCore {
    pub db: Database,
    pub timers: DecisionTimerManager<SqliteTimerStore>,
    pub settings: SettingsStore,
}

impl WardrobeCore {
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir).with_context(|| {
            format!("failed to create data directory {}", data_dir.display())
        })?;

        let database = Database::new(data_dir.join("wardrobe.sqlite3"))?;
        let settings = SettingsStore::new(data_dir.join("settings.json"))?;

        let timers = DecisionTimerManager::new(Arc::new(SqliteTimerStore::new(database.clone())))
            .with_tick_interval(settings.timer().tick_interval());

        info!("Wardrobe core opened at {}", data_dir.display());

        Ok(Self {
            db: database,
            timers,
            settings,
        })
    }

    /// Closet entries most like wishlist item `item_id`, best first.
    pub async fn similar_items(
        &self,
        user_id: &str,
        item_id: &str,
    ) -> error::Result<Vec<SimilarityResult>> {
        find_similar_items(&self.db, user_id, item_id, &self.settings.similarity()).await
    }
}
