use async_trait::async_trait;

use crate::error::{Result, WardrobeError};
use crate::models::{ClosetEntry, WishlistEntry};
use crate::similarity::AttributeSource;

use super::Database;

#[async_trait]
impl AttributeSource for Database {
    async fn wishlist_entry(&self, user_id: &str, item_id: &str) -> Result<WishlistEntry> {
        self.get_wishlist_item(user_id, item_id)
            .await
            .map_err(|err| WardrobeError::InputUnavailable(format!("{err:#}")))?
            .ok_or_else(|| {
                WardrobeError::InputUnavailable(format!("wishlist item {item_id} not found"))
            })
    }

    async fn closet_entries(&self, user_id: &str) -> Result<Vec<ClosetEntry>> {
        self.list_closet_entries(user_id)
            .await
            .map_err(|err| WardrobeError::InputUnavailable(format!("{err:#}")))
    }
}
