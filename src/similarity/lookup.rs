use async_trait::async_trait;
use log::{debug, warn};

use crate::error::{Result, WardrobeError};
use crate::models::{ClosetEntry, WishlistEntry};

use super::config::SimilarityConfig;
use super::ranking::compute_similarity;
use super::scoring::SimilarityResult;

/// Supplies already-classified wishlist and closet records for one user.
#[async_trait]
pub trait AttributeSource: Send + Sync {
    async fn wishlist_entry(&self, user_id: &str, item_id: &str) -> Result<WishlistEntry>;

    /// Snapshot of the user's whole closet at call time.
    async fn closet_entries(&self, user_id: &str) -> Result<Vec<ClosetEntry>>;
}

/// Fetch a wishlist item and the owner's closet, then rank the closet.
///
/// Fails with `InputUnavailable` when there is no signed-in user or either
/// input cannot be loaded. No retries happen here.
pub async fn find_similar_items<S>(
    source: &S,
    user_id: &str,
    item_id: &str,
    config: &SimilarityConfig,
) -> Result<Vec<SimilarityResult>>
where
    S: AttributeSource + ?Sized,
{
    if user_id.trim().is_empty() {
        return Err(WardrobeError::InputUnavailable(
            "no signed-in user".to_string(),
        ));
    }

    let wishlist = source.wishlist_entry(user_id, item_id).await?;
    let closet = source.closet_entries(user_id).await?;

    if wishlist.attributes.is_empty() {
        warn!("Wishlist item {item_id} has no classified attributes");
    }

    let results = compute_similarity(&wishlist.attributes, &closet, config);
    debug!(
        "Ranked {} closet entries for wishlist item {}; kept {}",
        closet.len(),
        item_id,
        results.len()
    );

    Ok(results)
}
