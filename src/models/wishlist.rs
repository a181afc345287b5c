use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ClothingAttributeRecord;

/// A candidate-for-purchase item owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub notes: Option<String>,
    pub attributes: ClothingAttributeRecord,
    pub created_at: DateTime<Utc>,
}
