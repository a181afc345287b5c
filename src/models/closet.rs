use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ClothingAttributeRecord;

/// An owned outfit or garment; the comparison pool for similarity scoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClosetEntry {
    pub id: String,
    pub user_id: String,
    pub details: Option<String>,
    pub genre: Option<String>,
    pub rating: Option<u8>,
    pub attributes: ClothingAttributeRecord,
    pub created_at: DateTime<Utc>,
}
