use serde::{Deserialize, Serialize};

/// Tunable thresholds for ranking closet entries against a wishlist item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimilarityConfig {
    /// Entries below this display score are dropped, except the top one.
    pub min_display_score: u8,

    /// Optional display cap, applied after filtering.
    pub max_results: Option<usize>,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            min_display_score: 20,
            max_results: None,
        }
    }
}
