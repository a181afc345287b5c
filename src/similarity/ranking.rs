use crate::models::{ClosetEntry, ClothingAttributeRecord};

use super::config::SimilarityConfig;
use super::scoring::{compare_records, SimilarityResult};

/// Rank a user's closet against one wishlist item.
///
/// Results are sorted by raw score, highest first, with ties kept in closet
/// order. Entries under `min_display_score` are dropped but the top-ranked
/// entry always survives, so a non-empty closet never yields an empty list.
pub fn compute_similarity(
    wishlist: &ClothingAttributeRecord,
    closet: &[ClosetEntry],
    config: &SimilarityConfig,
) -> Vec<SimilarityResult> {
    let mut scored: Vec<SimilarityResult> = closet
        .iter()
        .map(|entry| SimilarityResult::new(entry.id.clone(), compare_records(wishlist, &entry.attributes)))
        .collect();

    // `sort_by` is stable, which keeps closet order for equal scores.
    scored.sort_by(|a, b| b.raw_score.total_cmp(&a.raw_score));

    let mut results: Vec<SimilarityResult> = scored
        .into_iter()
        .enumerate()
        .filter(|(rank, result)| *rank == 0 || result.display_score >= config.min_display_score)
        .map(|(_, result)| result)
        .collect();

    if let Some(cap) = config.max_results {
        results.truncate(cap.max(1));
    }

    results
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn closet_entry(id: &str, top: Option<&str>, bottom: Option<&str>) -> ClosetEntry {
        ClosetEntry {
            id: id.into(),
            user_id: "u1".into(),
            details: None,
            genre: None,
            rating: None,
            attributes: ClothingAttributeRecord {
                top: top.map(String::from),
                bottom: bottom.map(String::from),
                ..Default::default()
            },
            created_at: Utc::now(),
        }
    }

    fn wishlist() -> ClothingAttributeRecord {
        ClothingAttributeRecord {
            top: Some("red silk blouse".into()),
            bottom: Some("black jeans".into()),
            ..Default::default()
        }
    }

    #[test]
    fn empty_closet_gives_empty_result() {
        assert!(compute_similarity(&wishlist(), &[], &SimilarityConfig::default()).is_empty());
    }

    #[test]
    fn sorts_descending_and_filters_below_threshold() {
        let closet = vec![
            closet_entry("weak", Some("green hoodie"), None),
            closet_entry("close", Some("red blouse"), Some("blue jeans")),
            closet_entry("exact", Some("red silk blouse"), Some("black jeans")),
        ];

        let results = compute_similarity(&wishlist(), &closet, &SimilarityConfig::default());
        let ids: Vec<_> = results.iter().map(|r| r.closet_entry_id.as_str()).collect();
        assert_eq!(ids, vec!["exact", "close"]);
        assert_eq!(results[0].display_score, 100);
        assert_eq!(results[0].star_rating, 5);
        assert_eq!(results[1].display_score, 58);
    }

    #[test]
    fn keeps_top_entry_when_nothing_passes() {
        let closet = vec![
            closet_entry("a", None, None),
            closet_entry("b", Some("parka"), None),
            closet_entry("c", None, Some("shorts")),
        ];

        let results = compute_similarity(
            &ClothingAttributeRecord::default(),
            &closet,
            &SimilarityConfig::default(),
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].closet_entry_id, "a");
        assert_eq!(results[0].raw_score, 0.0);
    }

    #[test]
    fn ties_keep_closet_order() {
        let closet = vec![
            closet_entry("first", Some("red blouse"), None),
            closet_entry("second", Some("blouse red"), None),
        ];
        let results = compute_similarity(&wishlist(), &closet, &SimilarityConfig::default());
        let ids: Vec<_> = results.iter().map(|r| r.closet_entry_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn cap_never_drops_the_top_entry() {
        let closet = vec![
            closet_entry("a", Some("red blouse"), None),
            closet_entry("b", Some("red top"), None),
        ];
        let config = SimilarityConfig {
            max_results: Some(0),
            ..Default::default()
        };
        let results = compute_similarity(&wishlist(), &closet, &config);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].closet_entry_id, "a");
    }
}
