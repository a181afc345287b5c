use serde::{Deserialize, Serialize};

use crate::models::{AttributeSlot, ClothingAttributeRecord};

const MAX_STARS: u8 = 5;

/// Score of one closet entry against a wishlist item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityResult {
    pub closet_entry_id: String,
    pub raw_score: f64,
    pub display_score: u8,
    pub star_rating: u8,
}

impl SimilarityResult {
    pub fn new(closet_entry_id: impl Into<String>, raw_score: f64) -> Self {
        let raw_score = raw_score.clamp(0.0, 1.0);
        let display_score = (raw_score * 100.0).round() as u8;
        Self {
            closet_entry_id: closet_entry_id.into(),
            raw_score,
            display_score,
            star_rating: star_rating(display_score),
        }
    }
}

/// Stars out of five: one star per 20 display points, rounded.
pub fn star_rating(display_score: u8) -> u8 {
    ((f64::from(display_score) / 20.0).round() as u8).min(MAX_STARS)
}

/// Lowercased whitespace-separated tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

fn tokens_match(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Fraction of `a`'s tokens that contain, or are contained in, some token of
/// `b`, over the longer token list. Word order is irrelevant.
pub fn slot_similarity(a: &str, b: &str) -> f64 {
    let words_a = tokenize(a);
    let words_b = tokenize(b);
    let longest = words_a.len().max(words_b.len());
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let matched = words_a
        .iter()
        .filter(|word| words_b.iter().any(|other| tokens_match(word, other)))
        .count();

    matched as f64 / longest as f64
}

/// Mean slot similarity over the slots both records populate; 0 when they
/// share none.
pub fn compare_records(wishlist: &ClothingAttributeRecord, closet: &ClothingAttributeRecord) -> f64 {
    let mut total = 0.0;
    let mut compared = 0usize;

    for slot in AttributeSlot::ALL {
        if let (Some(a), Some(b)) = (wishlist.slot(slot), closet.slot(slot)) {
            total += slot_similarity(a, b);
            compared += 1;
        }
    }

    if compared == 0 {
        0.0
    } else {
        total / compared as f64
    }
}
