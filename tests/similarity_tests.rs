//! Ranking closet entries against wishlist items, from pure scoring up to the
//! database-backed lookup.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use wardrobe_core::{
    db::repositories::{NewClosetEntry, NewWishlistItem},
    error::Result,
    models::{ClosetEntry, ClothingAttributeRecord, WishlistEntry},
    similarity::{compare_records, AttributeSource},
    compute_similarity, find_similar_items, Database, SimilarityConfig, WardrobeCore,
    WardrobeError,
};

fn attrs(
    top: Option<&str>,
    bottom: Option<&str>,
    outerwear: Option<&str>,
    shoes: Option<&str>,
) -> ClothingAttributeRecord {
    ClothingAttributeRecord {
        top: top.map(String::from),
        bottom: bottom.map(String::from),
        outerwear: outerwear.map(String::from),
        shoes: shoes.map(String::from),
    }
}

fn closet(id: &str, attributes: ClothingAttributeRecord) -> ClosetEntry {
    ClosetEntry {
        id: id.into(),
        user_id: "u1".into(),
        details: None,
        genre: None,
        rating: None,
        attributes,
        created_at: Utc::now(),
    }
}

fn open_db(dir: &Path) -> Database {
    Database::new(dir.join("wardrobe.sqlite3")).unwrap()
}

#[test]
fn blouse_and_jeans_example_scores_58() {
    let wishlist = attrs(Some("red silk blouse"), Some("black jeans"), None, None);
    let pool = vec![closet("c1", attrs(Some("red blouse"), Some("blue jeans"), None, None))];

    let results = compute_similarity(&wishlist, &pool, &SimilarityConfig::default());

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].closet_entry_id, "c1");
    assert!((results[0].raw_score - 0.5833).abs() < 1e-3);
    assert_eq!(results[0].display_score, 58);
    assert_eq!(results[0].star_rating, 3);
}

#[test]
fn reordered_words_match_fully() {
    let a = attrs(Some("blue jacket"), None, None, None);
    let b = attrs(Some("jacket blue"), None, None, None);
    assert_eq!(compare_records(&a, &b), 1.0);
}

#[test]
fn scores_stay_in_bounds() {
    let samples = [
        attrs(Some("red silk blouse"), Some("black jeans"), None, None),
        attrs(Some("a"), Some("a a a a"), Some("long wool trench coat"), Some("x")),
        attrs(None, None, None, Some("white leather sneakers")),
        attrs(Some("  "), None, Some("denim"), Some("boots")),
        ClothingAttributeRecord::default(),
    ];

    for wishlist in &samples {
        let pool: Vec<_> = samples
            .iter()
            .enumerate()
            .map(|(i, a)| closet(&format!("c{i}"), a.clone()))
            .collect();

        for result in compute_similarity(wishlist, &pool, &SimilarityConfig::default()) {
            assert!((0.0..=1.0).contains(&result.raw_score));
            assert!(result.display_score <= 100);
            assert!(result.star_rating <= 5);
        }
    }
}

#[test]
fn disjoint_slots_score_zero() {
    let wishlist = attrs(Some("white tee"), None, None, None);
    let other = attrs(None, Some("white chinos"), Some("white parka"), None);
    assert_eq!(compare_records(&wishlist, &other), 0.0);
}

#[test]
fn unclassified_wishlist_still_surfaces_one_entry() {
    let pool = vec![
        closet("c1", attrs(Some("grey hoodie"), None, None, None)),
        closet("c2", attrs(None, Some("cargo pants"), None, None)),
        closet("c3", attrs(None, None, None, Some("boots"))),
    ];

    let results = compute_similarity(
        &ClothingAttributeRecord::default(),
        &pool,
        &SimilarityConfig::default(),
    );

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].closet_entry_id, "c1");
    assert!(pool
        .iter()
        .all(|entry| compare_records(&ClothingAttributeRecord::default(), &entry.attributes) == 0.0));
}

#[test]
fn empty_pool_is_empty_result() {
    let wishlist = attrs(Some("red silk blouse"), None, None, None);
    assert!(compute_similarity(&wishlist, &[], &SimilarityConfig::default()).is_empty());
}

#[test]
fn everything_after_the_first_clears_threshold() {
    let wishlist = attrs(Some("navy wool blazer"), Some("grey trousers"), None, Some("brown loafers"));
    let pool = vec![
        closet("none", attrs(Some("pink tank"), None, None, None)),
        closet("some", attrs(Some("navy blazer"), Some("black trousers"), None, None)),
        closet("weak", attrs(Some("wool"), Some("jeans"), None, Some("sneakers"))),
        closet("best", attrs(Some("navy wool blazer"), Some("grey trousers"), None, Some("brown loafers"))),
    ];

    let results = compute_similarity(&wishlist, &pool, &SimilarityConfig::default());

    assert_eq!(results[0].closet_entry_id, "best");
    assert!(results.windows(2).all(|w| w[0].raw_score >= w[1].raw_score));
    assert!(results.iter().skip(1).all(|r| r.display_score >= 20));
    assert!(!results.iter().any(|r| r.closet_entry_id == "none"));
}

#[test]
fn stricter_threshold_and_cap_come_from_config() {
    let wishlist = attrs(Some("red silk blouse"), Some("black jeans"), None, None);
    let pool = vec![
        closet("half", attrs(Some("red blouse"), Some("blue jeans"), None, None)),
        closet("exact", attrs(Some("red silk blouse"), Some("black jeans"), None, None)),
        closet("third", attrs(Some("silk scarf"), None, None, None)),
    ];

    let strict = SimilarityConfig {
        min_display_score: 60,
        max_results: None,
    };
    let ids: Vec<_> = compute_similarity(&wishlist, &pool, &strict)
        .into_iter()
        .map(|r| r.closet_entry_id)
        .collect();
    assert_eq!(ids, vec!["exact"]);

    let capped = SimilarityConfig {
        min_display_score: 20,
        max_results: Some(2),
    };
    assert_eq!(compute_similarity(&wishlist, &pool, &capped).len(), 2);
}

struct UnavailableSource;

#[async_trait]
impl AttributeSource for UnavailableSource {
    async fn wishlist_entry(&self, _user_id: &str, _item_id: &str) -> Result<WishlistEntry> {
        Err(WardrobeError::InputUnavailable("backend offline".into()))
    }

    async fn closet_entries(&self, _user_id: &str) -> Result<Vec<ClosetEntry>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn lookup_propagates_unavailable_input() {
    let err = find_similar_items(&UnavailableSource, "u1", "w1", &SimilarityConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, WardrobeError::InputUnavailable(_)));
}

#[tokio::test]
async fn lookup_requires_a_user() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_db(dir.path());

    let err = find_similar_items(&db, "", "w1", &SimilarityConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, WardrobeError::InputUnavailable(_)));
}

#[tokio::test]
async fn lookup_ranks_the_owners_closet_only() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_db(dir.path());

    let wishlist = db
        .insert_wishlist_item(NewWishlistItem {
            id: Some("w1".into()),
            user_id: "u1".into(),
            name: "Silk blouse".into(),
            notes: Some("for the wedding".into()),
            attributes: attrs(Some("red silk blouse"), Some("black jeans"), None, None),
        })
        .await
        .unwrap();
    assert_eq!(wishlist.id, "w1");

    db.insert_closet_entry(NewClosetEntry {
        id: Some("mine".into()),
        user_id: "u1".into(),
        details: Some("Date night".into()),
        genre: Some("casual".into()),
        rating: Some(4),
        attributes: attrs(Some("red blouse"), Some("blue jeans"), None, None),
    })
    .await
    .unwrap();
    db.insert_closet_entry(NewClosetEntry {
        id: Some("theirs".into()),
        user_id: "u2".into(),
        attributes: attrs(Some("red silk blouse"), Some("black jeans"), None, None),
        ..Default::default()
    })
    .await
    .unwrap();

    let results = find_similar_items(&db, "u1", "w1", &SimilarityConfig::default())
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].closet_entry_id, "mine");
    assert_eq!(results[0].display_score, 58);

    // Another user cannot look up u1's wishlist item.
    let err = find_similar_items(&db, "u2", "w1", &SimilarityConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, WardrobeError::InputUnavailable(_)));
}

#[tokio::test]
async fn closet_lists_in_insertion_order() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_db(dir.path());

    for id in ["a", "b", "c"] {
        db.insert_closet_entry(NewClosetEntry {
            id: Some(id.into()),
            user_id: "u1".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    }
    let generated = db
        .insert_closet_entry(NewClosetEntry {
            user_id: "u1".into(),
            rating: Some(5),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(generated.id.starts_with("cl_"));

    let entries = db.list_closet_entries("u1").await.unwrap();
    let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c", generated.id.as_str()]);
    assert_eq!(entries[3].rating, Some(5));
    assert!(db.list_closet_entries("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn wishlist_items_are_listed_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_db(dir.path());

    for id in ["old", "new"] {
        db.insert_wishlist_item(NewWishlistItem {
            id: Some(id.into()),
            user_id: "u1".into(),
            name: id.into(),
            ..Default::default()
        })
        .await
        .unwrap();
    }

    let items = db.list_wishlist_items("u1").await.unwrap();
    let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["new", "old"]);
    assert!(db.get_wishlist_item("u1", "missing").await.unwrap().is_none());
    assert!(db
        .insert_wishlist_item(NewWishlistItem::default())
        .await
        .is_err());
}

#[tokio::test]
async fn core_uses_persisted_similarity_settings() {
    let dir = tempfile::tempdir().unwrap();
    let core = WardrobeCore::open(dir.path()).unwrap();

    core.db
        .insert_wishlist_item(NewWishlistItem {
            id: Some("w1".into()),
            user_id: "u1".into(),
            name: "Blouse".into(),
            attributes: attrs(Some("red silk blouse"), Some("black jeans"), None, None),
            ..Default::default()
        })
        .await
        .unwrap();
    for (id, top) in [("exact", "red silk blouse"), ("close", "red blouse")] {
        core.db
            .insert_closet_entry(NewClosetEntry {
                id: Some(id.into()),
                user_id: "u1".into(),
                attributes: attrs(Some(top), Some("black jeans"), None, None),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    assert_eq!(core.similar_items("u1", "w1").await.unwrap().len(), 2);

    core.settings
        .update_similarity(SimilarityConfig {
            min_display_score: 90,
            max_results: None,
        })
        .unwrap();
    let results = core.similar_items("u1", "w1").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].closet_entry_id, "exact");
}
