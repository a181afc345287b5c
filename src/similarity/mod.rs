pub mod config;
pub mod lookup;
pub mod ranking;
pub mod scoring;

pub use config::SimilarityConfig;
pub use lookup::{find_similar_items, AttributeSource};
pub use ranking::compute_similarity;
pub use scoring::{compare_records, slot_similarity, SimilarityResult};
