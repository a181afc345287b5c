pub mod attributes;
pub mod closet;
pub mod decision_timer;
pub mod wishlist;

pub use attributes::{AttributeSlot, ClothingAttributeRecord};
pub use closet::ClosetEntry;
pub use decision_timer::{DecisionTimer, TimerKey, DECISION_WINDOW_MS};
pub use wishlist::WishlistEntry;
