pub mod closet;
pub mod decision_timers;
pub mod wishlist;

pub use closet::NewClosetEntry;
pub use wishlist::NewWishlistItem;
