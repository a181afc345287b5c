pub mod key_locks;
pub mod logging;

pub use key_locks::KeyLocks;
pub use logging::init_logging;
