pub mod clock;
pub mod controller;
pub mod format;
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{DecisionTimerManager, TimerSubscription};
pub use format::format_remaining;
pub use state::{DecisionTimerStatus, TimerState, TimerView};
