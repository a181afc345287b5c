use thiserror::Error;

/// Failures surfaced by the similarity lookup and the decision timer manager.
#[derive(Debug, Error)]
pub enum WardrobeError {
    /// The wishlist item or closet pool could not be supplied.
    #[error("input unavailable: {0}")]
    InputUnavailable(String),

    /// The timer store rejected or failed a `start` write.
    #[error("failed to write decision timer: {0}")]
    TimerWriteFailure(String),

    /// A timer subscription could not be established.
    #[error("failed to read decision timer: {0}")]
    TimerReadFailure(String),
}

pub type Result<T, E = WardrobeError> = std::result::Result<T, E>;
