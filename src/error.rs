use thiserror::Error;

/// Outcome taxonomy for reservation operations.
///
/// `SeatUnavailable` and `NotBooked` are expected under contention and never
/// fatal; `Store` is the only variant that signals a server-side fault.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("seat is already booked")]
    SeatUnavailable,

    #[error("seat is not booked")]
    NotBooked,

    #[error("storage error: {0}")]
    Store(#[from] sqlx::Error),
}
