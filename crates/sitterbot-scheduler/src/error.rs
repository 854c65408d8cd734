use thiserror::Error;

/// Errors that can surface from a scheduler tick. One booking's error is
/// logged and skipped; the tick carries on with the rest.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("registry error: {0}")]
    Registry(#[from] sitterbot_sitters::RegistryError),

    #[error("booking store error: {0}")]
    Bookings(#[from] sitterbot_bookings::BookingError),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
