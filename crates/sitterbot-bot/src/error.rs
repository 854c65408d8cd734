use thiserror::Error;

/// Errors that escape message handling. Expected conditions (already
/// registered, already booked, nothing pending…) are mapped to reply text
/// before they get here; what remains is store-level failure, and the
/// webhook layer answers with a transient-failure message.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("registry error: {0}")]
    Registry(#[from] sitterbot_sitters::RegistryError),

    #[error("booking store error: {0}")]
    Bookings(#[from] sitterbot_bookings::BookingError),
}

pub type Result<T> = std::result::Result<T, BotError>;
