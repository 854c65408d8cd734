use sitterbot_store::StoreError;
use thiserror::Error;

use crate::types::{BookingWindow, OfferStatus};

/// Errors from booking store operations. Everything except `Store` is an
/// expected, locally-recovered condition that maps to a specific user-facing
/// message.
#[derive(Debug, Error)]
pub enum BookingError {
    /// A booking is still seeking a sitter; only one may at a time.
    #[error("a booking is already being filled: {window}")]
    ActiveBookingExists { window: BookingWindow },

    /// No booking exists for this window.
    #[error("no booking for {window}")]
    NotFound { window: BookingWindow },

    /// This sitter was already offered this booking.
    #[error("{sitter} was already offered {window}")]
    DuplicateOffer {
        sitter: String,
        window: BookingWindow,
    },

    /// This sitter has no offer on this booking (or the booking is gone).
    #[error("no offer for {sitter} on {window}")]
    NoSuchOffer {
        sitter: String,
        window: BookingWindow,
    },

    /// The sitter's offer was already accepted or declined.
    #[error("{sitter}'s offer on {window} is already {status:?}")]
    AlreadyResolved {
        sitter: String,
        window: BookingWindow,
        status: OfferStatus,
    },

    /// Another sitter already accepted this booking; first acceptance wins.
    #[error("{window} is already booked by {by}")]
    AlreadyBooked { window: BookingWindow, by: String },

    /// The snapshot store failed; no mutation was applied.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, BookingError>;
