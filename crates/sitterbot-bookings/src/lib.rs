//! `sitterbot-bookings` — booking requests and the ordered history of offers
//! made for each one.
//!
//! A booking is identified by its window; its `offers` list records, in the
//! order sitters were approached, who was asked and what they said. The
//! store owns the `bookings` collection exclusively and enforces the two
//! invariants everything else leans on: at most one offer per sitter per
//! booking, and at most one accepted offer per booking.

pub mod error;
pub mod store;
pub mod types;

pub use error::{BookingError, Result};
pub use store::BookingStore;
pub use types::{Booking, BookingWindow, Offer, OfferStatus};
