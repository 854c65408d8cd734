use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use sitterbot_core::types::BookingWindow;

/// Lifecycle state of one sitter's offer on one booking.
///
/// `pending --accept--> accepted` and `pending --decline--> declined`; both
/// transitions are one-way and exactly one resolution per sitter per booking
/// is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Declined,
}

/// One sitter's invitation to fill a specific booking window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub sitter: String,
    pub status: OfferStatus,
    /// When the offer was first extended. Never reset: a stale pending offer
    /// stays outstanding until the sitter replies or the booking ends.
    pub offered_at: DateTime<Utc>,
}

/// A booking request and its offer history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub window: BookingWindow,
    /// At most one entry per sitter; order is the order sitters were
    /// approached.
    pub offers: Vec<Offer>,
}

impl Booking {
    pub fn new(window: BookingWindow) -> Self {
        Self {
            window,
            offers: Vec::new(),
        }
    }

    pub fn offer_for(&self, sitter: &str) -> Option<&Offer> {
        self.offers.iter().find(|o| o.sitter == sitter)
    }

    /// The sitter whose offer is accepted, if any.
    pub fn accepted_by(&self) -> Option<&str> {
        self.offers
            .iter()
            .find(|o| o.status == OfferStatus::Accepted)
            .map(|o| o.sitter.as_str())
    }

    /// A booking is open while nobody has accepted it.
    pub fn is_open(&self) -> bool {
        self.accepted_by().is_none()
    }

    /// Newest `offered_at` among still-pending offers.
    pub fn latest_pending_at(&self) -> Option<DateTime<Utc>> {
        self.offers
            .iter()
            .filter(|o| o.status == OfferStatus::Pending)
            .map(|o| o.offered_at)
            .max()
    }

    /// True when every registered sitter has a resolved offer and none
    /// accepted. An empty registry never exhausts a booking.
    pub fn is_exhausted(&self, registered: &[String]) -> bool {
        !registered.is_empty()
            && self.accepted_by().is_none()
            && registered.iter().all(|name| {
                matches!(self.offer_for(name), Some(o) if o.status != OfferStatus::Pending)
            })
    }
}
