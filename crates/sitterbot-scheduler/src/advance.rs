use chrono::{DateTime, Duration, Utc};

use sitterbot_bookings::Booking;
use sitterbot_sitters::Sitter;

/// What the engine should do for one booking this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Extend a new offer to this sitter.
    Offer(String),
    /// Nothing to do: accepted, waiting on a live offer, or out of sitters.
    Wait,
}

/// Advance rule for one booking.
///
/// At most one new offer per call. A new sitter becomes eligible when no
/// pending offer is outstanding, or when the newest pending offer is older
/// than `timeout`. The stale offer itself is left untouched: a late reply
/// is still honored while the booking is open. Candidates are taken in
/// registry order, skipping sitters who already have an offer.
pub fn plan_advance(
    booking: &Booking,
    sitters: &[Sitter],
    now: DateTime<Utc>,
    timeout: Duration,
) -> Advance {
    if booking.accepted_by().is_some() {
        return Advance::Wait;
    }

    if let Some(last) = booking.latest_pending_at() {
        if now - last <= timeout {
            return Advance::Wait;
        }
    }

    match sitters
        .iter()
        .find(|s| booking.offer_for(&s.name).is_none())
    {
        Some(next) => Advance::Offer(next.name.clone()),
        None => Advance::Wait,
    }
}
