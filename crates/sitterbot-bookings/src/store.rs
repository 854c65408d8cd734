use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::info;

use sitterbot_store::{SnapshotStore, StoreError};

use crate::error::{BookingError, Result};
use crate::types::{Booking, BookingWindow, Offer, OfferStatus};

const COLLECTION: &str = "bookings";

/// The only writer of the `bookings` collection.
///
/// Mutations hold `lock` across the whole reload-mutate-persist sequence:
/// the offer scheduler and the webhook handlers run concurrently against
/// this store, and a lock around the save alone would let them clobber each
/// other's reloads.
pub struct BookingStore {
    store: Arc<dyn SnapshotStore>,
    lock: Mutex<()>,
}

impl BookingStore {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// Create a booking unless one is still seeking a sitter.
    ///
    /// A window that already exists is rejected outright: identical windows
    /// are the same booking.
    pub fn create_if_none_open(&self, window: BookingWindow) -> Result<Booking> {
        let _guard = self.lock.lock().unwrap();
        let mut bookings = self.load()?;
        if let Some(open) = bookings.iter().find(|b| b.is_open()) {
            return Err(BookingError::ActiveBookingExists {
                window: open.window,
            });
        }
        if bookings.iter().any(|b| b.window == window) {
            return Err(BookingError::ActiveBookingExists { window });
        }
        let booking = Booking::new(window);
        bookings.push(booking.clone());
        self.save(&bookings)?;
        info!(window = %window, "booking created");
        Ok(booking)
    }

    pub fn get(&self, window: &BookingWindow) -> Result<Option<Booking>> {
        Ok(self.load()?.into_iter().find(|b| b.window == *window))
    }

    pub fn all(&self) -> Result<Vec<Booking>> {
        self.load()
    }

    /// Add a pending offer for `sitter`. At most one offer per sitter per
    /// booking, ever.
    pub fn record_offer(
        &self,
        window: &BookingWindow,
        sitter: &str,
        offered_at: DateTime<Utc>,
    ) -> Result<()> {
        let _guard = self.lock.lock().unwrap();
        let mut bookings = self.load()?;
        let booking = bookings
            .iter_mut()
            .find(|b| b.window == *window)
            .ok_or(BookingError::NotFound { window: *window })?;
        if booking.offer_for(sitter).is_some() {
            return Err(BookingError::DuplicateOffer {
                sitter: sitter.to_string(),
                window: *window,
            });
        }
        booking.offers.push(Offer {
            sitter: sitter.to_string(),
            status: OfferStatus::Pending,
            offered_at,
        });
        self.save(&bookings)?;
        info!(window = %window, sitter, "offer recorded");
        Ok(())
    }

    /// Resolve `sitter`'s pending offer. First acceptance wins: once any
    /// sitter holds an accepted offer, further accepts fail `AlreadyBooked`.
    ///
    /// Returns the booking as it looks after the transition.
    pub fn resolve_offer(
        &self,
        window: &BookingWindow,
        sitter: &str,
        accept: bool,
    ) -> Result<Booking> {
        let _guard = self.lock.lock().unwrap();
        let mut bookings = self.load()?;
        let no_such = || BookingError::NoSuchOffer {
            sitter: sitter.to_string(),
            window: *window,
        };
        let booking = bookings
            .iter_mut()
            .find(|b| b.window == *window)
            .ok_or_else(no_such)?;
        let idx = booking
            .offers
            .iter()
            .position(|o| o.sitter == sitter)
            .ok_or_else(no_such)?;

        if booking.offers[idx].status != OfferStatus::Pending {
            return Err(BookingError::AlreadyResolved {
                sitter: sitter.to_string(),
                window: *window,
                status: booking.offers[idx].status,
            });
        }
        if accept {
            if let Some(by) = booking.accepted_by() {
                return Err(BookingError::AlreadyBooked {
                    window: *window,
                    by: by.to_string(),
                });
            }
        }

        booking.offers[idx].status = if accept {
            OfferStatus::Accepted
        } else {
            OfferStatus::Declined
        };
        let resolved = booking.clone();
        self.save(&bookings)?;
        info!(window = %window, sitter, accept, "offer resolved");
        Ok(resolved)
    }

    /// Remove bookings every registered sitter has turned down. Returns the
    /// removed bookings so the caller can report them.
    pub fn purge_exhausted(&self, registered: &[String]) -> Result<Vec<Booking>> {
        let _guard = self.lock.lock().unwrap();
        let bookings = self.load()?;
        let (gone, keep): (Vec<Booking>, Vec<Booking>) = bookings
            .into_iter()
            .partition(|b| b.is_exhausted(registered));
        if gone.is_empty() {
            return Ok(gone);
        }
        self.save(&keep)?;
        for booking in &gone {
            info!(window = %booking.window, "exhausted booking purged");
        }
        Ok(gone)
    }

    fn load(&self) -> Result<Vec<Booking>> {
        match self.store.load_collection(COLLECTION)? {
            Some(value) => Ok(serde_json::from_value(value).map_err(StoreError::from)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, bookings: &[Booking]) -> Result<()> {
        let value = serde_json::to_value(bookings).map_err(StoreError::from)?;
        self.store.save_collection(COLLECTION, &value)?;
        Ok(())
    }
}
