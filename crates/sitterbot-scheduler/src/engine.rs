use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::watch;
use tracing::{error, info};

use sitterbot_bookings::{BookingStore, BookingWindow};
use sitterbot_sitters::{Sitter, SitterRegistry};
use sitterbot_sms::{send_or_log, SmsSender};

use crate::advance::{plan_advance, Advance};
use crate::error::Result;

/// Background loop that offers each open booking to sitters, one at a time,
/// until someone accepts or everyone has declined.
pub struct OfferEngine {
    sitters: Arc<SitterRegistry>,
    bookings: Arc<BookingStore>,
    sender: Arc<dyn SmsSender>,
    booker_address: String,
    tick_interval: std::time::Duration,
    offer_timeout: Duration,
}

impl OfferEngine {
    pub fn new(
        sitters: Arc<SitterRegistry>,
        bookings: Arc<BookingStore>,
        sender: Arc<dyn SmsSender>,
        booker_address: String,
        tick_secs: u64,
        timeout_minutes: i64,
    ) -> Self {
        Self {
            sitters,
            bookings,
            sender,
            booker_address,
            tick_interval: std::time::Duration::from_secs(tick_secs),
            offer_timeout: Duration::minutes(timeout_minutes),
        }
    }

    /// Main loop. Ticks until `shutdown` broadcasts `true`.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(every = ?self.tick_interval, "offer engine started");
        let mut interval = tokio::time::interval(self.tick_interval);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.tick(Utc::now()).await {
                        error!("offer engine tick error: {e}");
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("offer engine shutting down");
                        break;
                    }
                }
            }
        }
    }

    /// One pass over every booking. A failure on one booking is logged and
    /// does not stop the rest of the tick.
    pub async fn tick(&self, now: DateTime<Utc>) -> Result<()> {
        let sitters = self.sitters.all()?;
        if sitters.is_empty() {
            return Ok(());
        }

        for booking in self.bookings.all()? {
            if let Err(e) = self.advance_booking(&booking.window, &sitters, now).await {
                error!(window = %booking.window, "failed to advance booking: {e}");
            }
        }

        let registered: Vec<String> = sitters.iter().map(|s| s.name.clone()).collect();
        for gone in self.bookings.purge_exhausted(&registered)? {
            send_or_log(
                self.sender.as_ref(),
                &self.booker_address,
                format!(
                    "No sitters are available for {}. Removing the request.",
                    gone.window
                ),
            )
            .await;
        }
        Ok(())
    }

    async fn advance_booking(
        &self,
        window: &BookingWindow,
        sitters: &[Sitter],
        now: DateTime<Utc>,
    ) -> Result<()> {
        // Re-read right before deciding; the webhook handlers run
        // concurrently with this loop.
        let Some(booking) = self.bookings.get(window)? else {
            return Ok(());
        };

        let Advance::Offer(name) = plan_advance(&booking, sitters, now, self.offer_timeout) else {
            return Ok(());
        };
        let Some(sitter) = sitters.iter().find(|s| s.name == name) else {
            return Ok(());
        };

        // State first, sends second: a failed send never rolls the offer back.
        self.bookings.record_offer(window, &name, now)?;
        send_or_log(
            self.sender.as_ref(),
            &sitter.address,
            format!(
                "{}, are you available to babysit on {}?",
                sitter.display_name(),
                booking.window
            ),
        )
        .await;
        send_or_log(
            self.sender.as_ref(),
            &self.booker_address,
            format!(
                "Okay, I offered {} to {}.",
                booking.window,
                sitter.display_name()
            ),
        )
        .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sitterbot_sms::MemorySender;
    use sitterbot_store::SqliteStore;

    const BOOKER: &str = "+15550001111";

    struct Fixture {
        sitters: Arc<SitterRegistry>,
        bookings: Arc<BookingStore>,
        sender: Arc<MemorySender>,
        engine: OfferEngine,
    }

    fn fixture() -> Fixture {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let store: Arc<dyn sitterbot_store::SnapshotStore> =
            Arc::new(SqliteStore::new(conn).unwrap());
        let sitters = Arc::new(SitterRegistry::new(Arc::clone(&store)));
        let bookings = Arc::new(BookingStore::new(Arc::clone(&store)));
        let sender = Arc::new(MemorySender::new());
        let engine = OfferEngine::new(
            Arc::clone(&sitters),
            Arc::clone(&bookings),
            sender.clone() as Arc<dyn SmsSender>,
            BOOKER.to_string(),
            5,
            120,
        );
        Fixture {
            sitters,
            bookings,
            sender,
            engine,
        }
    }

    fn window() -> BookingWindow {
        BookingWindow {
            start: NaiveDate::from_ymd_opt(2026, 6, 21)
                .unwrap()
                .and_hms_opt(17, 0, 0)
                .unwrap(),
            end: chrono::NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn one_offer_per_tick_per_booking() {
        let f = fixture();
        f.sitters.add("amy", "+16125550101").unwrap();
        f.sitters.add("bea", "+16125550102").unwrap();
        f.bookings.create_if_none_open(window()).unwrap();

        f.engine.tick(Utc::now()).await.unwrap();

        let booking = f.bookings.get(&window()).unwrap().unwrap();
        assert_eq!(booking.offers.len(), 1);
        assert_eq!(booking.offers[0].sitter, "amy");
        assert_eq!(f.sender.bodies_to("+16125550101").len(), 1);
        assert!(f.sender.bodies_to("+16125550102").is_empty());
        assert!(f.sender.bodies_to(BOOKER)[0].starts_with("Okay, I offered"));
    }

    #[tokio::test]
    async fn n_sitters_need_n_ticks_before_exhaustion() {
        let f = fixture();
        f.sitters.add("amy", "+16125550101").unwrap();
        f.sitters.add("bea", "+16125550102").unwrap();
        f.bookings.create_if_none_open(window()).unwrap();

        let t0 = Utc::now();
        f.engine.tick(t0).await.unwrap();
        f.bookings.resolve_offer(&window(), "amy", false).unwrap();

        // bea has no offer yet, so the booking cannot be exhausted here
        assert_eq!(f.bookings.all().unwrap().len(), 1);

        f.engine.tick(t0 + Duration::seconds(5)).await.unwrap();
        let booking = f.bookings.get(&window()).unwrap().unwrap();
        assert_eq!(booking.offers.len(), 2);
        assert_eq!(booking.offers[1].sitter, "bea");
    }

    #[tokio::test]
    async fn stale_pending_offer_advances_to_the_next_sitter() {
        let f = fixture();
        f.sitters.add("amy", "+16125550101").unwrap();
        f.sitters.add("bea", "+16125550102").unwrap();
        f.bookings.create_if_none_open(window()).unwrap();

        let t0 = Utc::now();
        f.engine.tick(t0).await.unwrap();

        // amy never answers; within the timeout bea is not approached
        f.engine.tick(t0 + Duration::minutes(60)).await.unwrap();
        assert!(f.sender.bodies_to("+16125550102").is_empty());

        f.engine.tick(t0 + Duration::minutes(121)).await.unwrap();
        assert_eq!(f.sender.bodies_to("+16125550102").len(), 1);

        // amy's offer is still pending, and her late yes still lands
        let booking = f.bookings.get(&window()).unwrap().unwrap();
        assert_eq!(
            booking.offer_for("amy").unwrap().status,
            sitterbot_bookings::OfferStatus::Pending
        );
        f.bookings.resolve_offer(&window(), "amy", true).unwrap();
    }

    #[tokio::test]
    async fn exhausted_booking_is_purged_and_reported() {
        let f = fixture();
        f.sitters.add("amy", "+16125550101").unwrap();
        f.bookings.create_if_none_open(window()).unwrap();

        let t0 = Utc::now();
        f.engine.tick(t0).await.unwrap();
        f.bookings.resolve_offer(&window(), "amy", false).unwrap();

        f.engine.tick(t0 + Duration::seconds(5)).await.unwrap();

        assert!(f.bookings.all().unwrap().is_empty());
        let booker_msgs = f.sender.bodies_to(BOOKER);
        assert!(booker_msgs
            .last()
            .unwrap()
            .starts_with("No sitters are available"));
        // amy was asked exactly once, never re-offered
        assert_eq!(f.sender.bodies_to("+16125550101").len(), 1);
    }

    #[tokio::test]
    async fn accepted_booking_is_not_advanced_or_purged() {
        let f = fixture();
        f.sitters.add("amy", "+16125550101").unwrap();
        f.sitters.add("bea", "+16125550102").unwrap();
        f.bookings.create_if_none_open(window()).unwrap();

        let t0 = Utc::now();
        f.engine.tick(t0).await.unwrap();
        f.bookings.resolve_offer(&window(), "amy", true).unwrap();

        f.engine.tick(t0 + Duration::minutes(300)).await.unwrap();
        assert!(f.sender.bodies_to("+16125550102").is_empty());
        assert_eq!(f.bookings.all().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn tick_without_sitters_does_nothing() {
        let f = fixture();
        f.bookings.create_if_none_open(window()).unwrap();
        f.engine.tick(Utc::now()).await.unwrap();
        assert!(f.sender.sent().is_empty());
        assert_eq!(f.bookings.all().unwrap().len(), 1);
    }
}
