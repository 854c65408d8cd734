use std::sync::Arc;

use tracing::{info, warn};

use sitterbot_bookings::BookingStore;
use sitterbot_sitters::SitterRegistry;
use sitterbot_sms::{InboundSms, SmsSender};

use crate::commands;
use crate::error::Result;
use crate::responder;

/// Routes each inbound message by sender identity: the booker gets command
/// handling, registered sitters get offer resolution, strangers are dropped.
pub struct Dispatcher {
    registry: Arc<SitterRegistry>,
    bookings: Arc<BookingStore>,
    sender: Arc<dyn SmsSender>,
    booker_address: String,
    country: String,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<SitterRegistry>,
        bookings: Arc<BookingStore>,
        sender: Arc<dyn SmsSender>,
        booker_address: String,
        country: String,
    ) -> Self {
        Self {
            registry,
            bookings,
            sender,
            booker_address,
            country,
        }
    }

    /// Handle one inbound message; `None` means no reply should be sent.
    pub async fn handle(&self, msg: &InboundSms) -> Result<Option<String>> {
        let body = msg.body.trim().to_lowercase();

        if msg.from == self.booker_address {
            let reply =
                commands::handle_booker(&self.registry, &self.bookings, &self.country, &body)?;
            return Ok(Some(reply));
        }

        match self.registry.lookup_by_address(&msg.from)? {
            Some(sitter) => {
                info!(sitter = %sitter.name, "reply received");
                let reply = responder::handle_sitter(
                    &self.registry,
                    &self.bookings,
                    self.sender.as_ref(),
                    &self.booker_address,
                    &sitter,
                    &body,
                )
                .await?;
                Ok(Some(reply))
            }
            None => {
                warn!(from = %msg.from, "message from unknown sender ignored");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use sitterbot_sms::MemorySender;
    use sitterbot_store::SqliteStore;

    const BOOKER: &str = "+15550001111";

    fn dispatcher() -> Dispatcher {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let store: Arc<dyn sitterbot_store::SnapshotStore> =
            Arc::new(SqliteStore::new(conn).unwrap());
        let registry = Arc::new(SitterRegistry::new(Arc::clone(&store)));
        let bookings = Arc::new(BookingStore::new(store));
        Dispatcher::new(
            registry,
            bookings,
            Arc::new(MemorySender::new()),
            BOOKER.to_string(),
            "1".to_string(),
        )
    }

    fn msg(from: &str, body: &str) -> InboundSms {
        InboundSms {
            from: from.to_string(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn booker_messages_are_commands() {
        let d = dispatcher();
        let reply = d
            .handle(&msg(BOOKER, "Amy 612-555-0101"))
            .await
            .unwrap()
            .unwrap();
        assert!(reply.starts_with("Okay, I added Amy"));
    }

    #[tokio::test]
    async fn sitter_messages_go_to_the_responder() {
        let d = dispatcher();
        d.handle(&msg(BOOKER, "amy 612-555-0101")).await.unwrap();

        let reply = d
            .handle(&msg("+16125550101", "YES"))
            .await
            .unwrap()
            .unwrap();
        assert!(reply.contains("there aren't any pending gigs"));
    }

    #[tokio::test]
    async fn unknown_senders_get_no_reply() {
        let d = dispatcher();
        let reply = d.handle(&msg("+19995550000", "yes")).await.unwrap();
        assert!(reply.is_none());
    }
}
