//! `sitterbot-bot` — what the bot actually says and does.
//!
//! Inbound messages are routed by sender identity: the booker manages the
//! sitter list and requests bookings, registered sitters answer offers, and
//! everyone else is ignored. Replies are returned to the webhook layer as
//! plain strings; outbound notifications (booker updates) go through the
//! shared [`sitterbot_sms::SmsSender`].

mod commands;
pub mod dispatch;
pub mod error;
pub mod parse;
pub mod phone;
mod responder;

pub use dispatch::Dispatcher;
pub use error::{BotError, Result};
