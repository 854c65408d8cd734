//! `sitterbot-sms` — the outbound text-message transport.
//!
//! The bot never waits on a delivery: a state transition is persisted first
//! and the notification is fire-and-forget. [`send_or_log`] is the one place
//! that policy lives. Failures are logged, never unwound and never silently
//! dropped.

pub mod error;
pub mod testing;
pub mod transport;
pub mod twilio;
pub mod types;

pub use error::SmsError;
pub use testing::MemorySender;
pub use transport::{send_or_log, SmsSender};
pub use twilio::TwilioSender;
pub use types::{InboundSms, OutboundSms};
