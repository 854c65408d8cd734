//! `sitterbot-core` — configuration surface and the shared booking-window
//! type used by every other crate.

pub mod config;
pub mod error;
pub mod types;

pub use config::SitterbotConfig;
pub use error::{CoreError, Result};
pub use types::BookingWindow;
