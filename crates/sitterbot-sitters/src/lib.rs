//! `sitterbot-sitters` — the registry of people who can be offered a booking.
//!
//! Sitters are keyed by lowercased first name and kept in registration
//! order; that order is the canonical order the scheduler approaches them
//! in. The registry owns the `sitters` collection exclusively.

pub mod error;
pub mod registry;
pub mod types;

pub use error::{RegistryError, Result};
pub use registry::SitterRegistry;
pub use types::{display_name, ReplyAction, Sitter};
