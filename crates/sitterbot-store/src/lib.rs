//! `sitterbot-store` — durable snapshot storage for the bot's collections.
//!
//! The `sitters` and `bookings` collections are persisted as whole JSON
//! snapshots: a load returns the latest snapshot, a save replaces it
//! atomically. The repositories built on top (`sitterbot-sitters`,
//! `sitterbot-bookings`) layer their own reload-mutate-persist locking; this
//! crate only guarantees that a single save is all-or-nothing.

pub mod db;
pub mod error;

pub use db::SqliteStore;
pub use error::{Result, StoreError};

use serde_json::Value;

/// Storage collaborator for named collection snapshots.
pub trait SnapshotStore: Send + Sync {
    /// Return the latest snapshot of `name`, or `None` if it was never saved.
    fn load_collection(&self, name: &str) -> Result<Option<Value>>;

    /// Atomically replace the snapshot of `name`.
    fn save_collection(&self, name: &str, snapshot: &Value) -> Result<()>;
}
