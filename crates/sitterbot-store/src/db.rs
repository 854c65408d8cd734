use std::sync::Mutex;

use rusqlite::Connection;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::SnapshotStore;

/// Initialise the snapshots table. Safe to call on every startup (idempotent).
pub fn init_db(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS snapshots (
            name        TEXT PRIMARY KEY NOT NULL,
            data        TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );",
    )
}

/// SQLite-backed snapshot store.
///
/// One row per collection; `INSERT OR REPLACE` swaps the whole snapshot in a
/// single statement, so a reader never observes a partial write.
pub struct SqliteStore {
    db: Mutex<Connection>,
}

impl SqliteStore {
    /// Wrap an already-open connection, creating the schema if needed.
    pub fn new(conn: Connection) -> Result<Self> {
        init_db(&conn)?;
        Ok(Self {
            db: Mutex::new(conn),
        })
    }

    /// Open (or create) the store at `path`.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::new(conn)
    }
}

impl SnapshotStore for SqliteStore {
    fn load_collection(&self, name: &str) -> Result<Option<Value>> {
        let db = self.db.lock().unwrap();
        let raw: Option<String> = match db.query_row(
            "SELECT data FROM snapshots WHERE name = ?1",
            [name],
            |row| row.get(0),
        ) {
            Ok(data) => Some(data),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(e.into()),
        };
        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save_collection(&self, name: &str, snapshot: &Value) -> Result<()> {
        let raw = serde_json::to_string(snapshot)?;
        let now = chrono::Utc::now().to_rfc3339();
        let db = self.db.lock().unwrap();
        db.execute(
            "INSERT OR REPLACE INTO snapshots (name, data, updated_at)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![name, raw, now],
        )?;
        debug!(collection = name, bytes = raw.len(), "snapshot saved");
        Ok(())
    }
}
