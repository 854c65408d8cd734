use std::sync::{Arc, Mutex};

use tracing::info;

use sitterbot_store::{SnapshotStore, StoreError};

use crate::error::{RegistryError, Result};
use crate::types::{ReplyAction, Sitter};

const COLLECTION: &str = "sitters";

/// CRUD over the registered sitters, keyed by lowercased first name.
///
/// Every operation reloads the latest snapshot. Mutations hold `lock` across
/// the whole reload-mutate-persist sequence so a concurrent scheduler tick
/// cannot clobber a webhook-driven update (or vice versa).
pub struct SitterRegistry {
    store: Arc<dyn SnapshotStore>,
    lock: Mutex<()>,
}

impl SitterRegistry {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// Register a new sitter. The name is case-folded before use.
    pub fn add(&self, name: &str, address: &str) -> Result<Sitter> {
        let _guard = self.lock.lock().unwrap();
        let mut sitters = self.load()?;
        let name = name.to_lowercase();
        if sitters.iter().any(|s| s.name == name) {
            return Err(RegistryError::AlreadyExists { name });
        }
        let sitter = Sitter {
            name: name.clone(),
            address: address.to_string(),
            pending_action: None,
        };
        sitters.push(sitter.clone());
        self.save(&sitters)?;
        info!(%name, %address, "sitter registered");
        Ok(sitter)
    }

    /// Remove a sitter by first name.
    pub fn remove(&self, name: &str) -> Result<Sitter> {
        let _guard = self.lock.lock().unwrap();
        let mut sitters = self.load()?;
        let name = name.to_lowercase();
        let idx = sitters
            .iter()
            .position(|s| s.name == name)
            .ok_or(RegistryError::NotFound { name })?;
        let sitter = sitters.remove(idx);
        self.save(&sitters)?;
        info!(name = %sitter.name, "sitter removed");
        Ok(sitter)
    }

    /// Find the sitter registered with `address`, if any. Linear scan; the
    /// registry is a handful of entries.
    pub fn lookup_by_address(&self, address: &str) -> Result<Option<Sitter>> {
        Ok(self.load()?.into_iter().find(|s| s.address == address))
    }

    /// All sitters in registration order, the canonical approach order.
    pub fn all(&self) -> Result<Vec<Sitter>> {
        self.load()
    }

    /// Record or clear the action a sitter asked for while disambiguating
    /// between several pending offers.
    pub fn set_pending_action(&self, name: &str, action: Option<ReplyAction>) -> Result<()> {
        let _guard = self.lock.lock().unwrap();
        let mut sitters = self.load()?;
        let name = name.to_lowercase();
        let sitter = sitters
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or(RegistryError::NotFound { name })?;
        sitter.pending_action = action;
        self.save(&sitters)
    }

    fn load(&self) -> Result<Vec<Sitter>> {
        match self.store.load_collection(COLLECTION)? {
            Some(value) => Ok(serde_json::from_value(value).map_err(StoreError::from)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, sitters: &[Sitter]) -> Result<()> {
        let value = serde_json::to_value(sitters).map_err(StoreError::from)?;
        self.store.save_collection(COLLECTION, &value)?;
        Ok(())
    }
}
