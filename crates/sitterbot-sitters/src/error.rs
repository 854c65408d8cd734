use sitterbot_store::StoreError;
use thiserror::Error;

/// Errors from sitter registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A sitter with this (case-folded) name is already registered.
    #[error("sitter already registered: {name}")]
    AlreadyExists { name: String },

    /// No sitter with this name exists.
    #[error("no such sitter: {name}")]
    NotFound { name: String },

    /// The snapshot store failed; the registry is unchanged.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
