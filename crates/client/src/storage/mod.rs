//! Persistence port for client-side stores.
//!
//! Stores persist themselves through the [`StateStore`] trait, an opaque
//! key/value blob store. Each key holds a JSON [`Persisted`] envelope so
//! that a future schema change has a version number to branch on.
//!
//! Two backends are provided:
//! - [`FileStore`] - one JSON file per key inside a data directory
//! - [`MemoryStore`] - process-local map, for tests and ephemeral sessions

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current envelope version written by this client.
pub const STATE_VERSION: u32 = 0;

/// Errors from a persistence backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored blob could not be (de)serialized.
    #[error("Storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Opaque key/value blob store.
pub trait StateStore: Send + Sync {
    /// Load the blob stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the blob stored under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Versioned wrapper around persisted state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persisted<T> {
    pub state: T,
    #[serde(default)]
    pub version: u32,
}

/// Load and decode typed state.
///
/// # Errors
///
/// Returns an error if the backend fails or the blob is not valid JSON
/// for `T`.
pub fn load_state<T: DeserializeOwned>(
    store: &dyn StateStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.load(key)? {
        Some(blob) => {
            let persisted: Persisted<T> = serde_json::from_str(&blob)?;
            Ok(Some(persisted.state))
        }
        None => Ok(None),
    }
}

/// Encode and save typed state.
///
/// # Errors
///
/// Returns an error if encoding or the backend fails.
pub fn save_state<T: Serialize>(
    store: &dyn StateStore,
    key: &str,
    state: &T,
) -> Result<(), StorageError> {
    let blob = serde_json::to_string(&Persisted {
        state,
        version: STATE_VERSION,
    })?;
    store.save(key, &blob)
}
