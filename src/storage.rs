//! Key-value persistence contract.
//!
//! Settings and lifetime stats are persisted through a `KeyValueStore`,
//! the same shape as a browser's local storage: string keys, string
//! values. How values reach disk is up to the host; the crate ships an
//! in-memory store for tests, the simulator and hosts without storage.

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Key under which settings are stored.
pub const SETTINGS_KEY: &str = "vsrdle.settings";

/// Key under which lifetime stats are stored.
pub const STATS_KEY: &str = "vsrdle.stats";

/// Errors reported by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be read or written.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A value could not be encoded.
    #[error("failed to encode value for {key}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A thread panicked while holding the store lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// String key-value storage.
///
/// `Send` so a session can be moved behind a mutex on a threaded host.
pub trait KeyValueStore: Send {
    /// Read a value. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<FxHashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(Mutex::new(map)),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read a key and parse it as a JSON object.
///
/// Absent keys, backend errors and malformed JSON all yield `None`;
/// the latter two are logged.
pub(crate) fn read_json_object(
    store: &dyn KeyValueStore,
    key: &str,
) -> Option<serde_json::Map<String, serde_json::Value>> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read from storage, using defaults");
            return None;
        }
    };

    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(serde_json::Value::Object(map)) => Some(map),
        Ok(_) => {
            tracing::warn!(key, "stored value is not an object, using defaults");
            None
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "stored value is not valid JSON, using defaults");
            None
        }
    }
}

/// Take one field out of a stored object, falling back to `default`
/// when the field is absent or has the wrong type.
pub(crate) fn field_or<T: serde::de::DeserializeOwned>(
    map: &serde_json::Map<String, serde_json::Value>,
    field: &str,
    default: T,
) -> T {
    let Some(value) = map.get(field) else {
        return default;
    };
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(field, error = %err, "ignoring malformed stored field");
            default
        }
    }
}

/// Serialize and write a value.
pub(crate) fn write_json<T: serde::Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let encoded = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &encoded)
}
