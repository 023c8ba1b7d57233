//! Key-value persistence for per-user profile artifacts.
//!
//! The completion engine never touches storage directly; callers hand it a
//! [`KeyValueStore`] and read records through the typed helpers here, which
//! treat missing or malformed JSON as an empty record.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::config::StorageSettings;
use crate::profiles::model::UserType;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-process store, handy for tests and short-lived sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Result returned after writing a stored value.
#[derive(Debug, Clone)]
pub struct StoreWriteOutcome {
    pub path: PathBuf,
    pub hash: String,
}

/// One pretty-printed JSON file per key under a root directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{file_name}.json"))
    }

    /// Writes a value and returns the SHA-256 of the payload on disk.
    pub fn write(&self, key: &str, value: &Value) -> Result<StoreWriteOutcome> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed creating store directory {:?}", self.root))?;
        let path = self.path_for(key);
        let payload = serde_json::to_vec_pretty(value)
            .with_context(|| format!("Failed serializing stored value {key}"))?;
        let hash = compute_hash(&payload);
        let mut file = fs::File::create(&path)
            .with_context(|| format!("Failed opening store file {:?}", path))?;
        file.write_all(&payload)
            .with_context(|| format!("Failed writing store file {:?}", path))?;
        debug!(key, path = %path.display(), %hash, "stored value");
        Ok(StoreWriteOutcome { path, hash })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("Failed reading store file {:?}", path))
            }
        };
        match serde_json::from_slice(&data) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(key, path = %path.display(), error = %err, "ignoring malformed stored value");
                Ok(None)
            }
        }
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.write(key, &value).map(|_| ())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("Failed removing store file {:?}", path)),
        }
    }
}

/// Computes a lowercase hex SHA-256 hash of the provided bytes.
pub fn compute_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{:x}", digest)
}

/// Deterministic store keys derived from a user id.
#[derive(Debug, Clone)]
pub struct StorageKeys {
    settings: StorageSettings,
}

impl StorageKeys {
    pub fn new(settings: StorageSettings) -> Self {
        Self { settings }
    }

    pub fn documents(&self, user_id: &str) -> String {
        format!("{}_{user_id}", self.settings.documents_prefix)
    }

    pub fn experience(&self, user_type: UserType, user_id: &str) -> String {
        let section = user_type.as_str().to_ascii_lowercase();
        format!(
            "{section}_{}_{user_id}",
            self.settings.experience_suffix
        )
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(StorageSettings::default())
    }
}

/// Reads a typed record, falling back to `T::default()` when the key is
/// missing or the stored JSON does not match `T`.
pub fn load_or_empty<T, S>(store: &S, key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    let Some(value) = store.get(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_value(value) {
        Ok(record) => Ok(record),
        Err(err) => {
            warn!(key, error = %err, "stored record has unexpected shape; treating as empty");
            Ok(T::default())
        }
    }
}

pub fn save_record<T, S>(store: &mut S, key: &str, record: &T) -> Result<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let value = serde_json::to_value(record)
        .with_context(|| format!("Failed serializing record for {key}"))?;
    store.set(key, value)
}
