//! Durable key-value storage and the deck snapshot adapter on top of it.
//!
//! The whole deck collection lives under a single key as one JSON array.
//! Every save overwrites it with the complete current snapshot.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::Deck;

/// Key under which the deck collection is stored.
pub const STORAGE_KEY: &str = "flashcardsData";

/// Synchronous string key-value storage.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::storage(path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| Error::storage(&self.dir, e))?;
        let path = self.path_for(key);
        // write-then-rename: readers see either the old or the new snapshot
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value).map_err(|e| Error::storage(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| Error::storage(&path, e))?;
        Ok(())
    }
}

/// In-memory storage, used for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    values: HashMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a raw value, e.g. to simulate corrupt data.
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Serializes the full deck collection to and from a [`KvStore`].
#[derive(Debug, Clone)]
pub struct DeckStore<S> {
    kv: S,
}

impl<S: KvStore> DeckStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Previously saved decks; anything missing or unreadable yields an
    /// empty collection.
    pub fn load(&self) -> Vec<Deck> {
        let raw = match self.kv.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read stored decks, starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Deck>>(&raw) {
            Ok(decks) => {
                debug!(decks = decks.len(), "loaded decks");
                decks
            }
            Err(e) => {
                warn!(error = %e, "stored decks are malformed, starting empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the stored value with the complete collection.
    pub fn save(&mut self, decks: &[Deck]) -> Result<()> {
        let s = serde_json::to_string_pretty(decks)?;
        self.kv.set(STORAGE_KEY, &s)?;
        debug!(decks = decks.len(), "saved decks");
        Ok(())
    }
}
