use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::errors::{AppError, AppResult};

/// Single-slot client-local persistence, modelled after browser local
/// storage: read at startup, overwritten on every sync, never cleared.
/// Injectable so tests can substitute an in-memory stub.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
}

#[derive(Default)]
pub struct InMemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|_| AppError::StorageError("store lock poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| AppError::StorageError("store lock poisoned".to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Flat JSON object on disk. Durable counterpart of `InMemoryStore` for the
/// terminal front-end.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> AppResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents)
            .map_err(|e| AppError::StorageError(format!("corrupt store file: {}", e)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        let contents = serde_json::to_string_pretty(&map)
            .map_err(|e| AppError::StorageError(e.to_string()))?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}
