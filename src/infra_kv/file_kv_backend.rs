use crate::domain_port::*;
use crate::logger::*;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

/// Keeps all entries in one JSON object file. Every mutation rewrites the
/// file through a temporary sibling and a rename.
pub struct FileKvBackend {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKvBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileKvBackend {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| StorageError::Corrupted(e.to_string()))
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json =
            serde_json::to_string_pretty(items).map_err(|e| StorageError::Store(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn mutate<F>(&self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| StorageError::Store(e.to_string()))?;
        let mut items = match self.load() {
            Ok(items) => items,
            Err(StorageError::Corrupted(reason)) => {
                warn!(path = ?self.path, %reason, "discarding corrupted storage file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        f(&mut items);
        self.persist(&items)
    }
}

impl KvBackend for FileKvBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| StorageError::Store(e.to_string()))?;
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.mutate(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.mutate(|items| {
            items.remove(key);
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.mutate(|items| items.clear())
    }
}
