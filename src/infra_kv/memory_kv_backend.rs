use crate::domain_port::*;
use dashmap::DashMap;

/// Process-local storage; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryKvBackend {
    items: DashMap<String, String>,
}

impl MemoryKvBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KvBackend for MemoryKvBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).map(|v| v.value().clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.items.clear();
        Ok(())
    }
}
