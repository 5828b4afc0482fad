/// Raw persisted string storage, the equivalent of the browser's local
/// storage. Values arrive here already encrypted.
pub trait KvBackend: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupted storage file: {0}")]
    Corrupted(String),
    #[error("store error: {0}")]
    Store(String),
}
