use crate::domain_port::*;
use crate::logger::*;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Encrypting facade over a raw key-value backend.
///
/// Reads fail closed: anything that cannot be fetched, decrypted or parsed is
/// reported as absent. Writes of empty keys or null values are dropped.
pub struct SecureStore {
    backend: Arc<dyn KvBackend>,
    cipher: Arc<dyn ValueCipher>,
}

impl SecureStore {
    pub fn new(backend: Arc<dyn KvBackend>, cipher: Arc<dyn ValueCipher>) -> Self {
        Self { backend, cipher }
    }

    pub fn set<T>(&self, key: impl AsRef<str>, value: &T)
    where
        T: Serialize + ?Sized,
    {
        let key = key.as_ref();
        if key.is_empty() {
            return;
        }

        let json = match serde_json::to_value(value) {
            Ok(serde_json::Value::Null) => return,
            Ok(json) => json.to_string(),
            Err(e) => {
                warn!(key, error = %e, "value not serializable, dropping write");
                return;
            }
        };

        let sealed = match self.cipher.encrypt(&json) {
            Ok(sealed) => sealed,
            Err(e) => {
                warn!(key, error = %e, "encryption failed, dropping write");
                return;
            }
        };

        if let Err(e) = self.backend.set_item(key, &sealed) {
            warn!(key, error = %e, "storage write failed");
        }
    }

    pub fn get<T>(&self, key: impl AsRef<str>) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let key = key.as_ref();
        if key.is_empty() {
            return None;
        }

        let sealed = match self.backend.get_item(key) {
            Ok(Some(sealed)) if !sealed.is_empty() => sealed,
            Ok(_) => return None,
            Err(e) => {
                debug!(key, error = %e, "storage read failed");
                return None;
            }
        };

        let json = match self.cipher.decrypt(&sealed) {
            Ok(json) if !json.is_empty() => json,
            Ok(_) => return None,
            Err(e) => {
                debug!(key, error = %e, "stored value not decryptable");
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(key, error = %e, "stored value not parsable");
                None
            }
        }
    }

    pub fn remove(&self, key: impl AsRef<str>) {
        let key = key.as_ref();
        if let Err(e) = self.backend.remove_item(key) {
            warn!(key, error = %e, "storage remove failed");
        }
    }

    pub fn clear_all(&self) {
        if let Err(e) = self.backend.clear() {
            warn!(error = %e, "storage clear failed");
        }
    }
}
