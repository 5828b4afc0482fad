/// Symmetric encryption of serialized values, keyed by a process-wide secret.
pub trait ValueCipher: Send + Sync {
    fn encrypt(&self, plaintext: &str) -> Result<String, CipherError>;
    fn decrypt(&self, ciphertext: &str) -> Result<String, CipherError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    #[error("malformed ciphertext: {0}")]
    Malformed(String),
    #[error("decryption failed")]
    Decrypt,
    #[error("encryption failed")]
    Encrypt,
    #[error("invalid key: {0}")]
    InvalidKey(String),
}
