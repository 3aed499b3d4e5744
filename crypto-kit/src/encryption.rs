use crate::error::CryptoError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Result type for encryption operations
pub type EncryptionResult<T> = Result<T, CryptoError>;

/// Trait for encryption/decryption operations
///
/// Implemented once per configured cipher so callers can encrypt without caring
/// which mode, padding or scheme was selected.
pub trait Encryptor: Send + Sync {
    /// Encrypt data
    fn encrypt(&self, plaintext: &[u8]) -> EncryptionResult<Vec<u8>>;

    /// Decrypt data
    fn decrypt(&self, ciphertext: &[u8]) -> EncryptionResult<Vec<u8>>;

    /// Get the encryption algorithm name
    fn algorithm(&self) -> String;

    /// Encrypt a string and return the ciphertext as standard base64
    fn encrypt_base64(&self, plaintext: &str) -> EncryptionResult<String> {
        let ciphertext = self.encrypt(plaintext.as_bytes())?;
        Ok(BASE64.encode(ciphertext))
    }

    /// Decode base64 ciphertext, decrypt it and return the plaintext as UTF-8
    ///
    /// Malformed base64 fails with `MalformedBase64` before any decryption happens.
    fn decrypt_base64(&self, encoded: &str) -> EncryptionResult<String> {
        let ciphertext = BASE64
            .decode(encoded)
            .map_err(|e| CryptoError::MalformedBase64(e.to_string()))?;
        let plaintext = self.decrypt(&ciphertext)?;
        String::from_utf8(plaintext).map_err(|e| CryptoError::InvalidUtf8(e.to_string()))
    }
}
