//! Algorithm selection for the crypto toolkit
//!
//! Groups the defaults an application picks once and reuses everywhere:
//! - Block cipher mode and padding
//! - Digest for hashing and RSA parameters
//! - RSA encryption and signature schemes, and key size
//! - HMAC algorithm
//!
//! Values come from code, from serde (e.g. a section of an application config file) or
//! from `CRYPTO_*` environment variables.

use crate::aes_cipher::{AesCipher, CipherConfig, AES_BLOCK_SIZE};
use crate::digest::DigestKind;
use crate::error::{CryptoError, CryptoResult};
use crate::hmac::HmacAlgorithm;
use crate::keys::{generate_key_pair, PrivateKey, PublicKey, MAX_KEY_BITS, MIN_KEY_BITS};
use crate::rsa_cipher::{EncryptionScheme, RsaCipher};
use crate::rsa_signature::{RsaSigner, SignatureScheme};
use serde::{Deserialize, Serialize};

/// Default RSA modulus size
pub const DEFAULT_RSA_KEY_BITS: usize = 2048;

/// Crypto toolkit configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    // === Symmetric ===
    /// Block cipher mode and padding (CBC/PKCS7 by default)
    pub cipher: CipherConfig,

    // === Hashing ===
    /// Digest for hashing, OAEP and signatures
    pub digest: DigestKind,

    // === RSA ===
    pub encryption_scheme: EncryptionScheme,
    pub signature_scheme: SignatureScheme,
    /// Modulus size for generated keys
    pub rsa_key_bits: usize,

    // === MAC ===
    pub hmac_algorithm: HmacAlgorithm,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            cipher: CipherConfig::default(),
            digest: DigestKind::default(),
            encryption_scheme: EncryptionScheme::default(),
            signature_scheme: SignatureScheme::default(),
            rsa_key_bits: DEFAULT_RSA_KEY_BITS,
            hmac_algorithm: HmacAlgorithm::default(),
        }
    }
}

impl CryptoConfig {
    /// Load configuration from environment variables
    ///
    /// Unset variables keep their defaults. The result is validated.
    pub fn from_env() -> CryptoResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from any name-to-value source
    pub fn from_lookup<F>(lookup: F) -> CryptoResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // === Symmetric ===
        if let Some(mode) = lookup("CRYPTO_CIPHER_MODE") {
            config.cipher.mode = mode.parse()?;
        }
        if let Some(padding) = lookup("CRYPTO_CIPHER_PADDING") {
            config.cipher.padding = padding.parse()?;
        }

        // === Hashing ===
        if let Some(digest) = lookup("CRYPTO_DIGEST") {
            config.digest = digest.parse()?;
        }

        // === RSA ===
        if let Some(scheme) = lookup("CRYPTO_RSA_ENCRYPTION_SCHEME") {
            config.encryption_scheme = scheme.parse()?;
        }
        if let Some(scheme) = lookup("CRYPTO_RSA_SIGNATURE_SCHEME") {
            config.signature_scheme = scheme.parse()?;
        }
        if let Some(bits) = lookup("CRYPTO_RSA_KEY_BITS") {
            config.rsa_key_bits = bits.trim().parse().map_err(|e| {
                CryptoError::Configuration(format!("Invalid CRYPTO_RSA_KEY_BITS: {}", e))
            })?;
        }

        // === MAC ===
        if let Some(algorithm) = lookup("CRYPTO_HMAC_ALGORITHM") {
            config.hmac_algorithm = algorithm.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> CryptoResult<()> {
        self.cipher.validate(AES_BLOCK_SIZE)?;

        if !(MIN_KEY_BITS..=MAX_KEY_BITS).contains(&self.rsa_key_bits) {
            return Err(CryptoError::Configuration(format!(
                "RSA key size must be between {} and {} bits, got {}",
                MIN_KEY_BITS, MAX_KEY_BITS, self.rsa_key_bits
            )));
        }

        Ok(())
    }

    /// AES cipher with the configured mode and padding
    pub fn aes_cipher(&self, key: &[u8], iv: &[u8]) -> CryptoResult<AesCipher> {
        AesCipher::new(key, iv, self.cipher)
    }

    /// RSA encryptor with the configured scheme and digest
    pub fn rsa_cipher(&self, private_key: PrivateKey) -> RsaCipher {
        RsaCipher::new(private_key, self.encryption_scheme, self.digest)
    }

    /// RSA signer with the configured scheme and digest
    pub fn rsa_signer(&self, private_key: PrivateKey) -> RsaSigner {
        RsaSigner::new(private_key, self.signature_scheme, self.digest)
    }

    /// Generate a key pair of the configured size
    pub fn generate_key_pair(&self) -> CryptoResult<(PrivateKey, PublicKey)> {
        generate_key_pair(self.rsa_key_bits)
    }

    /// Hex HMAC of `data` with the configured algorithm
    pub fn hmac_hex(&self, key: &[u8], data: &[u8]) -> CryptoResult<String> {
        Ok(hex::encode(self.hmac_algorithm.compute(key, data)?))
    }
}
