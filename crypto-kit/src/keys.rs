//! RSA key pairs and their PEM encodings.
//!
//! Private keys are read from PKCS#1 (`RSA PRIVATE KEY`) or PKCS#8 (`PRIVATE KEY`) and
//! written as PKCS#1. Public keys are read from SPKI (`PUBLIC KEY`) or PKCS#1
//! (`RSA PUBLIC KEY`) and written as SPKI.

use crate::error::{CryptoError, CryptoResult};
use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, LineEnding};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt;
use tracing::debug;
use zeroize::Zeroizing;

/// Smallest modulus accepted for key generation
pub const MIN_KEY_BITS: usize = 1024;

/// Largest modulus accepted for key generation
pub const MAX_KEY_BITS: usize = 4096;

/// RSA private key
///
/// Never printed: `Debug` shows the modulus size only. The underlying key material
/// is zeroized when dropped.
#[derive(Clone)]
pub struct PrivateKey(RsaPrivateKey);

/// RSA public key, freely shareable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey(RsaPublicKey);

impl PrivateKey {
    /// Parse a PEM private key, PKCS#1 first, then PKCS#8
    pub fn from_pem(pem: &str) -> CryptoResult<Self> {
        RsaPrivateKey::from_pkcs1_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs8_pem(pem))
            .map(Self)
            .map_err(|e| CryptoError::InvalidKey(format!("failed to parse private key: {}", e)))
    }

    /// Encode as a PKCS#1 `RSA PRIVATE KEY` PEM document
    pub fn to_pem(&self) -> CryptoResult<Zeroizing<String>> {
        self.0
            .to_pkcs1_pem(LineEnding::LF)
            .map_err(|e| CryptoError::KeyEncodingFailed(e.to_string()))
    }

    /// Derive the matching public key
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.to_public_key())
    }

    /// Modulus size in bits
    pub fn bits(&self) -> usize {
        self.0.n().bits()
    }

    pub(crate) fn as_rsa(&self) -> &RsaPrivateKey {
        &self.0
    }
}

impl From<RsaPrivateKey> for PrivateKey {
    fn from(key: RsaPrivateKey) -> Self {
        Self(key)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("bits", &self.bits())
            .finish_non_exhaustive()
    }
}

impl PublicKey {
    /// Parse a PEM public key, SPKI first, then PKCS#1
    pub fn from_pem(pem: &str) -> CryptoResult<Self> {
        RsaPublicKey::from_public_key_pem(pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
            .map(Self)
            .map_err(|e| CryptoError::InvalidKey(format!("failed to parse public key: {}", e)))
    }

    /// Encode as an SPKI `PUBLIC KEY` PEM document
    pub fn to_pem(&self) -> CryptoResult<String> {
        self.0
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| CryptoError::KeyEncodingFailed(e.to_string()))
    }

    /// Modulus size in bits
    pub fn bits(&self) -> usize {
        self.0.n().bits()
    }

    pub(crate) fn as_rsa(&self) -> &RsaPublicKey {
        &self.0
    }
}

impl From<RsaPublicKey> for PublicKey {
    fn from(key: RsaPublicKey) -> Self {
        Self(key)
    }
}

fn pem_str(pem: &[u8]) -> CryptoResult<&str> {
    std::str::from_utf8(pem).map_err(|_| CryptoError::InvalidKey("PEM is not valid UTF-8".to_string()))
}

pub fn parse_private_key(pem: &[u8]) -> CryptoResult<PrivateKey> {
    PrivateKey::from_pem(pem_str(pem)?)
}

pub fn parse_public_key(pem: &[u8]) -> CryptoResult<PublicKey> {
    PublicKey::from_pem(pem_str(pem)?)
}

pub fn derive_public_key(private_key: &PrivateKey) -> PublicKey {
    private_key.public_key()
}

/// Generate a new key pair with a `bits`-bit modulus and public exponent 65537
pub fn generate_key_pair(bits: usize) -> CryptoResult<(PrivateKey, PublicKey)> {
    if !(MIN_KEY_BITS..=MAX_KEY_BITS).contains(&bits) {
        return Err(CryptoError::KeyGenerationFailed(format!(
            "key size {} outside {}..={} bits",
            bits, MIN_KEY_BITS, MAX_KEY_BITS
        )));
    }

    debug!(bits, "generating rsa key pair");
    let key = RsaPrivateKey::new(&mut OsRng, bits)
        .map_err(|e| CryptoError::KeyGenerationFailed(e.to_string()))?;
    let private_key = PrivateKey(key);
    let public_key = private_key.public_key();
    Ok((private_key, public_key))
}
