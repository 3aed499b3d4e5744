//! Message digests (SHA-1, SHA-256).
//!
//! [`DigestKind`] is the single place that maps a digest selection to a hash
//! implementation; the RSA engines reuse it to pick their OAEP, PSS and PKCS#1 v1.5
//! hash parameters.

use crate::error::{CryptoError, CryptoResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestKind {
    /// SHA-1, 20-byte output. Kept for interoperability with existing signatures.
    Sha1,
    /// SHA-256, 32-byte output
    #[default]
    Sha256,
}

impl DigestKind {
    /// Digest length in bytes
    pub fn output_len(self) -> usize {
        match self {
            DigestKind::Sha1 => 20,
            DigestKind::Sha256 => 32,
        }
    }

    pub fn hash(self, data: &[u8]) -> Vec<u8> {
        match self {
            DigestKind::Sha1 => Sha1::digest(data).to_vec(),
            DigestKind::Sha256 => Sha256::digest(data).to_vec(),
        }
    }

    /// Lower-case hex encoding of the digest
    pub fn hash_hex(self, data: &[u8]) -> String {
        hex::encode(self.hash(data))
    }

    /// Standard-alphabet base64 encoding of the digest
    pub fn hash_base64(self, data: &[u8]) -> String {
        BASE64.encode(self.hash(data))
    }
}

impl fmt::Display for DigestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DigestKind::Sha1 => "sha1",
            DigestKind::Sha256 => "sha256",
        };
        f.write_str(name)
    }
}

impl FromStr for DigestKind {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(DigestKind::Sha1),
            "sha256" | "sha-256" => Ok(DigestKind::Sha256),
            _ => Err(CryptoError::UnsupportedDigestKind(format!(
                "{}. Valid options: sha1, sha256",
                s
            ))),
        }
    }
}

/// Hashes `data` with the digest named by `kind`.
pub fn hash(kind: DigestKind, data: &[u8]) -> Vec<u8> {
    kind.hash(data)
}

pub fn hash_hex(kind: DigestKind, data: &[u8]) -> String {
    kind.hash_hex(data)
}

pub fn hash_base64(kind: DigestKind, data: &[u8]) -> String {
    kind.hash_base64(data)
}

/// Hashes `data` with a digest selected by name, e.g. from configuration.
///
/// Fails with `UnsupportedDigestKind` before hashing anything when the name is unknown.
pub fn hash_named(name: &str, data: &[u8]) -> CryptoResult<Vec<u8>> {
    let kind: DigestKind = name.parse()?;
    Ok(kind.hash(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_answer() {
        assert_eq!(
            hash_hex(DigestKind::Sha256, b"test"),
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_sha1_known_answers() {
        assert_eq!(
            hash_hex(DigestKind::Sha1, b""),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
        assert_eq!(
            hash_hex(DigestKind::Sha1, b"This is a SHA sign test"),
            "5260de65bcfeadccc7411b50d97c8a3dca93b8ce"
        );
        assert_eq!(
            hash_hex(DigestKind::Sha1, b"This is a PSS sign test"),
            "f01ab62e2de6a061806ff8091e51f719aea2327f"
        );
    }

    #[test]
    fn test_base64_encodings() {
        assert_eq!(
            hash_base64(DigestKind::Sha256, b"test"),
            "n4bQgYhMfWWaL+qgxVrQFaO/TxsrC4Is0V1sFbDwCgg="
        );
        assert_eq!(
            hash_base64(DigestKind::Sha1, b"This is a SHA sign test"),
            "UmDeZbz+rczHQRtQ2XyKPcqTuM4="
        );
        assert_eq!(
            hash_base64(DigestKind::Sha1, b"This is a PSS sign test"),
            "8Bq2Li3moGGAb/gJHlH3Ga6iMn8="
        );
    }

    #[test]
    fn test_output_lengths() {
        assert_eq!(hash(DigestKind::Sha1, b"abc").len(), DigestKind::Sha1.output_len());
        assert_eq!(hash(DigestKind::Sha256, b"abc").len(), DigestKind::Sha256.output_len());
    }

    #[test]
    fn test_unsupported_digest_name() {
        assert!(matches!(
            hash_named("md5", b"data"),
            Err(CryptoError::UnsupportedDigestKind(_))
        ));
        assert_eq!(hash_named("SHA-256", b"test").unwrap(), hash(DigestKind::Sha256, b"test"));
    }
}
