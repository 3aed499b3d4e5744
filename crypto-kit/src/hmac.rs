use crate::constant_time::verify_mac;
use crate::error::{CryptoError, CryptoResult};
use ::hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use std::fmt;
use std::str::FromStr;

/// HMAC hash function
///
/// MD5 is deliberately not offered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HmacAlgorithm {
    Sha1,
    #[default]
    Sha256,
    Sha512,
}

fn mac<M: Mac + ::hmac::digest::KeyInit>(key: &[u8], data: &[u8]) -> CryptoResult<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

impl HmacAlgorithm {
    /// Tag length in bytes
    pub fn output_len(self) -> usize {
        match self {
            HmacAlgorithm::Sha1 => 20,
            HmacAlgorithm::Sha256 => 32,
            HmacAlgorithm::Sha512 => 64,
        }
    }

    /// Raw HMAC tag of `data` under `key`
    pub fn compute(self, key: &[u8], data: &[u8]) -> CryptoResult<Vec<u8>> {
        match self {
            HmacAlgorithm::Sha1 => mac::<Hmac<Sha1>>(key, data),
            HmacAlgorithm::Sha256 => mac::<Hmac<Sha256>>(key, data),
            HmacAlgorithm::Sha512 => mac::<Hmac<Sha512>>(key, data),
        }
    }

    /// Constant-time check of a raw tag
    pub fn verify(self, key: &[u8], data: &[u8], tag: &[u8]) -> CryptoResult<bool> {
        let computed = self.compute(key, data)?;
        Ok(verify_mac(tag, &computed))
    }
}

impl fmt::Display for HmacAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HmacAlgorithm::Sha1 => "sha1",
            HmacAlgorithm::Sha256 => "sha256",
            HmacAlgorithm::Sha512 => "sha512",
        };
        f.write_str(name)
    }
}

impl FromStr for HmacAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sha1" => Ok(HmacAlgorithm::Sha1),
            "sha256" => Ok(HmacAlgorithm::Sha256),
            "sha512" => Ok(HmacAlgorithm::Sha512),
            _ => Err(CryptoError::UnsupportedAlgorithm(format!(
                "{}. Valid options: sha1, sha256, sha512",
                s
            ))),
        }
    }
}

/// Lower-case hex HMAC of `data`, with the algorithm chosen by name.
pub fn calculate_hmac(key: &[u8], data: &[u8], algorithm: &str) -> CryptoResult<String> {
    let algorithm: HmacAlgorithm = algorithm.parse()?;
    Ok(hex::encode(algorithm.compute(key, data)?))
}

/// Checks a hex tag produced by [`calculate_hmac`]. Hex case does not matter.
pub fn verify_hmac(key: &[u8], data: &[u8], algorithm: &str, expected_hex: &str) -> CryptoResult<bool> {
    let algorithm: HmacAlgorithm = algorithm.parse()?;
    let expected = hex::decode(expected_hex.trim())
        .map_err(|e| CryptoError::InvalidData(format!("malformed hex tag: {}", e)))?;
    algorithm.verify(key, data, &expected)
}
