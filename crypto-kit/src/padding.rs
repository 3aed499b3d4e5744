//! PKCS#5 / PKCS#7 padding.
//!
//! Padding is always applied at the plaintext boundary: `pad` before encryption,
//! `unpad` after decryption. Every padded buffer ends in `n` bytes of value `n` with
//! `1 <= n <= block_size`, so removal is never ambiguous.

use crate::constant_time::ct_padding_valid;
use crate::error::{CryptoError, CryptoResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Block size PKCS#5 is defined for.
pub const PKCS5_BLOCK_SIZE: usize = 8;

/// Largest block size whose pad length still fits in one byte.
pub const MAX_BLOCK_SIZE: usize = 255;

/// Padding scheme applied to plaintext before block encryption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    /// Input must already be block aligned where the mode requires it
    None,
    /// PKCS#5, defined only for 8-byte blocks
    Pkcs5,
    /// PKCS#7, any block size from 1 to 255
    #[default]
    Pkcs7,
}

impl Padding {
    pub fn is_none(self) -> bool {
        self == Padding::None
    }

    /// Checks that this scheme can be used with `block_size`.
    pub fn check_block_size(self, block_size: usize) -> CryptoResult<()> {
        match self {
            Padding::None => Ok(()),
            Padding::Pkcs5 if block_size != PKCS5_BLOCK_SIZE => {
                Err(CryptoError::InvalidBlockSizeForPkcs5 { block_size })
            }
            Padding::Pkcs5 => Ok(()),
            Padding::Pkcs7 => check_block_size(block_size),
        }
    }

    /// Pads `data` for `block_size`. `Padding::None` returns the input unchanged.
    pub fn pad(self, data: &[u8], block_size: usize) -> CryptoResult<Vec<u8>> {
        match self {
            Padding::None => Ok(data.to_vec()),
            Padding::Pkcs5 => pkcs5_pad(data, block_size),
            Padding::Pkcs7 => pkcs7_pad(data, block_size),
        }
    }

    /// Strips and validates padding. `Padding::None` returns the input unchanged.
    pub fn unpad(self, data: &[u8], block_size: usize) -> CryptoResult<Vec<u8>> {
        match self {
            Padding::None => Ok(data.to_vec()),
            Padding::Pkcs5 => pkcs5_unpad(data, block_size),
            Padding::Pkcs7 => pkcs7_unpad(data, block_size),
        }
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Padding::None => "none",
            Padding::Pkcs5 => "pkcs5",
            Padding::Pkcs7 => "pkcs7",
        };
        f.write_str(name)
    }
}

impl FromStr for Padding {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "nopadding" | "" => Ok(Padding::None),
            "pkcs5" | "pkcs#5" => Ok(Padding::Pkcs5),
            "pkcs7" | "pkcs#7" => Ok(Padding::Pkcs7),
            _ => Err(CryptoError::UnsupportedPadding(format!(
                "{}. Valid options: none, pkcs5, pkcs7",
                s
            ))),
        }
    }
}

fn check_block_size(block_size: usize) -> CryptoResult<()> {
    if block_size == 0 || block_size > MAX_BLOCK_SIZE {
        return Err(CryptoError::InvalidBlockSize { block_size });
    }
    Ok(())
}

/// Appends `n` bytes of value `n`, `n = block_size - len % block_size`.
///
/// A full block of padding is added when `data` is already aligned. Empty input is
/// rejected with `InvalidData`; callers that need to pad nothing must handle that case
/// themselves.
pub fn pad(data: &[u8], block_size: usize) -> CryptoResult<Vec<u8>> {
    check_block_size(block_size)?;
    if data.is_empty() {
        return Err(CryptoError::InvalidData("cannot pad empty input".to_string()));
    }

    let pad_len = block_size - data.len() % block_size;
    // block_size <= 255 was checked above
    let pad_byte = pad_len as u8;

    let mut padded = Vec::with_capacity(data.len() + pad_len);
    padded.extend_from_slice(data);
    padded.resize(data.len() + pad_len, pad_byte);
    Ok(padded)
}

/// Validates and removes padding added by [`pad`].
///
/// Fails with `InvalidPadding` when the length is not a multiple of `block_size`, the
/// claimed pad length is zero or larger than `block_size`, or any of the last `n`
/// bytes differs from `n`. The byte check runs in constant time.
pub fn unpad(data: &[u8], block_size: usize) -> CryptoResult<Vec<u8>> {
    check_block_size(block_size)?;
    let (&claimed, _) = data
        .split_last()
        .ok_or_else(|| CryptoError::InvalidData("cannot unpad empty input".to_string()))?;
    if data.len() % block_size != 0 {
        return Err(CryptoError::InvalidPadding);
    }

    let (body, tail) = data.split_at(data.len() - block_size);
    if !ct_padding_valid(tail, claimed) {
        return Err(CryptoError::InvalidPadding);
    }

    let keep = body.len() + (block_size - usize::from(claimed));
    let (plaintext, _) = data.split_at(keep);
    Ok(plaintext.to_vec())
}

pub fn pkcs5_pad(data: &[u8], block_size: usize) -> CryptoResult<Vec<u8>> {
    Padding::Pkcs5.check_block_size(block_size)?;
    pad(data, block_size)
}

pub fn pkcs5_unpad(data: &[u8], block_size: usize) -> CryptoResult<Vec<u8>> {
    Padding::Pkcs5.check_block_size(block_size)?;
    unpad(data, block_size)
}

pub fn pkcs7_pad(data: &[u8], block_size: usize) -> CryptoResult<Vec<u8>> {
    pad(data, block_size)
}

pub fn pkcs7_unpad(data: &[u8], block_size: usize) -> CryptoResult<Vec<u8>> {
    unpad(data, block_size)
}
