//! Cryptographically secure randomness backed by the operating system.

use crate::aes_cipher::{AesKeySize, AES_BLOCK_SIZE};
use crate::error::{CryptoError, CryptoResult};
use rand::rngs::OsRng;
use rand::{Rng, RngCore};
use zeroize::Zeroizing;

/// Alphanumeric charset used by the generators when no charset is given
pub const DEFAULT_CHARSET: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Fill `buf` with random bytes.
///
/// # Panics
///
/// Panics if the operating system entropy source fails. There is no safe fallback.
pub fn fill(buf: &mut [u8]) {
    OsRng.fill_bytes(buf);
}

/// Uniform integer in `[0, bound)`, without modulo bias
pub fn uniform_int(bound: usize) -> CryptoResult<usize> {
    if bound == 0 {
        return Err(CryptoError::InvalidData("bound must be greater than zero".to_string()));
    }
    Ok(OsRng.gen_range(0..bound))
}

/// `size` random bytes
pub fn generate_key(size: usize) -> CryptoResult<Zeroizing<Vec<u8>>> {
    if size == 0 {
        return Err(CryptoError::InvalidData("key size must be greater than zero".to_string()));
    }
    let mut key = Zeroizing::new(vec![0u8; size]);
    fill(&mut key);
    Ok(key)
}

/// `size` bytes drawn uniformly from an ASCII `charset`
///
/// The result is printable, which suits keys that travel through configuration files.
pub fn generate_key_with_charset(charset: &str, size: usize) -> CryptoResult<Zeroizing<Vec<u8>>> {
    if size == 0 {
        return Err(CryptoError::InvalidData("key size must be greater than zero".to_string()));
    }
    if charset.is_empty() || !charset.is_ascii() {
        return Err(CryptoError::InvalidData(
            "charset must be non-empty ASCII".to_string(),
        ));
    }

    let alphabet = charset.as_bytes();
    let mut key = Zeroizing::new(Vec::with_capacity(size));
    for _ in 0..size {
        let index = uniform_int(alphabet.len())?;
        let byte = alphabet
            .get(index)
            .copied()
            .ok_or_else(|| CryptoError::InvalidData("charset index out of range".to_string()))?;
        key.push(byte);
    }
    Ok(key)
}

/// Fresh random key for the given AES variant
pub fn generate_aes_key(size: AesKeySize) -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(vec![0u8; size.key_len()]);
    fill(&mut key);
    key
}

/// Fresh random 16-byte IV
pub fn generate_iv() -> [u8; AES_BLOCK_SIZE] {
    let mut iv = [0u8; AES_BLOCK_SIZE];
    fill(&mut iv);
    iv
}

/// 16-byte IV drawn from `charset`
pub fn generate_iv_with_charset(charset: &str) -> CryptoResult<[u8; AES_BLOCK_SIZE]> {
    let bytes = generate_key_with_charset(charset, AES_BLOCK_SIZE)?;
    let mut iv = [0u8; AES_BLOCK_SIZE];
    iv.copy_from_slice(&bytes);
    Ok(iv)
}
