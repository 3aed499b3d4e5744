use crate::encryption::{EncryptionResult, Encryptor};
use crate::error::{CryptoError, CryptoResult};
use crate::padding::Padding;
use cipher::block_padding::NoPadding;
use cipher::{AsyncStreamCipher, BlockDecryptMut, BlockEncryptMut, KeyIvInit, StreamCipher};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};
use zeroize::{Zeroizing, ZeroizeOnDrop};

/// AES block size in bytes, for every key size
pub const AES_BLOCK_SIZE: usize = 16;

/// Block cipher mode of operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockMode {
    /// Cipher feedback, full-block segments
    Cfb,
    /// Counter mode, the IV is the initial 128-bit big-endian counter block
    Ctr,
    /// Cipher block chaining
    #[default]
    Cbc,
}

impl BlockMode {
    /// Stream-oriented modes accept input of any length
    pub fn is_stream(self) -> bool {
        matches!(self, BlockMode::Cfb | BlockMode::Ctr)
    }
}

impl fmt::Display for BlockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockMode::Cfb => "cfb",
            BlockMode::Ctr => "ctr",
            BlockMode::Cbc => "cbc",
        };
        f.write_str(name)
    }
}

impl FromStr for BlockMode {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cfb" => Ok(BlockMode::Cfb),
            "ctr" => Ok(BlockMode::Ctr),
            "cbc" => Ok(BlockMode::Cbc),
            _ => Err(CryptoError::UnsupportedMode(format!(
                "{}. Valid options: cfb, ctr, cbc",
                s
            ))),
        }
    }
}

/// Mode and padding selection for a block cipher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherConfig {
    pub mode: BlockMode,
    pub padding: Padding,
}

impl CipherConfig {
    pub fn new(mode: BlockMode, padding: Padding) -> Self {
        Self { mode, padding }
    }

    /// Build a configuration from names such as `("CBC", "pkcs7")`
    pub fn parse(mode: &str, padding: &str) -> CryptoResult<Self> {
        let config = Self::new(mode.parse()?, padding.parse()?);
        config.validate(AES_BLOCK_SIZE)?;
        Ok(config)
    }

    /// Validate the combination for a cipher with `block_size`-byte blocks.
    ///
    /// Padding is only meaningful for CBC; CFB and CTR with padding are rejected.
    /// PKCS#5 is rejected for any block size other than 8.
    pub fn validate(&self, block_size: usize) -> CryptoResult<()> {
        if self.mode.is_stream() && !self.padding.is_none() {
            return Err(CryptoError::UnsupportedPadding(format!(
                "{} padding is not used with stream mode {}",
                self.padding, self.mode
            )));
        }
        self.padding.check_block_size(block_size)
    }
}

impl fmt::Display for CipherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.mode, self.padding)
    }
}

/// AES key sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AesKeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl AesKeySize {
    pub fn from_key_len(len: usize) -> CryptoResult<Self> {
        match len {
            16 => Ok(AesKeySize::Aes128),
            24 => Ok(AesKeySize::Aes192),
            32 => Ok(AesKeySize::Aes256),
            got => Err(CryptoError::InvalidKeyLength { got }),
        }
    }

    /// Key length in bytes
    pub fn key_len(self) -> usize {
        match self {
            AesKeySize::Aes128 => 16,
            AesKeySize::Aes192 => 24,
            AesKeySize::Aes256 => 32,
        }
    }
}

/// Runs `$body` with `$cipher` bound to the concrete AES type for `$key_size`.
macro_rules! with_aes {
    ($key_size:expr, $cipher:ident => $body:expr) => {
        match $key_size {
            AesKeySize::Aes128 => {
                type $cipher = aes::Aes128;
                $body
            }
            AesKeySize::Aes192 => {
                type $cipher = aes::Aes192;
                $body
            }
            AesKeySize::Aes256 => {
                type $cipher = aes::Aes256;
                $body
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// AES encryptor for a fixed key, IV, mode and padding
///
/// The key and IV are copied in and zeroized on drop. The IV is never generated
/// here: callers supply it and must not reuse an IV with the same key under CBC or
/// CFB, nor a counter block under CTR.
#[derive(ZeroizeOnDrop)]
pub struct AesCipher {
    key: Vec<u8>,
    iv: Vec<u8>,
    #[zeroize(skip)]
    key_size: AesKeySize,
    #[zeroize(skip)]
    config: CipherConfig,
}

impl AesCipher {
    /// Create a cipher. The configuration is validated before the key is looked at.
    pub fn new(key: &[u8], iv: &[u8], config: CipherConfig) -> CryptoResult<Self> {
        config.validate(AES_BLOCK_SIZE).map_err(|err| {
            warn!(%config, "aes configuration rejected");
            err
        })?;
        let key_size = AesKeySize::from_key_len(key.len())?;
        if iv.len() != AES_BLOCK_SIZE {
            return Err(CryptoError::InvalidIvLength {
                expected: AES_BLOCK_SIZE,
                got: iv.len(),
            });
        }

        Ok(Self {
            key: key.to_vec(),
            iv: iv.to_vec(),
            key_size,
            config,
        })
    }

    /// CBC with PKCS#7, the common interoperable choice
    pub fn cbc_pkcs7(key: &[u8], iv: &[u8]) -> CryptoResult<Self> {
        Self::new(key, iv, CipherConfig::new(BlockMode::Cbc, Padding::Pkcs7))
    }

    pub fn config(&self) -> CipherConfig {
        self.config
    }

    pub fn key_size(&self) -> AesKeySize {
        self.key_size
    }

    fn prepare_plaintext(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        match (self.config.mode, self.config.padding) {
            (BlockMode::Cfb | BlockMode::Ctr, _) => Ok(plaintext.to_vec()),
            (BlockMode::Cbc, Padding::None) => {
                if plaintext.len() % AES_BLOCK_SIZE != 0 {
                    return Err(CryptoError::InvalidData(format!(
                        "plaintext length {} is not a multiple of {} and no padding is configured",
                        plaintext.len(),
                        AES_BLOCK_SIZE
                    )));
                }
                Ok(plaintext.to_vec())
            }
            // pad() rejects empty input, so an empty message becomes one block of padding
            (BlockMode::Cbc, _) if plaintext.is_empty() => {
                Ok(vec![AES_BLOCK_SIZE as u8; AES_BLOCK_SIZE])
            }
            (BlockMode::Cbc, padding) => padding.pad(plaintext, AES_BLOCK_SIZE),
        }
    }

    fn check_ciphertext(&self, ciphertext: &[u8]) -> CryptoResult<()> {
        if self.config.mode != BlockMode::Cbc {
            return Ok(());
        }
        if ciphertext.len() < AES_BLOCK_SIZE {
            return Err(CryptoError::CiphertextTooShort {
                len: ciphertext.len(),
                block_size: AES_BLOCK_SIZE,
            });
        }
        if ciphertext.len() % AES_BLOCK_SIZE != 0 {
            return Err(CryptoError::InvalidData(format!(
                "ciphertext length {} is not a multiple of {}",
                ciphertext.len(),
                AES_BLOCK_SIZE
            )));
        }
        Ok(())
    }

    /// Runs the chaining mode over `buf` in place.
    fn apply(&self, direction: Direction, buf: &mut [u8]) -> CryptoResult<()> {
        let len = buf.len();
        let bad_length = |_: cipher::InvalidLength| CryptoError::InvalidData("key or IV length rejected".to_string());

        with_aes!(self.key_size, C => match (self.config.mode, direction) {
            (BlockMode::Cbc, Direction::Encrypt) => {
                cbc::Encryptor::<C>::new_from_slices(&self.key, &self.iv)
                    .map_err(bad_length)?
                    .encrypt_padded_mut::<NoPadding>(buf, len)
                    .map_err(|_| CryptoError::InvalidData("input is not block aligned".to_string()))?;
            }
            (BlockMode::Cbc, Direction::Decrypt) => {
                cbc::Decryptor::<C>::new_from_slices(&self.key, &self.iv)
                    .map_err(bad_length)?
                    .decrypt_padded_mut::<NoPadding>(buf)
                    .map_err(|_| CryptoError::InvalidData("input is not block aligned".to_string()))?;
            }
            (BlockMode::Cfb, Direction::Encrypt) => {
                cfb_mode::Encryptor::<C>::new_from_slices(&self.key, &self.iv)
                    .map_err(bad_length)?
                    .encrypt(buf);
            }
            (BlockMode::Cfb, Direction::Decrypt) => {
                cfb_mode::Decryptor::<C>::new_from_slices(&self.key, &self.iv)
                    .map_err(bad_length)?
                    .decrypt(buf);
            }
            // CTR is its own inverse
            (BlockMode::Ctr, _) => {
                ctr::Ctr128BE::<C>::new_from_slices(&self.key, &self.iv)
                    .map_err(bad_length)?
                    .apply_keystream(buf);
            }
        });

        Ok(())
    }
}

impl Encryptor for AesCipher {
    fn encrypt(&self, plaintext: &[u8]) -> EncryptionResult<Vec<u8>> {
        debug!(
            algorithm = %self.algorithm(),
            len = plaintext.len(),
            "aes encrypt"
        );

        let mut buf = self.prepare_plaintext(plaintext)?;
        self.apply(Direction::Encrypt, &mut buf)?;
        Ok(buf)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> EncryptionResult<Vec<u8>> {
        debug!(
            algorithm = %self.algorithm(),
            len = ciphertext.len(),
            "aes decrypt"
        );

        self.check_ciphertext(ciphertext)?;
        let mut buf = Zeroizing::new(ciphertext.to_vec());
        self.apply(Direction::Decrypt, &mut buf)?;

        if self.config.mode != BlockMode::Cbc {
            return Ok(buf.to_vec());
        }
        self.config
            .padding
            .unpad(&buf, AES_BLOCK_SIZE)
            .map_err(|err| {
                warn!(algorithm = %self.algorithm(), "aes decrypt rejected");
                err
            })
    }

    fn algorithm(&self) -> String {
        format!(
            "AES-{}-{}",
            self.key_size.key_len() * 8,
            self.config.mode.to_string().to_uppercase()
        )
    }
}

impl fmt::Debug for AesCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesCipher")
            .field("key_size", &self.key_size)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
