//! Cryptographic primitives toolkit
//!
//! Thin, strongly-typed wrappers over RustCrypto primitives:
//! - AES in CBC, CFB and CTR modes with PKCS#5/PKCS#7 padding ([`AesCipher`])
//! - RSA encryption with PKCS#1 v1.5 or OAEP ([`RsaCipher`])
//! - RSA signatures with PKCS#1 v1.5 or PSS over pre-computed digests ([`RsaSigner`])
//! - SHA-1 and SHA-256 digests, HMAC over SHA-1, SHA-256 and SHA-512
//! - PEM key import/export, key pair generation and secure random keys and IVs
//!
//! Every operation is a synchronous function of its inputs. Nothing is cached and no
//! state is shared between calls, so values can be used from any number of threads.
//!
//! # Example
//!
//! ```rust
//! use crypto_kit::{AesCipher, BlockMode, CipherConfig, Encryptor, Padding};
//!
//! # fn main() -> Result<(), crypto_kit::CryptoError> {
//! let key = crypto_kit::random::generate_key(32)?;
//! let iv = crypto_kit::random::generate_iv();
//! let cipher = AesCipher::new(&key, &iv, CipherConfig::new(BlockMode::Cbc, Padding::Pkcs7))?;
//!
//! let encoded = cipher.encrypt_base64("attack at dawn")?;
//! assert_eq!(cipher.decrypt_base64(&encoded)?, "attack at dawn");
//! # Ok(())
//! # }
//! ```

pub mod aes_cipher;
pub mod config;
pub mod constant_time;
pub mod digest;
pub mod encryption;
pub mod error;
pub mod hmac;
pub mod keys;
pub mod padding;
pub mod random;
pub mod rsa_cipher;
pub mod rsa_signature;

pub use aes_cipher::{AesCipher, AesKeySize, BlockMode, CipherConfig, AES_BLOCK_SIZE};
pub use config::CryptoConfig;
pub use digest::DigestKind;
pub use encryption::{EncryptionResult, Encryptor};
pub use error::*;
pub use crate::hmac::{calculate_hmac, verify_hmac, HmacAlgorithm};
pub use keys::{generate_key_pair, PrivateKey, PublicKey};
pub use padding::Padding;
pub use rsa_cipher::{EncryptionScheme, RsaCipher};
pub use rsa_signature::{RsaSigner, SignatureScheme};
