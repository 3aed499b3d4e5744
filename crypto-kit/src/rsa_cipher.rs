use crate::digest::DigestKind;
use crate::encryption::{EncryptionResult, Encryptor};
use crate::error::{CryptoError, CryptoResult};
use crate::keys::{PrivateKey, PublicKey};
use rand::rngs::OsRng;
use rsa::{Oaep, Pkcs1v15Encrypt};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// RSA encryption padding scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncryptionScheme {
    /// PKCS#1 v1.5, digest independent
    Pkcs1v15,
    /// OAEP with MGF1, both over the selected digest
    #[default]
    Oaep,
}

impl fmt::Display for EncryptionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EncryptionScheme::Pkcs1v15 => "pkcs1v15",
            EncryptionScheme::Oaep => "oaep",
        };
        f.write_str(name)
    }
}

impl FromStr for EncryptionScheme {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pkcs1v15" | "pkcs1" | "pkcs1-v1_5" => Ok(EncryptionScheme::Pkcs1v15),
            "oaep" => Ok(EncryptionScheme::Oaep),
            _ => Err(CryptoError::InvalidScheme(format!(
                "{}. Valid options: pkcs1v15, oaep",
                s
            ))),
        }
    }
}

fn oaep(digest: DigestKind) -> Oaep {
    match digest {
        DigestKind::Sha1 => Oaep::new::<Sha1>(),
        DigestKind::Sha256 => Oaep::new::<Sha256>(),
    }
}

/// Encrypt `plaintext` for the holder of `public_key`.
///
/// `digest` only matters for OAEP. Plaintext longer than the scheme allows for the key
/// size fails with `EncryptionFailed`.
pub fn encrypt(
    public_key: &PublicKey,
    scheme: EncryptionScheme,
    digest: DigestKind,
    plaintext: &[u8],
) -> CryptoResult<Vec<u8>> {
    let key = public_key.as_rsa();
    let mut rng = OsRng;
    let result = match scheme {
        EncryptionScheme::Pkcs1v15 => key.encrypt(&mut rng, Pkcs1v15Encrypt, plaintext),
        EncryptionScheme::Oaep => key.encrypt(&mut rng, oaep(digest), plaintext),
    };
    result.map_err(|e| CryptoError::EncryptionFailed(e.to_string()))
}

/// Decrypt `ciphertext` with `private_key`.
///
/// Every failure, including a digest that differs from the one used to encrypt, is
/// reported as the same `DecryptionFailed`.
pub fn decrypt(
    private_key: &PrivateKey,
    scheme: EncryptionScheme,
    digest: DigestKind,
    ciphertext: &[u8],
) -> CryptoResult<Vec<u8>> {
    let key = private_key.as_rsa();
    let mut rng = OsRng;
    let result = match scheme {
        EncryptionScheme::Pkcs1v15 => key.decrypt_blinded(&mut rng, Pkcs1v15Encrypt, ciphertext),
        EncryptionScheme::Oaep => key.decrypt_blinded(&mut rng, oaep(digest), ciphertext),
    };
    result.map_err(|_| {
        warn!(%scheme, "rsa decrypt rejected");
        CryptoError::DecryptionFailed
    })
}

/// RSA encryptor bound to one key pair and scheme
///
/// Built from a public key alone it can only encrypt.
#[derive(Debug, Clone)]
pub struct RsaCipher {
    public_key: PublicKey,
    private_key: Option<PrivateKey>,
    scheme: EncryptionScheme,
    digest: DigestKind,
}

impl RsaCipher {
    pub fn new(private_key: PrivateKey, scheme: EncryptionScheme, digest: DigestKind) -> Self {
        Self {
            public_key: private_key.public_key(),
            private_key: Some(private_key),
            scheme,
            digest,
        }
    }

    pub fn encrypt_only(public_key: PublicKey, scheme: EncryptionScheme, digest: DigestKind) -> Self {
        Self {
            public_key,
            private_key: None,
            scheme,
            digest,
        }
    }

    pub fn scheme(&self) -> EncryptionScheme {
        self.scheme
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

impl Encryptor for RsaCipher {
    fn encrypt(&self, plaintext: &[u8]) -> EncryptionResult<Vec<u8>> {
        debug!(algorithm = %self.algorithm(), len = plaintext.len(), "rsa encrypt");
        encrypt(&self.public_key, self.scheme, self.digest, plaintext)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> EncryptionResult<Vec<u8>> {
        debug!(algorithm = %self.algorithm(), len = ciphertext.len(), "rsa decrypt");
        let private_key = self.private_key.as_ref().ok_or_else(|| {
            CryptoError::Configuration("decryption requires a private key".to_string())
        })?;
        decrypt(private_key, self.scheme, self.digest, ciphertext)
    }

    fn algorithm(&self) -> String {
        match self.scheme {
            EncryptionScheme::Pkcs1v15 => "RSA-PKCS1v15".to_string(),
            EncryptionScheme::Oaep => {
                format!("RSA-OAEP-{}", self.digest.to_string().to_uppercase())
            }
        }
    }
}
