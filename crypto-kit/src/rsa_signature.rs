//! RSA signatures over pre-computed digests.
//!
//! [`sign`] and [`verify`] take the digest itself, never the message. Callers hash
//! through [`crate::digest`] first, or use [`RsaSigner::sign_message`] which does it for
//! them. PSS uses the salt length and MGF1 parameters of the `rsa` crate defaults.

use crate::digest::DigestKind;
use crate::error::{CryptoError, CryptoResult};
use crate::keys::{PrivateKey, PublicKey};
use rand::rngs::OsRng;
use rsa::{Pkcs1v15Sign, Pss};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// RSA signature padding scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureScheme {
    /// PKCS#1 v1.5, deterministic
    Pkcs1v15,
    /// RSASSA-PSS, randomized salt
    #[default]
    Pss,
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignatureScheme::Pkcs1v15 => "pkcs1v15",
            SignatureScheme::Pss => "pss",
        };
        f.write_str(name)
    }
}

impl FromStr for SignatureScheme {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pkcs1v15" | "pkcs1" | "pkcs1-v1_5" => Ok(SignatureScheme::Pkcs1v15),
            "pss" => Ok(SignatureScheme::Pss),
            _ => Err(CryptoError::InvalidScheme(format!(
                "{}. Valid options: pkcs1v15, pss",
                s
            ))),
        }
    }
}

/// Sign `digest`, the output of `digest_kind` over the message.
///
/// A digest whose length does not match `digest_kind` is rejected by the RSA primitive
/// and surfaces as `SigningFailed` with its message.
pub fn sign(
    private_key: &PrivateKey,
    scheme: SignatureScheme,
    digest_kind: DigestKind,
    digest: &[u8],
) -> CryptoResult<Vec<u8>> {
    debug!(%scheme, %digest_kind, "rsa sign");
    let key = private_key.as_rsa();
    let mut rng = OsRng;
    let result = match (scheme, digest_kind) {
        (SignatureScheme::Pkcs1v15, DigestKind::Sha1) => {
            key.sign_with_rng(&mut rng, Pkcs1v15Sign::new::<Sha1>(), digest)
        }
        (SignatureScheme::Pkcs1v15, DigestKind::Sha256) => {
            key.sign_with_rng(&mut rng, Pkcs1v15Sign::new::<Sha256>(), digest)
        }
        (SignatureScheme::Pss, DigestKind::Sha1) => {
            key.sign_with_rng(&mut rng, Pss::new::<Sha1>(), digest)
        }
        (SignatureScheme::Pss, DigestKind::Sha256) => {
            key.sign_with_rng(&mut rng, Pss::new::<Sha256>(), digest)
        }
    };
    result.map_err(|e| CryptoError::SigningFailed(e.to_string()))
}

/// Verify `signature` over `digest`.
///
/// Any mismatch yields `SignatureInvalid` and nothing else.
pub fn verify(
    public_key: &PublicKey,
    scheme: SignatureScheme,
    digest_kind: DigestKind,
    digest: &[u8],
    signature: &[u8],
) -> CryptoResult<()> {
    debug!(%scheme, %digest_kind, "rsa verify");
    let key = public_key.as_rsa();
    let result = match (scheme, digest_kind) {
        (SignatureScheme::Pkcs1v15, DigestKind::Sha1) => {
            key.verify(Pkcs1v15Sign::new::<Sha1>(), digest, signature)
        }
        (SignatureScheme::Pkcs1v15, DigestKind::Sha256) => {
            key.verify(Pkcs1v15Sign::new::<Sha256>(), digest, signature)
        }
        (SignatureScheme::Pss, DigestKind::Sha1) => key.verify(Pss::new::<Sha1>(), digest, signature),
        (SignatureScheme::Pss, DigestKind::Sha256) => {
            key.verify(Pss::new::<Sha256>(), digest, signature)
        }
    };
    result.map_err(|_| {
        warn!(%scheme, %digest_kind, "rsa signature rejected");
        CryptoError::SignatureInvalid
    })
}

/// Signer bound to one key and scheme
#[derive(Debug, Clone)]
pub struct RsaSigner {
    public_key: PublicKey,
    private_key: Option<PrivateKey>,
    scheme: SignatureScheme,
    digest_kind: DigestKind,
}

impl RsaSigner {
    pub fn new(private_key: PrivateKey, scheme: SignatureScheme, digest_kind: DigestKind) -> Self {
        Self {
            public_key: private_key.public_key(),
            private_key: Some(private_key),
            scheme,
            digest_kind,
        }
    }

    /// Signer that can only verify
    pub fn verifier(public_key: PublicKey, scheme: SignatureScheme, digest_kind: DigestKind) -> Self {
        Self {
            public_key,
            private_key: None,
            scheme,
            digest_kind,
        }
    }

    pub fn digest_kind(&self) -> DigestKind {
        self.digest_kind
    }

    pub fn sign(&self, digest: &[u8]) -> CryptoResult<Vec<u8>> {
        let private_key = self.private_key.as_ref().ok_or_else(|| {
            CryptoError::Configuration("signing requires a private key".to_string())
        })?;
        sign(private_key, self.scheme, self.digest_kind, digest)
    }

    pub fn verify(&self, digest: &[u8], signature: &[u8]) -> CryptoResult<()> {
        verify(&self.public_key, self.scheme, self.digest_kind, digest, signature)
    }

    /// Hash `message` with the configured digest, then sign
    pub fn sign_message(&self, message: &[u8]) -> CryptoResult<Vec<u8>> {
        self.sign(&self.digest_kind.hash(message))
    }

    /// Hash `message` with the configured digest, then verify
    pub fn verify_message(&self, message: &[u8], signature: &[u8]) -> CryptoResult<()> {
        self.verify(&self.digest_kind.hash(message), signature)
    }
}
