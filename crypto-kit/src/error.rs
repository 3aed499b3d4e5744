use thiserror::Error;

/// Broad classification of a [`CryptoError`].
///
/// Callers branch on the kind rather than on individual variants when all they need
/// to know is whether fixing the configuration or the input can help.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unsupported or malformed algorithm selection, detected before any transform runs.
    Configuration,
    /// Malformed caller input detected while running the transform.
    InputValidation,
    /// Decryption or verification failed. Carries no detail on purpose.
    CryptographicFailure,
    /// Key parsing, encoding or generation failed.
    Resource,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Unsupported block cipher mode: {0}")]
    UnsupportedMode(String),

    #[error("Unsupported padding scheme: {0}")]
    UnsupportedPadding(String),

    #[error("Invalid RSA scheme: {0}")]
    InvalidScheme(String),

    #[error("Unsupported digest kind: {0}")]
    UnsupportedDigestKind(String),

    #[error("Unsupported HMAC algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid block size {block_size}, must be between 1 and 255")]
    InvalidBlockSize { block_size: usize },

    #[error("Invalid block size {block_size} for PKCS#5, an 8-byte block is required")]
    InvalidBlockSizeForPkcs5 { block_size: usize },

    #[error("Invalid key length: expected 16, 24 or 32 bytes, got {got}")]
    InvalidKeyLength { got: usize },

    #[error("Invalid IV length: expected {expected}, got {got}")]
    InvalidIvLength { expected: usize, got: usize },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Ciphertext too short: {len} bytes, at least {block_size} required")]
    CiphertextTooShort { len: usize, block_size: usize },

    #[error("Malformed base64 input: {0}")]
    MalformedBase64(String),

    #[error("Invalid padding on input")]
    InvalidPadding,

    #[error("Invalid UTF-8 in decrypted data: {0}")]
    InvalidUtf8(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Signature verification failed")]
    SignatureInvalid,

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Key encoding failed: {0}")]
    KeyEncodingFailed(String),

    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CryptoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CryptoError::UnsupportedMode(_)
            | CryptoError::UnsupportedPadding(_)
            | CryptoError::InvalidScheme(_)
            | CryptoError::UnsupportedDigestKind(_)
            | CryptoError::UnsupportedAlgorithm(_)
            | CryptoError::InvalidBlockSize { .. }
            | CryptoError::InvalidBlockSizeForPkcs5 { .. }
            | CryptoError::InvalidKeyLength { .. }
            | CryptoError::InvalidIvLength { .. }
            | CryptoError::Configuration(_) => ErrorKind::Configuration,

            CryptoError::InvalidData(_)
            | CryptoError::CiphertextTooShort { .. }
            | CryptoError::MalformedBase64(_)
            | CryptoError::InvalidPadding
            | CryptoError::InvalidUtf8(_)
            | CryptoError::EncryptionFailed(_)
            | CryptoError::SigningFailed(_) => ErrorKind::InputValidation,

            CryptoError::DecryptionFailed | CryptoError::SignatureInvalid => {
                ErrorKind::CryptographicFailure
            }

            CryptoError::InvalidKey(_)
            | CryptoError::KeyEncodingFailed(_)
            | CryptoError::KeyGenerationFailed(_) => ErrorKind::Resource,
        }
    }

    /// True when correcting the algorithm selection may resolve the error.
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}

pub type CryptoResult<T> = Result<T, CryptoError>;
