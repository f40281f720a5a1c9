//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed (wrong key or tampered ciphertext)
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },

    /// Invalid hex encoding
    #[error("Invalid hex in {field}: {reason}")]
    InvalidHex {
        /// Which input was malformed
        field: &'static str,
        /// Decoder message
        reason: String,
    },

    /// Invalid base64 encoding
    #[error("Invalid base64 in {field}: {reason}")]
    InvalidBase64 {
        /// Which input was malformed
        field: &'static str,
        /// Decoder message
        reason: String,
    },

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Invalid signature format
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// Invalid public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Envelope has no entry for the supplied public key
    #[error("No matching recipient entry found for this key")]
    NoMatchingRecipient,

    /// Envelope requested without recipients
    #[error("At least one recipient public key is required")]
    NoRecipients,

    /// Unsupported envelope algorithm
    #[error("Unsupported envelope algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Plaintext could not be (de)serialized
    #[error("Payload serialization failed: {0}")]
    Serialization(String),
}

/// Result alias for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;
