//! # Symmetric Encryption
//!
//! AES-256-GCM with 96-bit random nonces. Used to wrap envelope content
//! keys and to encrypt envelope payloads.

use crate::CryptoError;
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use zeroize::Zeroize;

/// AES-GCM nonce length in bytes.
pub const NONCE_LENGTH: usize = 12;

/// Secret key (256-bit).
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct AesKey([u8; 32]);

impl AesKey {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Generate random key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::RngCore::fill_bytes(&mut rand::rngs::OsRng, &mut bytes);
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Nonce for AES-GCM.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AesNonce([u8; NONCE_LENGTH]);

impl AesNonce {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; NONCE_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, checking its length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let actual = bytes.len();
        bytes
            .try_into()
            .map(Self)
            .map_err(|_| CryptoError::InvalidKeyLength {
                expected: NONCE_LENGTH,
                actual,
            })
    }

    /// Generate random nonce. A key must never see the same nonce twice.
    pub fn generate() -> Self {
        let mut bytes = [0u8; NONCE_LENGTH];
        rand::RngCore::fill_bytes(&mut rand::rngs::OsRng, &mut bytes);
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_LENGTH] {
        &self.0
    }
}

/// Encrypt plaintext with AES-256-GCM. The returned ciphertext carries the
/// 16-byte authentication tag at its end.
///
/// # Errors
///
/// Returns `CryptoError::EncryptionFailed` if encryption fails.
pub fn aes_gcm_encrypt(
    key: &AesKey,
    nonce: &AesNonce,
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    cipher
        .encrypt(Nonce::from_slice(nonce.as_bytes()), plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))
}

/// Decrypt AES-256-GCM ciphertext.
///
/// # Errors
///
/// Returns `CryptoError::DecryptionFailed` on a wrong key or a tampered
/// ciphertext.
pub fn aes_gcm_decrypt(
    key: &AesKey,
    nonce: &AesNonce,
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))?;

    cipher
        .decrypt(Nonce::from_slice(nonce.as_bytes()), ciphertext)
        .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))
}
