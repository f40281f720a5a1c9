//! # Envelope Encryption
//!
//! Encrypts one value for many recipients. The payload is sealed once under
//! a random content key; the content key is then wrapped per recipient with
//! the X25519 shared secret between an ephemeral key and the recipient key.
//!
//! ## Wire Shape
//!
//! ```text
//! { alg, ephemeral_key, recipients: [{ key_hash, encrypted_key }], nonce, ciphertext }
//! ```
//!
//! `key_hash` is the SHA-256 hex of the recipient's raw public key and
//! `encrypted_key` is base64 of the wrapped key followed by its 12-byte nonce.

use crate::hashing::sha256_hex;
use crate::symmetric::{aes_gcm_decrypt, aes_gcm_encrypt, AesKey, AesNonce, NONCE_LENGTH};
use crate::CryptoError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroize;

/// Algorithm tag written into every envelope.
pub const ENVELOPE_ALGORITHM: &str = "x25519-aes-256-gcm";

/// Hex-encoded X25519 keypair (raw 32-byte keys).
#[derive(Clone, Serialize, Deserialize)]
pub struct EncryptionKeyPairHex {
    /// Raw public key, hex.
    pub public_key: String,
    /// Raw private key, hex.
    pub private_key: String,
}

impl std::fmt::Debug for EncryptionKeyPairHex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionKeyPairHex")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

impl Drop for EncryptionKeyPairHex {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

/// One wrapped copy of the content key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeRecipient {
    /// SHA-256 hex of the recipient's raw public key.
    pub key_hash: String,
    /// base64(wrapped content key || key nonce).
    pub encrypted_key: String,
}

/// Encrypted payload addressed to one or more recipients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionEnvelope {
    /// Always [`ENVELOPE_ALGORITHM`].
    pub alg: String,
    /// Ephemeral X25519 public key, hex.
    pub ephemeral_key: String,
    /// Per-recipient wrapped content keys.
    pub recipients: Vec<EnvelopeRecipient>,
    /// Content nonce, base64.
    pub nonce: String,
    /// Payload ciphertext with tag, base64.
    pub ciphertext: String,
}

fn decode_key(field: &'static str, input: &str) -> Result<[u8; 32], CryptoError> {
    let bytes = hex::decode(input).map_err(|e| CryptoError::InvalidHex {
        field,
        reason: e.to_string(),
    })?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidKeyLength {
            expected: 32,
            actual,
        })
}

fn decode_base64(field: &'static str, input: &str) -> Result<Vec<u8>, CryptoError> {
    STANDARD.decode(input).map_err(|e| CryptoError::InvalidBase64 {
        field,
        reason: e.to_string(),
    })
}

fn recipient_key_hash(public_key: &[u8; 32]) -> String {
    sha256_hex(public_key)
}

/// Generate an X25519 keypair for envelope encryption.
pub fn generate_encryption_keypair() -> EncryptionKeyPairHex {
    let secret = StaticSecret::random_from_rng(rand::rngs::OsRng);
    let public = PublicKey::from(&secret);
    EncryptionKeyPairHex {
        public_key: hex::encode(public.as_bytes()),
        private_key: hex::encode(secret.to_bytes()),
    }
}

/// Encrypt `value` (JSON-serialized) for every key in `recipient_public_keys`.
///
/// # Errors
///
/// Fails on an empty recipient list, a malformed recipient key, or a
/// payload that cannot be serialized.
pub fn encrypt_envelope<T: Serialize + ?Sized>(
    value: &T,
    recipient_public_keys: &[&str],
) -> Result<EncryptionEnvelope, CryptoError> {
    if recipient_public_keys.is_empty() {
        return Err(CryptoError::NoRecipients);
    }

    let plaintext =
        serde_json::to_vec(value).map_err(|e| CryptoError::Serialization(e.to_string()))?;

    let content_key = AesKey::generate();
    let nonce = AesNonce::generate();
    let ciphertext = aes_gcm_encrypt(&content_key, &nonce, &plaintext)?;

    let ephemeral = StaticSecret::random_from_rng(rand::rngs::OsRng);
    let ephemeral_public = PublicKey::from(&ephemeral);

    let mut recipients = Vec::with_capacity(recipient_public_keys.len());
    for public_key_hex in recipient_public_keys {
        let public_bytes = decode_key("recipient_public_key", public_key_hex)?;
        let shared = ephemeral.diffie_hellman(&PublicKey::from(public_bytes));
        let wrapping_key = AesKey::from_bytes(*shared.as_bytes());

        let key_nonce = AesNonce::generate();
        let mut wrapped = aes_gcm_encrypt(&wrapping_key, &key_nonce, content_key.as_bytes())?;
        wrapped.extend_from_slice(key_nonce.as_bytes());

        recipients.push(EnvelopeRecipient {
            key_hash: recipient_key_hash(&public_bytes),
            encrypted_key: STANDARD.encode(&wrapped),
        });
    }

    Ok(EncryptionEnvelope {
        alg: ENVELOPE_ALGORITHM.to_string(),
        ephemeral_key: hex::encode(ephemeral_public.as_bytes()),
        recipients,
        nonce: STANDARD.encode(nonce.as_bytes()),
        ciphertext: STANDARD.encode(&ciphertext),
    })
}

/// Decrypt an envelope with the recipient's keypair.
///
/// # Errors
///
/// `NoMatchingRecipient` when the envelope was not addressed to
/// `public_key_hex`; `DecryptionFailed` on a wrong private key or any
/// tampering with the wrapped key or the ciphertext.
pub fn decrypt_envelope<T: DeserializeOwned>(
    envelope: &EncryptionEnvelope,
    private_key_hex: &str,
    public_key_hex: &str,
) -> Result<T, CryptoError> {
    if envelope.alg != ENVELOPE_ALGORITHM {
        return Err(CryptoError::UnsupportedAlgorithm(envelope.alg.clone()));
    }

    let public_bytes = decode_key("public_key", public_key_hex)?;
    let key_hash = recipient_key_hash(&public_bytes);
    let recipient = envelope
        .recipients
        .iter()
        .find(|r| r.key_hash == key_hash)
        .ok_or(CryptoError::NoMatchingRecipient)?;

    let ephemeral_public = PublicKey::from(decode_key("ephemeral_key", &envelope.ephemeral_key)?);
    let mut private_bytes = decode_key("private_key", private_key_hex)?;
    let secret = StaticSecret::from(private_bytes);
    private_bytes.zeroize();
    let shared = secret.diffie_hellman(&ephemeral_public);
    let wrapping_key = AesKey::from_bytes(*shared.as_bytes());

    let wrapped = decode_base64("encrypted_key", &recipient.encrypted_key)?;
    if wrapped.len() < NONCE_LENGTH {
        return Err(CryptoError::DecryptionFailed(
            "wrapped key shorter than its nonce".to_string(),
        ));
    }
    let (wrapped_key, key_nonce) = wrapped.split_at(wrapped.len() - NONCE_LENGTH);
    let mut content_bytes =
        aes_gcm_decrypt(&wrapping_key, &AesNonce::from_slice(key_nonce)?, wrapped_key)?;
    let content_array: [u8; 32] = content_bytes.as_slice().try_into().map_err(|_| {
        CryptoError::DecryptionFailed("unwrapped content key has wrong length".to_string())
    })?;
    content_bytes.zeroize();
    let content_key = AesKey::from_bytes(content_array);

    let nonce = AesNonce::from_slice(&decode_base64("nonce", &envelope.nonce)?)?;
    let ciphertext = decode_base64("ciphertext", &envelope.ciphertext)?;
    let plaintext = aes_gcm_decrypt(&content_key, &nonce, &ciphertext)?;

    serde_json::from_slice(&plaintext).map_err(|e| CryptoError::Serialization(e.to_string()))
}
