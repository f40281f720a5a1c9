//! # Shared Crypto - Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256 | Block identity, Merkle nodes |
//! | `signatures` | Ed25519 | Author signatures over canonical bytes |
//! | `symmetric` | AES-256-GCM | Content and key wrapping |
//! | `envelope` | X25519 + AES-256-GCM | Multi-recipient encrypted fields |
//!
//! ## Key Format
//!
//! All keys cross the API boundary as lowercase hex of the raw 32-byte key.
//! No DER/SPKI wrapping, so keys are portable between SDKs.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod envelope;
pub mod errors;
pub mod hashing;
pub mod signatures;
pub mod symmetric;

// Re-exports
pub use envelope::{
    decrypt_envelope, encrypt_envelope, generate_encryption_keypair, EncryptionEnvelope,
    EncryptionKeyPairHex, EnvelopeRecipient, ENVELOPE_ALGORITHM,
};
pub use errors::CryptoError;
pub use hashing::{sha256, sha256_hex, Hash};
pub use signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use symmetric::{aes_gcm_decrypt, aes_gcm_encrypt, AesKey, AesNonce};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
