//! Signing and verification of block wrappers.

use super::errors::SignatureError;
use fb_01_canonical::canonical;
use serde::{Deserialize, Serialize};
use shared_crypto::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
use shared_types::{Block, SignedBlock, PROTOCOL_VERSION};
use tracing::debug;

/// Hex-encoded raw Ed25519 keypair.
#[derive(Clone, Serialize, Deserialize)]
pub struct KeyPairHex {
    pub public_key: String,
    pub private_key: String,
}

impl std::fmt::Debug for KeyPairHex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPairHex")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// Fresh random signing keypair.
pub fn generate_keypair() -> KeyPairHex {
    let keypair = Ed25519KeyPair::generate();
    KeyPairHex {
        public_key: keypair.public_key().to_hex(),
        private_key: keypair.to_hex(),
    }
}

fn content_bytes(block: &Block) -> Result<String, SignatureError> {
    Ok(canonical(&block.block_type, &block.state, &block.refs)?)
}

pub(crate) fn sign_with(
    keypair: &Ed25519KeyPair,
    block: &Block,
    author_hash: &str,
) -> Result<SignedBlock, SignatureError> {
    let content = content_bytes(block)?;
    let signature = keypair.sign(content.as_bytes());
    Ok(SignedBlock {
        foodblock: block.clone(),
        author_hash: author_hash.to_string(),
        signature: signature.to_hex(),
        protocol_version: PROTOCOL_VERSION.to_string(),
    })
}

/// Signs `block` as `author_hash`.
///
/// # Errors
///
/// `Key` for a private key that is not 32 bytes of hex.
pub fn sign(block: &Block, author_hash: &str, private_key_hex: &str) -> Result<SignedBlock, SignatureError> {
    let keypair = Ed25519KeyPair::from_hex(private_key_hex)?;
    sign_with(&keypair, block, author_hash)
}

/// True only if `signed.signature` is a valid signature by
/// `public_key_hex` over the canonical form of `signed.foodblock`.
///
/// Malformed keys or signatures, a tampered block, or a wrong key all give
/// `false`.
pub fn verify(signed: &SignedBlock, public_key_hex: &str) -> bool {
    match check_signature(signed, public_key_hex) {
        Ok(()) => true,
        Err(reason) => {
            debug!(author = %signed.author_hash, %reason, "signature rejected");
            false
        }
    }
}

fn check_signature(signed: &SignedBlock, public_key_hex: &str) -> Result<(), SignatureError> {
    let public_key = Ed25519PublicKey::from_hex(public_key_hex)?;
    let signature = Ed25519Signature::from_hex(&signed.signature)?;
    let content = content_bytes(&signed.foodblock)?;
    public_key.verify(content.as_bytes(), &signature)?;
    Ok(())
}
