//! # Signature Layer Subsystem
//!
//! Authorship over blocks. A signature covers the canonical bytes of the
//! block content, never the JSON wrapper, so any SDK that reproduces the
//! canonical form can verify it.
//!
//! ## Wrapper
//!
//! ```text
//! { foodblock, author_hash, signature: hex(64 bytes), protocol_version: "0.4.0" }
//! ```
//!
//! ## Agents
//!
//! An agent is an `actor.agent` block with its own keypair, operated on
//! behalf of a human or business (`refs.operator`). Agents produce drafts
//! (`state.draft = true`) that the operator approves into confirmed blocks.

pub mod domain;

pub use domain::agent::{approve_draft, create_agent, Agent, AgentOptions, Draft, AGENT_TYPE};
pub use domain::errors::SignatureError;
pub use domain::signing::{generate_keypair, sign, verify, KeyPairHex};
