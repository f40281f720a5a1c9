//! # Agent Identities
//!
//! Automated actors that sign on their own key while remaining accountable
//! to an operator. Their output starts as drafts; an approved draft is a
//! new block that supersedes the draft and credits the agent.

use super::errors::SignatureError;
use super::signing::sign_with;
use fb_02_block_factory::create_with_refs;
use shared_crypto::Ed25519KeyPair;
use shared_types::{Block, RefValue, Refs, SignedBlock, State, Value};
use tracing::info;

/// Block type of agent identities.
pub const AGENT_TYPE: &str = "actor.agent";

const DRAFT_FIELD: &str = "draft";
const AGENT_ROLE: &str = "agent";
const APPROVED_AGENT_ROLE: &str = "approved_agent";

/// Optional descriptors for a new agent.
#[derive(Debug, Clone, Default)]
pub struct AgentOptions {
    /// Model identifier, e.g. the name of the underlying system.
    pub model: Option<String>,
    pub capabilities: Vec<String>,
    /// Extra state merged last; may override `name`, `model`, `capabilities`.
    pub extra_state: State,
}

/// An agent's identity block plus its signing key.
#[derive(Debug)]
pub struct Agent {
    block: Option<Block>,
    author_hash: String,
    keypair: Ed25519KeyPair,
}

/// A draft block and the agent's signature over it.
#[derive(Debug, Clone)]
pub struct Draft {
    pub block: Block,
    pub signed: SignedBlock,
}

/// Creates a new agent with a fresh keypair.
///
/// # Errors
///
/// `MissingArgument` when `name` or `operator_hash` is empty; every agent
/// must have an operator.
pub fn create_agent(name: &str, operator_hash: &str, options: AgentOptions) -> Result<Agent, SignatureError> {
    if name.is_empty() {
        return Err(SignatureError::MissingArgument { name: "name" });
    }
    if operator_hash.is_empty() {
        return Err(SignatureError::MissingArgument {
            name: "operator_hash",
        });
    }

    let mut state = State::from([("name".to_string(), Value::from(name))]);
    if let Some(model) = options.model.filter(|m| !m.is_empty()) {
        state.insert("model".to_string(), Value::String(model));
    }
    if !options.capabilities.is_empty() {
        state.insert(
            "capabilities".to_string(),
            Value::Array(options.capabilities.into_iter().map(Value::String).collect()),
        );
    }
    state.extend(options.extra_state);

    let refs = Refs::from([("operator".to_string(), RefValue::from(operator_hash))]);
    let block = create_with_refs(AGENT_TYPE, state, refs)?;
    info!(agent = %block.hash, operator = operator_hash, "agent created");

    Ok(Agent {
        author_hash: block.hash.clone(),
        block: Some(block),
        keypair: Ed25519KeyPair::generate(),
    })
}

impl Agent {
    /// Restores an agent from persisted credentials.
    pub fn load(author_hash: &str, private_key_hex: &str) -> Result<Self, SignatureError> {
        if author_hash.is_empty() {
            return Err(SignatureError::MissingArgument {
                name: "author_hash",
            });
        }
        Ok(Self {
            block: None,
            author_hash: author_hash.to_string(),
            keypair: Ed25519KeyPair::from_hex(private_key_hex)?,
        })
    }

    /// The identity block; `None` for agents restored with [`Agent::load`].
    pub fn block(&self) -> Option<&Block> {
        self.block.as_ref()
    }

    pub fn author_hash(&self) -> &str {
        &self.author_hash
    }

    pub fn public_key_hex(&self) -> String {
        self.keypair.public_key().to_hex()
    }

    /// Exported so the caller can persist it.
    pub fn private_key_hex(&self) -> String {
        self.keypair.to_hex()
    }

    /// Signs `block` as this agent.
    pub fn sign(&self, block: &Block) -> Result<SignedBlock, SignatureError> {
        sign_with(&self.keypair, block, &self.author_hash)
    }

    /// Creates and signs a draft: `state.draft = true`, `refs.agent = self`.
    pub fn create_draft(&self, block_type: &str, mut state: State, mut refs: Refs) -> Result<Draft, SignatureError> {
        state.insert(DRAFT_FIELD.to_string(), Value::Bool(true));
        refs.insert(
            AGENT_ROLE.to_string(),
            RefValue::Single(self.author_hash.clone()),
        );
        let block = create_with_refs(block_type, state, refs)?;
        let signed = self.sign(&block)?;
        Ok(Draft { block, signed })
    }
}

/// Confirms a draft.
///
/// The result drops `state.draft`, moves `refs.agent` to
/// `refs.approved_agent` and supersedes the draft via `refs.updates`. The
/// operator is expected to sign it.
pub fn approve_draft(draft: &Block) -> Result<Block, SignatureError> {
    let mut state = draft.state.clone();
    state.remove(DRAFT_FIELD);

    let mut refs = draft.refs.clone();
    let agent = refs.remove(AGENT_ROLE);
    refs.insert("updates".to_string(), RefValue::Single(draft.hash.clone()));
    if let Some(agent) = agent {
        refs.insert(APPROVED_AGENT_ROLE.to_string(), agent);
    }

    Ok(create_with_refs(&draft.block_type, state, refs)?)
}
