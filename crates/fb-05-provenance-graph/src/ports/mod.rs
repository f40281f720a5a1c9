//! Ports layer: the provenance API and the resolvers it depends on.

pub mod inbound;
pub mod outbound;

pub use inbound::ProvenanceApi;
pub use outbound::{BlockResolver, ForwardResolver};
