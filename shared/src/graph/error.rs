use thiserror::Error;

/// Authoring errors raised while assembling a graph.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    /// Referenced node was never added to this builder
    #[error("Unknown node {node_id}: {context}")]
    UnknownNode {
        node_id: String,
        context: &'static str,
    },

    /// Entry designation must point at a base node
    #[error("Entry node {node_id} is not a base node")]
    EntryNotBase { node_id: String },
}
