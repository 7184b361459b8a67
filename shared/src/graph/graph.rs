use std::collections::HashMap;

use crate::graph::Node;
use crate::ids::{GraphId, NodeId};

/// An authored graph asset: the play-time-immutable source every session
/// duplicates from.
///
/// Base nodes form the playable flow in authoring order. Manager fragments
/// are fragments rooted at the graph itself; they begin when a session
/// starts and last until it ends.
#[derive(Debug, Clone)]
pub struct Graph {
    id: GraphId,
    name: String,
    nodes: HashMap<NodeId, Node>,
    base_nodes: Vec<NodeId>,
    manager_fragments: Vec<NodeId>,
    entry: Option<NodeId>,
}

impl Graph {
    pub(crate) fn new(
        id: GraphId,
        name: String,
        nodes: HashMap<NodeId, Node>,
        base_nodes: Vec<NodeId>,
        manager_fragments: Vec<NodeId>,
        entry: Option<NodeId>,
    ) -> Self {
        Self {
            id,
            name,
            nodes,
            base_nodes,
            manager_fragments,
            entry,
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn iter_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn base_nodes(&self) -> &[NodeId] {
        &self.base_nodes
    }

    pub fn manager_fragments(&self) -> &[NodeId] {
        &self.manager_fragments
    }

    /// Where the flow starts: the designated entry, or the first base node.
    /// `None` only for a graph with no base nodes, which is not playable.
    pub fn entry(&self) -> Option<NodeId> {
        self.entry
    }
}
