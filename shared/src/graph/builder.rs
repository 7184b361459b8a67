use std::collections::HashMap;

use crate::behavior::NodeBehavior;
use crate::graph::{Graph, GraphError, Node};
use crate::ids::{GraphId, NodeId};
use crate::property::PropertyValue;
use crate::tag::Tag;

/// Assembles an authored [`Graph`].
///
/// Structure is validated as nodes are added, so [`build`](Self::build)
/// itself cannot fail: base nodes are standalone non-fragments, fragments
/// always hang beneath an existing parent, and manager fragments are
/// fragments rooted at the graph itself.
pub struct GraphBuilder {
    id: GraphId,
    name: String,
    nodes: HashMap<NodeId, Node>,
    base_nodes: Vec<NodeId>,
    manager_fragments: Vec<NodeId>,
    entry: Option<NodeId>,
}

impl GraphBuilder {
    pub fn new(name: &str) -> Self {
        Self::with_id(GraphId::new(), name)
    }

    /// Builder with a caller-chosen graph id, for assets whose identity must
    /// match across machines.
    pub fn with_id(id: GraphId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            nodes: HashMap::new(),
            base_nodes: Vec::new(),
            manager_fragments: Vec::new(),
            entry: None,
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    /// Adds a standalone node to the playable flow and returns its guid.
    pub fn base_node<B: NodeBehavior>(&mut self, behavior: B) -> NodeId {
        let id = NodeId::new();
        self.nodes.insert(id, Node::new(id, behavior, None, false));
        self.base_nodes.push(id);
        id
    }

    /// Adds a fragment rooted at the graph itself. It begins when a session
    /// starts and lasts until the session ends.
    pub fn manager_fragment<B: NodeBehavior>(&mut self, behavior: B) -> NodeId {
        let id = NodeId::new();
        self.nodes.insert(id, Node::new(id, behavior, None, true));
        self.manager_fragments.push(id);
        id
    }

    /// Attaches a fragment beneath `parent`, after its existing sub-nodes.
    pub fn fragment<B: NodeBehavior>(
        &mut self,
        parent: NodeId,
        behavior: B,
    ) -> Result<NodeId, GraphError> {
        if !self.nodes.contains_key(&parent) {
            return Err(GraphError::UnknownNode {
                node_id: parent.to_string(),
                context: "fragment parent",
            });
        }
        let id = NodeId::new();
        self.nodes
            .insert(id, Node::new(id, behavior, Some(parent), true));
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.push_sub_node(id);
        }
        Ok(id)
    }

    pub fn tag(&mut self, node: NodeId, tag: impl Into<Tag>) -> Result<(), GraphError> {
        match self.nodes.get_mut(&node) {
            Some(record) => {
                record.tags_mut().insert(tag.into());
                Ok(())
            }
            None => Err(GraphError::UnknownNode {
                node_id: node.to_string(),
                context: "tag target",
            }),
        }
    }

    /// Seeds an authored property value. Authored values are present on
    /// every machine's copy of the asset, so they are never mirrored.
    pub fn property(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<(), GraphError> {
        match self.nodes.get_mut(&node) {
            Some(record) => {
                record.properties_mut().seed(name, value.into());
                Ok(())
            }
            None => Err(GraphError::UnknownNode {
                node_id: node.to_string(),
                context: "property target",
            }),
        }
    }

    /// Opts a node in (or out) of fine-grained property mirroring.
    pub fn replicates(&mut self, node: NodeId, replicates: bool) -> Result<(), GraphError> {
        match self.nodes.get_mut(&node) {
            Some(record) => {
                record.set_replicates(replicates);
                Ok(())
            }
            None => Err(GraphError::UnknownNode {
                node_id: node.to_string(),
                context: "replicates target",
            }),
        }
    }

    /// Designates where the flow starts instead of the first base node.
    pub fn entry(&mut self, node: NodeId) -> Result<(), GraphError> {
        if !self.nodes.contains_key(&node) {
            return Err(GraphError::UnknownNode {
                node_id: node.to_string(),
                context: "entry designation",
            });
        }
        if !self.base_nodes.contains(&node) {
            return Err(GraphError::EntryNotBase {
                node_id: node.to_string(),
            });
        }
        self.entry = Some(node);
        Ok(())
    }

    pub fn build(self) -> Graph {
        let entry = self.entry.or_else(|| self.base_nodes.first().copied());
        Graph::new(
            self.id,
            self.name,
            self.nodes,
            self.base_nodes,
            self.manager_fragments,
            entry,
        )
    }
}
