use std::fmt;
use std::sync::Arc;

use crate::behavior::{BehaviorKind, NodeBehavior};
use crate::ids::NodeId;
use crate::property::Properties;
use crate::tag::TagSet;

/// One authored node record.
///
/// Base nodes are standalone entries in the playable flow; fragments only
/// exist attached beneath another node. Play never mutates the authored
/// asset: each session duplicates records into its own runtime copies,
/// preserving guids, so the shared behavior instance must hold no
/// per-session state.
#[derive(Clone)]
pub struct Node {
    id: NodeId,
    kind: BehaviorKind,
    behavior: Arc<dyn NodeBehavior>,
    tags: TagSet,
    replicates: bool,
    properties: Properties,
    parent: Option<NodeId>,
    sub_nodes: Vec<NodeId>,
    fragment: bool,
}

impl Node {
    pub(crate) fn new<B: NodeBehavior>(
        id: NodeId,
        behavior: B,
        parent: Option<NodeId>,
        fragment: bool,
    ) -> Self {
        Self {
            id,
            kind: BehaviorKind::of::<B>(),
            behavior: Arc::new(behavior),
            tags: TagSet::new(),
            replicates: false,
            properties: Properties::new(),
            parent,
            sub_nodes: Vec::new(),
            fragment,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> BehaviorKind {
        self.kind
    }

    pub fn behavior_name(&self) -> &'static str {
        self.behavior.name()
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Whether this node opted in to fine-grained property mirroring.
    pub fn replicates(&self) -> bool {
        self.replicates
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct sub-nodes in insertion order. Insertion order is load-bearing:
    /// it decides begin order, end order and selection order everywhere.
    pub fn sub_nodes(&self) -> &[NodeId] {
        &self.sub_nodes
    }

    pub fn is_fragment(&self) -> bool {
        self.fragment
    }

    pub(crate) fn behavior_arc(&self) -> Arc<dyn NodeBehavior> {
        self.behavior.clone()
    }

    pub(crate) fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    pub(crate) fn set_replicates(&mut self, replicates: bool) {
        self.replicates = replicates;
    }

    pub(crate) fn tags_mut(&mut self) -> &mut TagSet {
        &mut self.tags
    }

    pub(crate) fn push_sub_node(&mut self, sub: NodeId) {
        self.sub_nodes.push(sub);
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("behavior", &self.behavior.name())
            .field("fragment", &self.fragment)
            .field("parent", &self.parent)
            .field("sub_nodes", &self.sub_nodes)
            .finish()
    }
}
