use log::warn;

use crate::ids::NodeId;
use crate::playback::Playback;
use crate::property::PropertyValue;
use crate::tag::Tag;

/// Mutable hook context: the node a hook fires for, plus the sanctioned ways
/// to influence the playback it lives in.
///
/// Downward transitions (beginning and ending the node's own sub-nodes) and
/// the node's own end request are the only mutations a hook can perform.
pub struct BehaviorCtx<'p> {
    playback: &'p mut Playback,
    node: NodeId,
}

impl<'p> BehaviorCtx<'p> {
    pub(crate) fn new(playback: &'p mut Playback, node: NodeId) -> Self {
        Self { playback, node }
    }

    /// The node this hook fires for.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Read-only view of the whole playback, for queries and searches.
    pub fn playback(&self) -> &Playback {
        self.playback
    }

    /// The node's sub-nodes in insertion order, as an owned snapshot so it
    /// can be walked while transitioning.
    pub fn sub_nodes(&self) -> Vec<NodeId> {
        self.playback.sub_nodes(self.node).to_vec()
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.playback
            .properties(self.node)
            .and_then(|props| props.get(name))
    }

    /// Writes one of the node's own properties. On the host this marks the
    /// value for mirroring if the node replicates.
    pub fn set_property(&mut self, name: &str, value: impl Into<PropertyValue>) {
        if let Some(props) = self.playback.properties_mut(self.node) {
            props.set(name, value);
        }
    }

    pub fn has_tag(&self, tag: &Tag, exact: bool) -> bool {
        self.playback
            .node_tags(self.node)
            .map(|tags| tags.has(tag, exact))
            .unwrap_or(false)
    }

    /// Begins every sub-node in insertion order.
    pub fn begin_sub_nodes(&mut self) {
        for sub in self.sub_nodes() {
            self.playback.begin_node(sub);
        }
    }

    /// Ends every sub-node in insertion order.
    pub fn end_sub_nodes(&mut self) {
        for sub in self.sub_nodes() {
            self.playback.end_node(sub);
        }
    }

    /// Begins one direct sub-node. Anything else is refused: hooks only ever
    /// reach downward.
    pub fn begin_sub_node(&mut self, sub: NodeId) {
        if self.playback.parent(sub) != Some(self.node) {
            warn!(
                "begin refused: node {} is not a direct sub-node of {}",
                sub, self.node
            );
            return;
        }
        self.playback.begin_node(sub);
    }

    /// Ends one direct sub-node.
    pub fn end_sub_node(&mut self, sub: NodeId) {
        if self.playback.parent(sub) != Some(self.node) {
            warn!(
                "end refused: node {} is not a direct sub-node of {}",
                sub, self.node
            );
            return;
        }
        self.playback.end_node(sub);
    }

    /// Asks the engine to end this node once the current hook returns to it.
    pub fn request_self_end(&mut self) {
        self.playback.end_node(self.node);
    }
}

/// Read-only decision context handed to
/// [`can_mark_pending`](crate::NodeBehavior::can_mark_pending) and
/// [`select_next`](crate::NodeBehavior::select_next).
pub struct GraphView<'p> {
    playback: &'p Playback,
    node: NodeId,
}

impl<'p> GraphView<'p> {
    pub(crate) fn new(playback: &'p Playback, node: NodeId) -> Self {
        Self { playback, node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn playback(&self) -> &Playback {
        self.playback
    }

    pub fn sub_nodes(&self) -> &[NodeId] {
        self.playback.sub_nodes(self.node)
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.playback
            .properties(self.node)
            .and_then(|props| props.get(name))
    }

    pub fn is_pending(&self, node: NodeId) -> bool {
        self.playback.is_node_pending(node)
    }

    /// Dispatches `select_next` on one sub-node, for delegating selectors.
    pub fn select_next_of(&self, sub: NodeId) -> Vec<NodeId> {
        self.playback.select_next_nodes(sub)
    }
}
