//! Read-only queries: lifecycle flags, hierarchy walks and the fragment
//! search family. Fragment searches scan a node's sub-nodes in insertion
//! order; `_in_hierarchy` variants recurse depth-first and the first match
//! wins.

use log::warn;

use crate::behavior::{BehaviorKind, GraphView, NodeBehavior};
use crate::graph::Node;
use crate::ids::NodeId;
use crate::playback::Playback;
use crate::property::Properties;
use crate::tag::{Tag, TagSet};

impl Playback {
    fn authored(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id).map(|state| &state.node)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // Lifecycle flags

    pub fn is_node_begun(&self, id: NodeId) -> bool {
        self.nodes.get(&id).map(|state| state.begun).unwrap_or(false)
    }

    pub fn is_node_ended(&self, id: NodeId) -> bool {
        self.nodes.get(&id).map(|state| state.ended).unwrap_or(false)
    }

    pub fn is_node_pending(&self, id: NodeId) -> bool {
        self.nodes
            .get(&id)
            .map(|state| state.pending)
            .unwrap_or(false)
    }

    /// Begun and not yet ended.
    pub fn is_node_active(&self, id: NodeId) -> bool {
        self.nodes
            .get(&id)
            .map(|state| state.begun && !state.ended)
            .unwrap_or(false)
    }

    // Node record accessors

    pub fn sub_nodes(&self, id: NodeId) -> &[NodeId] {
        self.authored(id).map(|node| node.sub_nodes()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.authored(id).and_then(|node| node.parent())
    }

    pub fn properties(&self, id: NodeId) -> Option<&Properties> {
        self.authored(id).map(|node| node.properties())
    }

    pub fn node_tags(&self, id: NodeId) -> Option<&TagSet> {
        self.authored(id).map(|node| node.tags())
    }

    pub fn node_replicates(&self, id: NodeId) -> bool {
        self.authored(id)
            .map(|node| node.replicates())
            .unwrap_or(false)
    }

    pub fn node_kind(&self, id: NodeId) -> Option<BehaviorKind> {
        self.authored(id).map(|node| node.kind())
    }

    pub fn node_behavior_name(&self, id: NodeId) -> Option<&'static str> {
        self.authored(id).map(|node| node.behavior_name())
    }

    pub fn is_fragment(&self, id: NodeId) -> bool {
        self.authored(id)
            .map(|node| node.is_fragment())
            .unwrap_or(false)
    }

    /// A standalone entry in the playable flow.
    pub fn is_base_node(&self, id: NodeId) -> bool {
        self.authored(id)
            .map(|node| !node.is_fragment() && node.parent().is_none())
            .unwrap_or(false)
    }

    /// A fragment whose chain roots at the graph itself rather than under a
    /// base node.
    pub fn is_manager_fragment(&self, id: NodeId) -> bool {
        if !self.is_fragment(id) {
            return false;
        }
        match self.parentmost(id) {
            Some(root) => self.is_fragment(root),
            None => false,
        }
    }

    // Hierarchy walks

    /// The top of the node's parent chain; the node itself when parentless.
    pub fn parentmost(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = self.authored(id)?;
        while let Some(parent) = cursor.parent() {
            match self.authored(parent) {
                Some(node) => cursor = node,
                None => break,
            }
        }
        Some(cursor.id())
    }

    /// Every ancestor, closest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cursor = self.parent(id);
        while let Some(parent) = cursor {
            chain.push(parent);
            cursor = self.parent(parent);
        }
        chain
    }

    // Fragment searches

    pub fn fragments(&self, parent: NodeId) -> Vec<NodeId> {
        self.sub_nodes(parent).to_vec()
    }

    pub fn fragments_in_hierarchy(&self, parent: NodeId) -> Vec<NodeId> {
        self.find_all(parent, true, &|_| true)
    }

    pub fn fragment_with_tag(&self, parent: NodeId, tag: &Tag, exact: bool) -> Option<NodeId> {
        self.find_first(parent, false, &|node| node.tags().has(tag, exact))
    }

    pub fn fragments_with_tag(&self, parent: NodeId, tag: &Tag, exact: bool) -> Vec<NodeId> {
        self.find_all(parent, false, &|node| node.tags().has(tag, exact))
    }

    pub fn fragment_with_tag_in_hierarchy(
        &self,
        parent: NodeId,
        tag: &Tag,
        exact: bool,
    ) -> Option<NodeId> {
        self.find_first(parent, true, &|node| node.tags().has(tag, exact))
    }

    pub fn fragments_with_tag_in_hierarchy(
        &self,
        parent: NodeId,
        tag: &Tag,
        exact: bool,
    ) -> Vec<NodeId> {
        self.find_all(parent, true, &|node| node.tags().has(tag, exact))
    }

    pub fn fragment_with_any_tags(
        &self,
        parent: NodeId,
        query: &TagSet,
        exact: bool,
    ) -> Option<NodeId> {
        self.find_first(parent, false, &|node| node.tags().has_any(query, exact))
    }

    pub fn fragments_with_any_tags(
        &self,
        parent: NodeId,
        query: &TagSet,
        exact: bool,
    ) -> Vec<NodeId> {
        self.find_all(parent, false, &|node| node.tags().has_any(query, exact))
    }

    pub fn fragment_with_any_tags_in_hierarchy(
        &self,
        parent: NodeId,
        query: &TagSet,
        exact: bool,
    ) -> Option<NodeId> {
        self.find_first(parent, true, &|node| node.tags().has_any(query, exact))
    }

    pub fn fragments_with_any_tags_in_hierarchy(
        &self,
        parent: NodeId,
        query: &TagSet,
        exact: bool,
    ) -> Vec<NodeId> {
        self.find_all(parent, true, &|node| node.tags().has_any(query, exact))
    }

    pub fn fragment_with_all_tags(
        &self,
        parent: NodeId,
        query: &TagSet,
        exact: bool,
    ) -> Option<NodeId> {
        self.find_first(parent, false, &|node| node.tags().has_all(query, exact))
    }

    pub fn fragments_with_all_tags(
        &self,
        parent: NodeId,
        query: &TagSet,
        exact: bool,
    ) -> Vec<NodeId> {
        self.find_all(parent, false, &|node| node.tags().has_all(query, exact))
    }

    pub fn fragment_with_all_tags_in_hierarchy(
        &self,
        parent: NodeId,
        query: &TagSet,
        exact: bool,
    ) -> Option<NodeId> {
        self.find_first(parent, true, &|node| node.tags().has_all(query, exact))
    }

    pub fn fragments_with_all_tags_in_hierarchy(
        &self,
        parent: NodeId,
        query: &TagSet,
        exact: bool,
    ) -> Vec<NodeId> {
        self.find_all(parent, true, &|node| node.tags().has_all(query, exact))
    }

    pub fn fragment_with_guid(&self, parent: NodeId, guid: NodeId) -> Option<NodeId> {
        self.find_first(parent, false, &|node| node.id() == guid)
    }

    pub fn fragment_with_guid_in_hierarchy(
        &self,
        parent: NodeId,
        guid: NodeId,
    ) -> Option<NodeId> {
        self.find_first(parent, true, &|node| node.id() == guid)
    }

    pub fn fragment_of_kind<B: NodeBehavior>(&self, parent: NodeId) -> Option<NodeId> {
        let kind = BehaviorKind::of::<B>();
        self.find_first(parent, false, &|node| node.kind() == kind)
    }

    pub fn fragments_of_kind<B: NodeBehavior>(&self, parent: NodeId) -> Vec<NodeId> {
        let kind = BehaviorKind::of::<B>();
        self.find_all(parent, false, &|node| node.kind() == kind)
    }

    pub fn fragment_of_kind_in_hierarchy<B: NodeBehavior>(
        &self,
        parent: NodeId,
    ) -> Option<NodeId> {
        let kind = BehaviorKind::of::<B>();
        self.find_first(parent, true, &|node| node.kind() == kind)
    }

    pub fn fragments_of_kind_in_hierarchy<B: NodeBehavior>(&self, parent: NodeId) -> Vec<NodeId> {
        let kind = BehaviorKind::of::<B>();
        self.find_all(parent, true, &|node| node.kind() == kind)
    }

    fn find_first(
        &self,
        parent: NodeId,
        recursive: bool,
        matches: &dyn Fn(&Node) -> bool,
    ) -> Option<NodeId> {
        let mut found = Vec::new();
        self.collect_fragments(parent, recursive, true, matches, &mut found);
        found.into_iter().next()
    }

    fn find_all(
        &self,
        parent: NodeId,
        recursive: bool,
        matches: &dyn Fn(&Node) -> bool,
    ) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.collect_fragments(parent, recursive, false, matches, &mut found);
        found
    }

    fn collect_fragments(
        &self,
        parent: NodeId,
        recursive: bool,
        first_only: bool,
        matches: &dyn Fn(&Node) -> bool,
        found: &mut Vec<NodeId>,
    ) {
        for sub in self.sub_nodes(parent) {
            if let Some(node) = self.authored(*sub) {
                if matches(node) {
                    found.push(*sub);
                    if first_only {
                        return;
                    }
                }
            }
            if recursive {
                self.collect_fragments(*sub, recursive, first_only, matches, found);
                if first_only && !found.is_empty() {
                    return;
                }
            }
        }
    }

    // Selection

    /// Dispatches the node's selector. Hosts act on the answer to move the
    /// flow; calling this is side-effect free everywhere.
    pub fn select_next_nodes(&self, id: NodeId) -> Vec<NodeId> {
        match self.authored(id) {
            Some(node) => {
                let behavior = node.behavior_arc();
                let view = GraphView::new(self, id);
                behavior.select_next(&view)
            }
            None => {
                warn!(
                    "session {}: select-next ignored, unknown node {}",
                    self.session, id
                );
                Vec::new()
            }
        }
    }
}
