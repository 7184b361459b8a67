//! # Playback
//!
//! The per-participant runtime for one session: a duplicated copy of the
//! authored graph plus all live state. The host and every observer each own
//! one `Playback` per session, built from the same asset, and converge by
//! feeding the same command stream through [`Playback::apply`].
//!
//! ## Node lifecycle
//!
//! | state  | begun | ended | pending |
//! |--------|-------|-------|---------|
//! | idle   | no    | no    | no      |
//! | active | yes   | no    | either  |
//! | ended  | yes   | yes   | yes     |
//!
//! `pending` is a sub-state of active meaning "done influencing the flow".
//! An ended node counts as pending, which is what lets a parent's predicate
//! settle over children that never satisfied it on their own. Flags only
//! move forward; the one way back to idle is a mirrored reload.
//!
//! ## Transition order
//!
//! Every transition updates flags first, then buffers its notification, then
//! runs the behavior hooks (pre, then post). Ending also marks the node
//! pending, and parentless nodes raise base-level control signals; the
//! pending walk is the only path that travels up the tree.

pub(crate) mod event;
pub(crate) mod search;


pub use event::*;

use std::collections::HashMap;

use log::{trace, warn};

use crate::behavior::BehaviorCtx;
use crate::command::PlaybackCommand;
use crate::graph::{Graph, Node};
use crate::ids::{GraphId, NodeId, SessionId};
use crate::property::{NodeDelta, Properties};
use crate::types::Role;

pub(crate) struct NodeState {
    pub(crate) node: Node,
    pub(crate) begun: bool,
    pub(crate) ended: bool,
    pub(crate) pending: bool,
}

impl NodeState {
    fn new(node: Node) -> Self {
        Self {
            node,
            begun: false,
            ended: false,
            pending: false,
        }
    }
}

/// Base-level lifecycle signals raised by parentless nodes, the only thing
/// that ever travels out of the node tree. The host drains and acts on
/// them; observers clear them unread and converge through mirrored commands.
#[derive(Debug, Default)]
pub struct ControlSignals {
    pending: Vec<NodeId>,
    ended: Vec<NodeId>,
}

impl ControlSignals {
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.ended.is_empty()
    }

    /// Parentless nodes that went pending, in order.
    pub fn pending(&self) -> &[NodeId] {
        &self.pending
    }

    /// Parentless nodes that ended, in order.
    pub fn ended(&self) -> &[NodeId] {
        &self.ended
    }
}

/// One participant's live copy of a session.
pub struct Playback {
    session: SessionId,
    graph: GraphId,
    role: Role,
    nodes: HashMap<NodeId, NodeState>,
    base_nodes: Vec<NodeId>,
    manager_fragments: Vec<NodeId>,
    entry: Option<NodeId>,
    current: Option<NodeId>,
    started: bool,
    ended: bool,
    known_active: Vec<NodeId>,
    events: Vec<PlaybackEvent>,
    signals: ControlSignals,
}

impl Playback {
    /// Duplicates the authored graph into a fresh runtime copy: same guids,
    /// same insertion orders, every lifecycle flag reset.
    pub fn new(session: SessionId, graph: &Graph, role: Role) -> Self {
        let mut nodes = HashMap::with_capacity(graph.node_count());
        for node in graph.iter_nodes() {
            nodes.insert(node.id(), NodeState::new(node.clone()));
        }
        Self {
            session,
            graph: graph.id(),
            role,
            nodes,
            base_nodes: graph.base_nodes().to_vec(),
            manager_fragments: graph.manager_fragments().to_vec(),
            entry: graph.entry(),
            current: None,
            started: false,
            ended: false,
            known_active: Vec::new(),
            events: Vec::new(),
            signals: ControlSignals::default(),
        }
    }

    // Session-level accessors

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn graph_id(&self) -> GraphId {
        self.graph
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// The base node the flow is at, if any.
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    pub fn entry(&self) -> Option<NodeId> {
        self.entry
    }

    /// Every node that has begun and not yet ended, oldest first.
    pub fn known_active(&self) -> &[NodeId] {
        &self.known_active
    }

    // Transitions

    /// Begins a node: marks it begun, buffers the begin notification, then
    /// runs its hooks. Already-begun and unknown nodes are logged no-ops.
    pub fn begin_node(&mut self, id: NodeId) {
        let behavior = match self.nodes.get_mut(&id) {
            Some(state) => {
                if state.begun {
                    trace!(
                        "session {}: begin ignored, node {} already begun",
                        self.session,
                        id
                    );
                    return;
                }
                state.begun = true;
                state.node.behavior_arc()
            }
            None => {
                warn!("session {}: begin ignored, unknown node {}", self.session, id);
                return;
            }
        };
        self.known_active.push(id);
        self.events.push(PlaybackEvent::NodeBegan { node: id });
        let mut ctx = BehaviorCtx::new(self, id);
        behavior.pre_begin(&mut ctx);
        behavior.post_begin(&mut ctx);
    }

    /// Ends a node: marks it ended, buffers the end notification, runs its
    /// hooks, then marks it pending. Never-begun, already-ended and unknown
    /// nodes are logged no-ops.
    pub fn end_node(&mut self, id: NodeId) {
        let behavior = match self.nodes.get_mut(&id) {
            Some(state) => {
                if !state.begun {
                    trace!(
                        "session {}: end ignored, node {} never begun",
                        self.session,
                        id
                    );
                    return;
                }
                if state.ended {
                    trace!(
                        "session {}: end ignored, node {} already ended",
                        self.session,
                        id
                    );
                    return;
                }
                state.ended = true;
                state.node.behavior_arc()
            }
            None => {
                warn!("session {}: end ignored, unknown node {}", self.session, id);
                return;
            }
        };
        self.known_active.retain(|active| *active != id);
        self.events.push(PlaybackEvent::NodeEnded { node: id });
        {
            let mut ctx = BehaviorCtx::new(self, id);
            behavior.pre_end(&mut ctx);
            behavior.post_end(&mut ctx);
        }
        // An ended node counts as pending from here on; this wakes the
        // parent's predicate even when the node never satisfied it itself.
        self.mark_node_pending_by_force(id);
        if self.parent(id).is_none() {
            self.signals.ended.push(id);
        }
    }

    /// Re-evaluates the node's pending predicate and, on first satisfaction,
    /// marks it pending, notifies once, then walks the question up to the
    /// parent. Parentless nodes raise a base-level signal instead.
    pub fn mark_node_pending_if_needed(&mut self, id: NodeId) {
        self.mark_pending(id, false);
    }

    /// Marks pending without consulting the predicate.
    pub fn mark_node_pending_by_force(&mut self, id: NodeId) {
        self.mark_pending(id, true);
    }

    fn mark_pending(&mut self, id: NodeId, force: bool) {
        let (behavior, parent) = match self.nodes.get(&id) {
            Some(state) => {
                if !state.begun {
                    trace!(
                        "session {}: pending ignored, node {} not begun",
                        self.session,
                        id
                    );
                    return;
                }
                if state.pending {
                    // the pending notification never repeats
                    return;
                }
                (state.node.behavior_arc(), state.node.parent())
            }
            None => {
                warn!(
                    "session {}: pending ignored, unknown node {}",
                    self.session, id
                );
                return;
            }
        };
        if !force {
            let view = crate::behavior::GraphView::new(self, id);
            if !behavior.can_mark_pending(&view) {
                return;
            }
        }
        if let Some(state) = self.nodes.get_mut(&id) {
            state.pending = true;
        }
        self.events.push(PlaybackEvent::NodePending { node: id });
        {
            let mut ctx = BehaviorCtx::new(self, id);
            behavior.pre_pending(&mut ctx);
            behavior.post_pending(&mut ctx);
        }
        match parent {
            Some(parent) => self.mark_node_pending_if_needed(parent),
            None => self.signals.pending.push(id),
        }
    }

    fn reload_node(&mut self, id: NodeId) {
        if !self.nodes.contains_key(&id) {
            warn!("session {}: reload ignored, unknown node {}", self.session, id);
            return;
        }
        self.reload_subtree(id);
    }

    fn reload_subtree(&mut self, id: NodeId) {
        let subs = match self.nodes.get_mut(&id) {
            Some(state) => {
                state.begun = false;
                state.ended = false;
                state.pending = false;
                state.node.sub_nodes().to_vec()
            }
            None => return,
        };
        self.known_active.retain(|active| *active != id);
        self.events.push(PlaybackEvent::NodeReloaded { node: id });
        for sub in subs {
            self.reload_subtree(sub);
        }
    }

    /// Ends every known-active node, oldest first. Reload is unreachable
    /// from hooks, so each node ends at most once and the drain terminates.
    pub fn force_end_all_active(&mut self) {
        while let Some(id) = self.known_active.first().copied() {
            self.end_node(id);
        }
    }

    // Command application

    /// Applies one mirrored command. This is the only mutation path
    /// observers have, and the host routes its own decisions through the
    /// same code, so identical inputs yield identical state on every
    /// machine. Commands that no longer make sense here degrade to logged
    /// no-ops rather than guesses.
    pub fn apply(&mut self, command: &PlaybackCommand) {
        match command {
            PlaybackCommand::Spawned { .. } => {
                // session tables are endpoint concerns
            }
            PlaybackCommand::Started => self.apply_started(),
            PlaybackCommand::SetCurrentNode { node } => self.apply_set_current(*node),
            PlaybackCommand::BeginCurrentNode => self.apply_begin_current(),
            PlaybackCommand::EndCurrentNode => self.apply_end_current(),
            PlaybackCommand::ReloadNode { node } => self.reload_node(*node),
            PlaybackCommand::SetNodeReplicates { node, replicates } => {
                self.apply_set_replicates(*node, *replicates)
            }
            PlaybackCommand::UpdateNode { node, delta } => self.apply_update(*node, delta),
            PlaybackCommand::Ended => self.apply_ended(),
            PlaybackCommand::Discarded => {
                self.force_end_all_active();
                self.ended = true;
            }
        }
    }

    fn apply_started(&mut self) {
        if self.ended {
            warn!("session {}: start refused, already ended", self.session);
            return;
        }
        if self.started {
            trace!("session {}: start ignored, already started", self.session);
            return;
        }
        self.started = true;
        self.events.push(PlaybackEvent::SessionStarted);
        let fragments = self.manager_fragments.clone();
        for fragment in fragments {
            self.begin_node(fragment);
        }
    }

    fn apply_set_current(&mut self, node: Option<NodeId>) {
        if !self.started || self.ended {
            warn!(
                "session {}: set-current ignored outside a live session",
                self.session
            );
            return;
        }
        if let Some(id) = node {
            if !self.nodes.contains_key(&id) {
                warn!(
                    "session {}: set-current ignored, unknown node {}",
                    self.session, id
                );
                return;
            }
        }
        if self.current == node {
            return;
        }
        self.current = node;
        self.events.push(PlaybackEvent::CurrentNodeChanged { node });
    }

    fn apply_begin_current(&mut self) {
        if !self.started || self.ended {
            warn!(
                "session {}: begin-current ignored outside a live session",
                self.session
            );
            return;
        }
        match self.current {
            Some(id) => self.begin_node(id),
            None => warn!(
                "session {}: begin-current ignored, no current node",
                self.session
            ),
        }
    }

    fn apply_end_current(&mut self) {
        if !self.started || self.ended {
            warn!(
                "session {}: end-current ignored outside a live session",
                self.session
            );
            return;
        }
        match self.current {
            Some(id) => self.end_node(id),
            None => warn!(
                "session {}: end-current ignored, no current node",
                self.session
            ),
        }
    }

    fn apply_set_replicates(&mut self, id: NodeId, replicates: bool) {
        match self.nodes.get_mut(&id) {
            Some(state) => state.node.set_replicates(replicates),
            None => warn!(
                "session {}: set-replicates ignored, unknown node {}",
                self.session, id
            ),
        }
    }

    fn apply_update(&mut self, id: NodeId, delta: &NodeDelta) {
        match self.nodes.get_mut(&id) {
            Some(state) => {
                state.node.properties_mut().apply_delta(delta);
                self.events.push(PlaybackEvent::NodeUpdated { node: id });
            }
            None => warn!(
                "session {}: update ignored, unknown node {}",
                self.session, id
            ),
        }
    }

    fn apply_ended(&mut self) {
        if self.ended {
            trace!("session {}: end ignored, already ended", self.session);
            return;
        }
        self.ended = true;
        self.force_end_all_active();
        self.events.push(PlaybackEvent::SessionEnded);
    }

    // Buffers

    /// Drains buffered notifications in the order they happened.
    pub fn receive_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Drains base-level control signals. Only the host acts on these.
    pub fn take_signals(&mut self) -> ControlSignals {
        std::mem::take(&mut self.signals)
    }

    /// Observers never act on flow signals; they converge through mirrored
    /// commands instead.
    pub fn clear_signals(&mut self) {
        self.signals = ControlSignals::default();
    }

    // Properties

    /// Host-side write access to a node's live property map. Writing to an
    /// observer's copy only desynchronizes it; observers converge through
    /// mirrored deltas.
    pub fn properties_mut(&mut self, node: NodeId) -> Option<&mut Properties> {
        self.nodes
            .get_mut(&node)
            .map(|state| state.node.properties_mut())
    }

    /// Drains dirty properties of every replicating active node into
    /// mirrorable deltas, in active order.
    pub fn take_dirty_deltas(&mut self) -> Vec<(NodeId, NodeDelta)> {
        let mut deltas = Vec::new();
        let actives = self.known_active.clone();
        for id in actives {
            let Some(state) = self.nodes.get_mut(&id) else {
                continue;
            };
            if !state.node.replicates() {
                continue;
            }
            if let Some(delta) = state.node.properties_mut().take_delta() {
                deltas.push((id, delta));
            }
        }
        deltas
    }
}
