use std::mem;

use log::{trace, warn};

use colloquy_shared::{
    CommandIndex, CommandPacket, Graph, NodeId, Playback, PlaybackCommand, PlaybackEvent,
    PropertyValue, Role, SessionId,
};

/// One hosted playback plus its outgoing command stream.
///
/// Every decision goes through [`Session::issue`]: apply the command to the
/// local copy, then queue the identical packet for observers. The local copy
/// is therefore never ahead of or behind what the mirrors will compute, and
/// the settle loop can read it to make the next decision.
pub(crate) struct Session {
    playback: Playback,
    outbox: Vec<CommandPacket>,
    next_index: CommandIndex,
}

impl Session {
    pub(crate) fn new(id: SessionId, graph: &Graph) -> Self {
        let playback = Playback::new(id, graph, Role::Authority);
        let mut session = Self {
            playback,
            outbox: Vec::new(),
            next_index: 0,
        };
        session.mirror_only(PlaybackCommand::Spawned { graph: graph.id() });
        session
    }

    pub(crate) fn id(&self) -> SessionId {
        self.playback.session()
    }

    pub(crate) fn playback(&self) -> &Playback {
        &self.playback
    }

    pub(crate) fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    // Command stream

    fn enqueue(&mut self, command: PlaybackCommand) {
        let packet = CommandPacket {
            session: self.playback.session(),
            index: self.next_index,
            command,
        };
        self.next_index += 1;
        self.outbox.push(packet);
    }

    /// Applies the command locally and queues it for every observer.
    fn issue(&mut self, command: PlaybackCommand) {
        self.playback.apply(&command);
        self.enqueue(command);
    }

    /// Queues without applying, for commands that carry no host-side state.
    fn mirror_only(&mut self, command: PlaybackCommand) {
        self.enqueue(command);
    }

    pub(crate) fn take_outbox(&mut self) -> Vec<CommandPacket> {
        mem::take(&mut self.outbox)
    }

    pub(crate) fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.playback.receive_events()
    }

    // Host orchestration

    pub(crate) fn start(&mut self) {
        if self.playback.is_started() || self.playback.is_ended() {
            warn!("session {}: start ignored", self.id());
            return;
        }
        self.issue(PlaybackCommand::Started);
        match self.playback.entry() {
            Some(entry) => {
                self.issue(PlaybackCommand::SetCurrentNode { node: Some(entry) });
                self.issue(PlaybackCommand::BeginCurrentNode);
            }
            // nothing to play
            None => self.issue(PlaybackCommand::Ended),
        }
        self.settle();
    }

    pub(crate) fn end(&mut self) {
        if self.playback.is_ended() {
            trace!("session {}: end ignored, already ended", self.id());
            return;
        }
        self.issue(PlaybackCommand::Ended);
        self.playback.clear_signals();
    }

    /// Jumps the flow to the current node's next pick without waiting for
    /// the pending walk. A still-active current node is ended first, so the
    /// skip leaves nothing running behind the flow.
    pub(crate) fn play_next(&mut self) {
        if !self.playback.is_started() || self.playback.is_ended() {
            warn!("session {}: play-next ignored outside a live session", self.id());
            return;
        }
        let current_active = self
            .playback
            .current()
            .map(|id| self.playback.is_node_active(id))
            .unwrap_or(false);
        if current_active {
            // ending the current node raises the signal settle advances on
            self.issue(PlaybackCommand::EndCurrentNode);
        } else {
            self.advance();
        }
        self.settle();
    }

    pub(crate) fn discard(&mut self) {
        self.issue(PlaybackCommand::Discarded);
        self.playback.clear_signals();
    }

    // Local-only node requests. These touch the host copy directly and are
    // not mirrored; only flow that travels through the current node reaches
    // observers. Custom data on replicating nodes still mirrors via
    // [`Session::send_updates`].

    pub(crate) fn request_node_begin(&mut self, node: NodeId) {
        if !self.playback.is_started() || self.playback.is_ended() {
            warn!("session {}: node begin ignored outside a live session", self.id());
            return;
        }
        self.playback.begin_node(node);
        self.settle();
    }

    pub(crate) fn request_node_end(&mut self, node: NodeId) {
        if !self.playback.is_started() || self.playback.is_ended() {
            warn!("session {}: node end ignored outside a live session", self.id());
            return;
        }
        self.playback.end_node(node);
        self.settle();
    }

    pub(crate) fn request_node_pending(&mut self, node: NodeId) {
        if !self.playback.is_started() || self.playback.is_ended() {
            warn!("session {}: node pending ignored outside a live session", self.id());
            return;
        }
        self.playback.mark_node_pending_if_needed(node);
        self.settle();
    }

    pub(crate) fn force_node_pending(&mut self, node: NodeId) {
        if !self.playback.is_started() || self.playback.is_ended() {
            warn!("session {}: node pending ignored outside a live session", self.id());
            return;
        }
        self.playback.mark_node_pending_by_force(node);
        self.settle();
    }

    pub(crate) fn set_node_replicates(&mut self, node: NodeId, replicates: bool) {
        if !self.playback.contains_node(node) {
            warn!(
                "session {}: set-replicates ignored, unknown node {}",
                self.id(),
                node
            );
            return;
        }
        self.issue(PlaybackCommand::SetNodeReplicates { node, replicates });
    }

    pub(crate) fn set_node_property(&mut self, node: NodeId, name: &str, value: PropertyValue) {
        match self.playback.properties_mut(node) {
            Some(properties) => properties.set(name, value),
            None => warn!(
                "session {}: set-property ignored, unknown node {}",
                self.id(),
                node
            ),
        }
    }

    /// Drains dirty properties of replicating active nodes into mirrored
    /// update commands.
    pub(crate) fn send_updates(&mut self) {
        let deltas = self.playback.take_dirty_deltas();
        for (node, delta) in deltas {
            self.issue(PlaybackCommand::UpdateNode { node, delta });
        }
    }

    // Flow settling

    /// Drains control signals until the session is quiet again. A pending
    /// current node is ended; an ended current node hands the flow to the
    /// next pick. Signals from nodes that are not current (manager
    /// fragments, side flows begun by local requests) never move the flow.
    fn settle(&mut self) {
        loop {
            if !self.playback.is_started() || self.playback.is_ended() {
                self.playback.clear_signals();
                return;
            }
            let signals = self.playback.take_signals();
            if signals.is_empty() {
                return;
            }
            let current = self.playback.current();
            for id in signals.pending() {
                if Some(*id) == current && !self.playback.is_node_ended(*id) {
                    self.issue(PlaybackCommand::EndCurrentNode);
                }
            }
            for id in signals.ended() {
                if Some(*id) == current {
                    self.advance();
                }
            }
        }
    }

    /// Moves the flow to the current node's first pick, reloading a node
    /// that already ran this session so its begin fires again. An empty
    /// pick ends the session.
    fn advance(&mut self) {
        let Some(current) = self.playback.current() else {
            self.issue(PlaybackCommand::Ended);
            return;
        };
        let candidates = self.playback.select_next_nodes(current);
        let Some(next) = candidates.first().copied() else {
            self.issue(PlaybackCommand::Ended);
            return;
        };
        if !self.playback.contains_node(next) {
            warn!(
                "session {}: picked next node {} is not in this graph, ending",
                self.id(),
                next
            );
            self.issue(PlaybackCommand::Ended);
            return;
        }
        self.issue(PlaybackCommand::SetCurrentNode { node: Some(next) });
        if self.playback.is_node_begun(next) {
            self.issue(PlaybackCommand::ReloadNode { node: next });
        }
        self.issue(PlaybackCommand::BeginCurrentNode);
    }
}
