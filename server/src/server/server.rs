use std::{collections::HashMap, mem};

use log::{info, warn};

use colloquy_shared::{
    CommandPacket, CommandSender, Graph, NodeId, PropertyValue, SessionId,
};

use crate::error::{ServerError, SpawnError};
use crate::events::Events;
use crate::server::ServerConfig;
use crate::session::{Session, SessionMut, SessionRef};

/// The authority: hosts any number of sessions, makes every flow decision,
/// and mirrors each one to subscribed observers as an ordered command
/// stream. Observers converge because they apply exactly what the host
/// applied, in the order the host applied it.
pub struct Server {
    config: ServerConfig,
    sessions: HashMap<SessionId, Session>,
    subscribers: Vec<Box<dyn CommandSender>>,
    events: Events,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            sessions: HashMap::new(),
            subscribers: Vec::new(),
            events: Events::new(),
        }
    }

    /// Attaches an observer pipe. Every packet from every session goes to
    /// every subscriber; joins mid-stream are not caught up.
    pub fn subscribe(&mut self, sender: Box<dyn CommandSender>) {
        self.subscribers.push(sender);
    }

    // Session lifecycle

    /// Duplicates the graph into a fresh hosted session and mirrors the
    /// spawn. The graph asset itself is read-only source data; the session
    /// owns its own copy of every node.
    pub fn spawn_session(&mut self, graph: &Graph) -> Result<SessionId, SpawnError> {
        if graph.node_count() == 0 {
            return Err(SpawnError::EmptyGraph {
                graph_id: graph.id().to_string(),
            });
        }
        let id = SessionId::new();
        let session = Session::new(id, graph);
        self.sessions.insert(id, session);
        self.events.push_spawn(id);
        self.flush(&id);
        Ok(id)
    }

    pub fn start_session(&mut self, session: &SessionId) {
        match self.sessions.get_mut(session) {
            Some(live) => {
                live.start();
                self.flush(session);
            }
            None => warn!("start ignored, unknown session {}", session),
        }
    }

    pub fn end_session(&mut self, session: &SessionId) {
        match self.sessions.get_mut(session) {
            Some(live) => {
                live.end();
                self.flush(session);
            }
            None => warn!("end ignored, unknown session {}", session),
        }
    }

    /// Skips the flow to the current node's next pick.
    pub fn play_next_node(&mut self, session: &SessionId) {
        match self.sessions.get_mut(session) {
            Some(live) => {
                live.play_next();
                self.flush(session);
            }
            None => warn!("play-next ignored, unknown session {}", session),
        }
    }

    /// Discards a session: force-ends everything still active, mirrors the
    /// discard, and drops the hosted copy. The session's final events are
    /// kept for the next [`Server::receive`].
    pub fn despawn_session(&mut self, session: &SessionId) {
        let Some(mut live) = self.sessions.remove(session) else {
            warn!("despawn ignored, unknown session {}", session);
            return;
        };
        live.discard();
        for event in live.drain_events() {
            self.events.push_playback(*session, event);
        }
        let packets = live.take_outbox();
        self.broadcast(packets);
        self.events.push_despawn(*session);
    }

    // Node-level requests

    pub fn request_node_begin(&mut self, session: &SessionId, node: NodeId) {
        match self.sessions.get_mut(session) {
            Some(live) => {
                live.request_node_begin(node);
                self.flush(session);
            }
            None => warn!("node begin ignored, unknown session {}", session),
        }
    }

    pub fn request_node_end(&mut self, session: &SessionId, node: NodeId) {
        match self.sessions.get_mut(session) {
            Some(live) => {
                live.request_node_end(node);
                self.flush(session);
            }
            None => warn!("node end ignored, unknown session {}", session),
        }
    }

    pub fn request_node_pending(&mut self, session: &SessionId, node: NodeId) {
        match self.sessions.get_mut(session) {
            Some(live) => {
                live.request_node_pending(node);
                self.flush(session);
            }
            None => warn!("node pending ignored, unknown session {}", session),
        }
    }

    pub fn force_node_pending(&mut self, session: &SessionId, node: NodeId) {
        match self.sessions.get_mut(session) {
            Some(live) => {
                live.force_node_pending(node);
                self.flush(session);
            }
            None => warn!("node pending ignored, unknown session {}", session),
        }
    }

    pub fn set_node_replicates(&mut self, session: &SessionId, node: NodeId, replicates: bool) {
        match self.sessions.get_mut(session) {
            Some(live) => {
                live.set_node_replicates(node, replicates);
                self.flush(session);
            }
            None => warn!("set-replicates ignored, unknown session {}", session),
        }
    }

    pub fn set_node_property(
        &mut self,
        session: &SessionId,
        node: NodeId,
        name: &str,
        value: impl Into<PropertyValue>,
    ) {
        match self.sessions.get_mut(session) {
            Some(live) => live.set_node_property(node, name, value.into()),
            None => warn!("set-property ignored, unknown session {}", session),
        }
    }

    /// Mirrors dirty properties of replicating active nodes, across all
    /// sessions. Call once per update, after gameplay writes.
    pub fn send_updates(&mut self) {
        let session_ids: Vec<SessionId> = self.sessions.keys().copied().collect();
        for id in session_ids {
            if let Some(live) = self.sessions.get_mut(&id) {
                live.send_updates();
            }
            self.flush(&id);
        }
    }

    // Events

    /// Drains every session's buffered notifications into one `Events`
    /// batch and hands it over.
    pub fn receive(&mut self) -> Events {
        let session_ids: Vec<SessionId> = self.sessions.keys().copied().collect();
        for id in session_ids {
            if let Some(live) = self.sessions.get_mut(&id) {
                for event in live.drain_events() {
                    self.events.push_playback(id, event);
                }
            }
        }
        mem::replace(&mut self.events, Events::new())
    }

    // Access

    pub fn session(&self, session: &SessionId) -> Option<SessionRef> {
        self.sessions.get(session).map(SessionRef::new)
    }

    pub fn session_mut(&mut self, session: &SessionId) -> Option<SessionMut> {
        if self.sessions.contains_key(session) {
            let id = *session;
            return Some(SessionMut::new(self, id));
        }
        None
    }

    pub fn has_session(&self, session: &SessionId) -> bool {
        self.sessions.contains_key(session)
    }

    pub fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.keys().copied().collect()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    // Outbox

    fn flush(&mut self, session: &SessionId) {
        let Some(live) = self.sessions.get_mut(session) else {
            return;
        };
        let packets = live.take_outbox();
        self.broadcast(packets);
    }

    fn broadcast(&mut self, packets: Vec<CommandPacket>) {
        for packet in packets {
            if self.config.log_commands {
                info!(
                    "session {}: mirror #{} {:?}",
                    packet.session, packet.index, packet.command
                );
            }
            for subscriber in &self.subscribers {
                if let Err(error) = subscriber.send(&packet) {
                    self.events.push_error(ServerError::Send(error));
                }
            }
        }
    }
}
