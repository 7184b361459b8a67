use std::{collections::HashMap, mem, sync::Arc};

use log::{info, warn};

use colloquy_shared::{
    CommandIndex, CommandPacket, CommandReceiver, Graph, GraphId, Playback, PlaybackCommand,
    Role, SessionId,
};

use crate::client_config::ClientConfig;
use crate::error::ClientError;
use crate::events::Events;
use crate::registry::GraphRegistry;

/// An observer: applies the authority's command stream to local mirrors and
/// reports the resulting notifications. It never originates a transition,
/// never runs flow selection, and drops anything it cannot resolve locally
/// rather than guessing.
pub struct Client {
    config: ClientConfig,
    registry: GraphRegistry,
    playbacks: HashMap<SessionId, Playback>,
    last_index: HashMap<SessionId, CommandIndex>,
    events: Events,
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            registry: GraphRegistry::new(),
            playbacks: HashMap::new(),
            last_index: HashMap::new(),
            events: Events::new(),
        }
    }

    /// Makes a graph asset available for mirroring. Must happen before the
    /// spawn command for any session playing this graph arrives.
    pub fn register_graph(&mut self, graph: &Arc<Graph>) {
        self.registry.insert(graph);
    }

    pub fn registry(&self) -> &GraphRegistry {
        &self.registry
    }

    // Command intake

    /// Pulls packets from the receiver until it runs dry, applying each in
    /// arrival order. Returns how many packets were applied. A dead stream
    /// is reported once through the event queue.
    pub fn process_all(&mut self, receiver: &mut dyn CommandReceiver) -> usize {
        let mut applied = 0;
        loop {
            match receiver.receive() {
                Ok(Some(packet)) => {
                    self.process_packet(packet);
                    applied += 1;
                }
                Ok(None) => return applied,
                Err(error) => {
                    self.events.push_error(ClientError::Recv(error));
                    return applied;
                }
            }
        }
    }

    /// Applies one packet to the matching mirror.
    pub fn process_packet(&mut self, packet: CommandPacket) {
        if self.config.log_commands {
            info!(
                "session {}: apply #{} {:?}",
                packet.session, packet.index, packet.command
            );
        }
        self.check_index(&packet);
        match &packet.command {
            PlaybackCommand::Spawned { graph } => self.spawn_mirror(packet.session, *graph),
            PlaybackCommand::Discarded => self.discard_mirror(packet.session),
            _ => {
                let Some(playback) = self.playbacks.get_mut(&packet.session) else {
                    warn!(
                        "session {}: command dropped, no mirror on this client",
                        packet.session
                    );
                    return;
                };
                playback.apply(&packet.command);
                // observers never act on flow signals
                playback.clear_signals();
            }
        }
    }

    /// The transport promises ordered delivery; a hole in the index stream
    /// means that promise broke upstream. Log it and keep applying, since
    /// refusing later packets only widens the divergence.
    fn check_index(&mut self, packet: &CommandPacket) {
        let expected = match self.last_index.get(&packet.session) {
            Some(last) => last + 1,
            None => 0,
        };
        if packet.index != expected {
            warn!(
                "session {}: command #{} arrived, expected #{}",
                packet.session, packet.index, expected
            );
        }
        self.last_index.insert(packet.session, packet.index);
    }

    fn spawn_mirror(&mut self, session: SessionId, graph: GraphId) {
        if self.playbacks.contains_key(&session) {
            warn!("session {}: spawn dropped, mirror already exists", session);
            return;
        }
        let Some(asset) = self.registry.get(&graph) else {
            warn!(
                "session {}: spawn dropped, graph {} is not registered",
                session, graph
            );
            return;
        };
        let playback = Playback::new(session, &asset, Role::Observer);
        self.playbacks.insert(session, playback);
        self.events.push_spawn(session);
    }

    fn discard_mirror(&mut self, session: SessionId) {
        let Some(mut playback) = self.playbacks.remove(&session) else {
            warn!("session {}: discard dropped, no mirror on this client", session);
            return;
        };
        playback.apply(&PlaybackCommand::Discarded);
        playback.clear_signals();
        for event in playback.receive_events() {
            self.events.push_playback(session, event);
        }
        self.last_index.remove(&session);
        self.events.push_despawn(session);
    }

    // Events

    /// Drains every mirror's buffered notifications into one `Events` batch
    /// and hands it over.
    pub fn receive(&mut self) -> Events {
        let session_ids: Vec<SessionId> = self.playbacks.keys().copied().collect();
        for id in session_ids {
            if let Some(playback) = self.playbacks.get_mut(&id) {
                for event in playback.receive_events() {
                    self.events.push_playback(id, event);
                }
            }
        }
        mem::replace(&mut self.events, Events::new())
    }

    // Access

    pub fn session(&self, session: &SessionId) -> Option<&Playback> {
        self.playbacks.get(session)
    }

    pub fn has_session(&self, session: &SessionId) -> bool {
        self.playbacks.contains_key(session)
    }

    pub fn session_ids(&self) -> Vec<SessionId> {
        self.playbacks.keys().copied().collect()
    }

    pub fn session_count(&self) -> usize {
        self.playbacks.len()
    }
}
