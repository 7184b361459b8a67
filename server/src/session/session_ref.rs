use colloquy_shared::{NodeId, Playback, Properties, PropertyValue, SessionId};

use crate::server::Server;
use crate::session::Session;

// SessionRef

/// Read access to one hosted session.
pub struct SessionRef<'s> {
    session: &'s Session,
}

impl<'s> SessionRef<'s> {
    pub(crate) fn new(session: &'s Session) -> Self {
        Self { session }
    }

    pub fn id(&self) -> SessionId {
        self.session.id()
    }

    pub fn is_started(&self) -> bool {
        self.session.playback().is_started()
    }

    pub fn is_ended(&self) -> bool {
        self.session.playback().is_ended()
    }

    pub fn current(&self) -> Option<NodeId> {
        self.session.playback().current()
    }

    pub fn known_active(&self) -> &[NodeId] {
        self.session.playback().known_active()
    }

    pub fn properties(&self, node: NodeId) -> Option<&Properties> {
        self.session.playback().properties(node)
    }

    /// The full host-side copy, for lifecycle and hierarchy queries.
    pub fn playback(&self) -> &Playback {
        self.session.playback()
    }
}

// SessionMut

/// Write access to one hosted session. Every method routes through the
/// server so decisions settle and mirror before the borrow is released.
pub struct SessionMut<'s> {
    server: &'s mut Server,
    id: SessionId,
}

impl<'s> SessionMut<'s> {
    pub(crate) fn new(server: &'s mut Server, id: SessionId) -> Self {
        Self { server, id }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn start(&mut self) -> &mut Self {
        self.server.start_session(&self.id);
        self
    }

    pub fn end(&mut self) -> &mut Self {
        self.server.end_session(&self.id);
        self
    }

    pub fn play_next(&mut self) -> &mut Self {
        self.server.play_next_node(&self.id);
        self
    }

    pub fn begin_node(&mut self, node: NodeId) -> &mut Self {
        self.server.request_node_begin(&self.id, node);
        self
    }

    pub fn end_node(&mut self, node: NodeId) -> &mut Self {
        self.server.request_node_end(&self.id, node);
        self
    }

    pub fn mark_node_pending(&mut self, node: NodeId) -> &mut Self {
        self.server.request_node_pending(&self.id, node);
        self
    }

    pub fn force_node_pending(&mut self, node: NodeId) -> &mut Self {
        self.server.force_node_pending(&self.id, node);
        self
    }

    pub fn set_node_replicates(&mut self, node: NodeId, replicates: bool) -> &mut Self {
        self.server.set_node_replicates(&self.id, node, replicates);
        self
    }

    pub fn set_property(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> &mut Self {
        self.server.set_node_property(&self.id, node, name, value);
        self
    }
}
