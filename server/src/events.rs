use std::{mem, vec::IntoIter};

use colloquy_shared::{NodeId, PlaybackEvent, SessionId};

use crate::error::ServerError;

/// Buffered server-side happenings, drained once per update via
/// [`Events::read`]. Node-level entries carry the session they belong to
/// because one server hosts many sessions at once.
pub struct Events {
    spawns: Vec<SessionId>,
    starts: Vec<SessionId>,
    ends: Vec<SessionId>,
    despawns: Vec<SessionId>,
    current_changes: Vec<(SessionId, Option<NodeId>)>,
    node_begins: Vec<(SessionId, NodeId)>,
    node_ends: Vec<(SessionId, NodeId)>,
    node_pendings: Vec<(SessionId, NodeId)>,
    node_reloads: Vec<(SessionId, NodeId)>,
    node_updates: Vec<(SessionId, NodeId)>,
    errors: Vec<ServerError>,

    empty: bool,
}

impl Events {
    pub(crate) fn new() -> Self {
        Self {
            spawns: Vec::new(),
            starts: Vec::new(),
            ends: Vec::new(),
            despawns: Vec::new(),
            current_changes: Vec::new(),
            node_begins: Vec::new(),
            node_ends: Vec::new(),
            node_pendings: Vec::new(),
            node_reloads: Vec::new(),
            node_updates: Vec::new(),
            errors: Vec::new(),

            empty: true,
        }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: Event>(&mut self) -> V::Iter {
        return V::iter(self);
    }

    pub fn has<V: Event>(&self) -> bool {
        return V::has(self);
    }

    // Crate-public

    pub(crate) fn push_spawn(&mut self, session: SessionId) {
        self.spawns.push(session);
        self.empty = false;
    }

    pub(crate) fn push_despawn(&mut self, session: SessionId) {
        self.despawns.push(session);
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: ServerError) {
        self.errors.push(error);
        self.empty = false;
    }

    /// Routes one playback notification into the matching queue.
    pub(crate) fn push_playback(&mut self, session: SessionId, event: PlaybackEvent) {
        match event {
            PlaybackEvent::SessionStarted => self.starts.push(session),
            PlaybackEvent::SessionEnded => self.ends.push(session),
            PlaybackEvent::CurrentNodeChanged { node } => {
                self.current_changes.push((session, node))
            }
            PlaybackEvent::NodeBegan { node } => self.node_begins.push((session, node)),
            PlaybackEvent::NodeEnded { node } => self.node_ends.push((session, node)),
            PlaybackEvent::NodePending { node } => self.node_pendings.push((session, node)),
            PlaybackEvent::NodeReloaded { node } => self.node_reloads.push((session, node)),
            PlaybackEvent::NodeUpdated { node } => self.node_updates.push((session, node)),
        }
        self.empty = false;
    }
}

// Event Trait
pub trait Event {
    type Iter;

    fn iter(events: &mut Events) -> Self::Iter;

    fn has(events: &Events) -> bool;
}

// SpawnSessionEvent
pub struct SpawnSessionEvent;
impl Event for SpawnSessionEvent {
    type Iter = IntoIter<SessionId>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.spawns);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.spawns.is_empty()
    }
}

// StartSessionEvent
pub struct StartSessionEvent;
impl Event for StartSessionEvent {
    type Iter = IntoIter<SessionId>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.starts);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.starts.is_empty()
    }
}

// EndSessionEvent
pub struct EndSessionEvent;
impl Event for EndSessionEvent {
    type Iter = IntoIter<SessionId>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.ends);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.ends.is_empty()
    }
}

// DespawnSessionEvent
pub struct DespawnSessionEvent;
impl Event for DespawnSessionEvent {
    type Iter = IntoIter<SessionId>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.despawns);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.despawns.is_empty()
    }
}

// CurrentNodeEvent
pub struct CurrentNodeEvent;
impl Event for CurrentNodeEvent {
    type Iter = IntoIter<(SessionId, Option<NodeId>)>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.current_changes);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.current_changes.is_empty()
    }
}

// NodeBeganEvent
pub struct NodeBeganEvent;
impl Event for NodeBeganEvent {
    type Iter = IntoIter<(SessionId, NodeId)>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.node_begins);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.node_begins.is_empty()
    }
}

// NodeEndedEvent
pub struct NodeEndedEvent;
impl Event for NodeEndedEvent {
    type Iter = IntoIter<(SessionId, NodeId)>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.node_ends);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.node_ends.is_empty()
    }
}

// NodePendingEvent
pub struct NodePendingEvent;
impl Event for NodePendingEvent {
    type Iter = IntoIter<(SessionId, NodeId)>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.node_pendings);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.node_pendings.is_empty()
    }
}

// NodeReloadedEvent
pub struct NodeReloadedEvent;
impl Event for NodeReloadedEvent {
    type Iter = IntoIter<(SessionId, NodeId)>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.node_reloads);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.node_reloads.is_empty()
    }
}

// NodeUpdatedEvent
pub struct NodeUpdatedEvent;
impl Event for NodeUpdatedEvent {
    type Iter = IntoIter<(SessionId, NodeId)>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.node_updates);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.node_updates.is_empty()
    }
}

// ErrorEvent
pub struct ErrorEvent;
impl Event for ErrorEvent {
    type Iter = IntoIter<ServerError>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.errors);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.errors.is_empty()
    }
}
