//! # Colloquy Server
//! The authoring-side host for colloquy sessions. It spawns playbacks from
//! graph assets, owns every flow decision (start, current-node moves,
//! teardown), and mirrors those decisions to subscribed observers in order,
//! so each observer's copy converges on the host's state.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use colloquy_shared::{
        defaults, BehaviorCtx, BehaviorKind, CommandChannel, CommandIndex, CommandPacket,
        CommandReceiver, CommandSender, ControlSignals, Graph, GraphBuilder, GraphError, GraphId,
        GraphView, Node, NodeBehavior, NodeDelta, NodeId, Playback, PlaybackCommand,
        PlaybackEvent, Properties, PropertyValue, Role, SessionId, Tag, TagSet,
    };
}

mod error;
mod events;
mod server;
mod session;

pub use error::{ServerError, SpawnError};
pub use events::{
    CurrentNodeEvent, DespawnSessionEvent, EndSessionEvent, ErrorEvent, Event, Events,
    NodeBeganEvent, NodeEndedEvent, NodePendingEvent, NodeReloadedEvent, NodeUpdatedEvent,
    SpawnSessionEvent, StartSessionEvent,
};
pub use server::{Server, ServerConfig};
pub use session::{SessionMut, SessionRef};
