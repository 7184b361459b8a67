//! # Colloquy Client
//! The observing side of colloquy sessions. It registers the same graph
//! assets the server plays, builds a local mirror per spawned session, and
//! applies the authority's ordered command stream so its mirrors stay
//! identical to the host copy without ever re-deriving a decision.

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

mod client;
mod client_config;
mod error;
mod events;
mod registry;

pub use client::Client;
pub use client_config::ClientConfig;
pub use error::ClientError;
pub use events::{
    CurrentNodeEvent, DespawnSessionEvent, EndSessionEvent, ErrorEvent, Event, Events,
    NodeBeganEvent, NodeEndedEvent, NodePendingEvent, NodeReloadedEvent, NodeUpdatedEvent,
    SpawnSessionEvent, StartSessionEvent,
};
pub use registry::GraphRegistry;
