//! # Colloquy Shared
//! Common functionality shared between colloquy-server & colloquy-client
//! crates: the authored graph model, the per-session playback runtime, and
//! the mirrored command stream that keeps every participant's copy
//! identical.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod behavior;
mod command;
mod graph;
mod ids;
mod playback;
mod property;
mod tag;
mod types;

pub mod transport;

pub use behavior::{defaults, BehaviorCtx, BehaviorKind, GraphView, NodeBehavior};
pub use command::{CommandPacket, PlaybackCommand};
pub use graph::{Graph, GraphBuilder, GraphError, Node};
pub use ids::{GraphId, NodeId, SessionId};
pub use playback::{ControlSignals, Playback, PlaybackEvent};
pub use property::{NodeDelta, Properties, PropertyValue};
pub use tag::{Tag, TagSet};
pub use transport::{CommandChannel, CommandReceiver, CommandSender};
pub use types::{CommandIndex, Role};
