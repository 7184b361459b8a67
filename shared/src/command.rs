use serde::{Deserialize, Serialize};

use crate::ids::{GraphId, NodeId, SessionId};
use crate::property::NodeDelta;
use crate::types::CommandIndex;

/// One authoritative decision, mirrored verbatim to every observer.
///
/// The vocabulary is closed: an observer reconstructs the whole session by
/// applying these in order, and nothing else ever mutates its mirror. The
/// host routes its own decisions through the same application code, so both
/// sides compute identical state from identical inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackCommand {
    /// A session now exists for the named graph asset.
    Spawned { graph: GraphId },
    /// The session started: manager fragments begin and the flow is live.
    Started,
    /// The flow moved to a new current base node (or to none).
    SetCurrentNode { node: Option<NodeId> },
    /// Begin the current base node.
    BeginCurrentNode,
    /// End the current base node.
    EndCurrentNode,
    /// Reset a node and its whole sub-tree to idle so it can replay.
    ReloadNode { node: NodeId },
    /// Toggle fine-grained property mirroring for one node.
    SetNodeReplicates { node: NodeId, replicates: bool },
    /// Property changes for one replicating node.
    UpdateNode { node: NodeId, delta: NodeDelta },
    /// The session ended. Terminal: no command revives an ended session.
    Ended,
    /// The session is gone; observers drop their mirror.
    Discarded,
}

/// Envelope for one mirrored command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandPacket {
    pub session: SessionId,
    /// Per-session monotone counter. Receivers use it to notice transport
    /// misbehavior, never to re-sequence: delivery order is the transport's
    /// contract.
    pub index: CommandIndex,
    pub command: PlaybackCommand,
}
