use crate::ids::NodeId;

/// Everything a participant can watch happen in a session, buffered in the
/// order it happened. Both the host and its observers surface the same
/// sequence for the same command stream.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PlaybackEvent {
    SessionStarted,
    SessionEnded,
    /// The flow moved to a different base node (or to none).
    CurrentNodeChanged { node: Option<NodeId> },
    NodeBegan { node: NodeId },
    NodeEnded { node: NodeId },
    /// Fires at most once per node per visit.
    NodePending { node: NodeId },
    NodeReloaded { node: NodeId },
    /// A mirrored property delta landed on this node.
    NodeUpdated { node: NodeId },
}
