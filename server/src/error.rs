use thiserror::Error;

use colloquy_shared::transport::SendError;

/// Errors the server surfaces through its event queue rather than a return
/// value; command processing never halts on them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerError {
    /// A subscriber's pipe dropped a packet. That mirror is now behind for
    /// good; the session itself keeps playing.
    #[error("command packet lost on the way to a subscriber: {0}")]
    Send(#[from] SendError),
}

/// Why a session could not be spawned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpawnError {
    /// The graph has no nodes, so there is nothing to play.
    #[error("graph {graph_id} is empty")]
    EmptyGraph { graph_id: String },
}
