use thiserror::Error;

use colloquy_shared::transport::RecvError;

/// Errors the client surfaces through its event queue; mirrors keep their
/// last coherent state when one occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The command stream closed underneath us. No further packets will
    /// arrive; every mirror stays frozen where the stream left it.
    #[error("command stream lost: {0}")]
    Recv(#[from] RecvError),
}
