use thiserror::Error;

/// The far side of a command pipe went away mid-send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("command packet could not be delivered")]
pub struct SendError;

/// The far side of a command pipe went away mid-receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("command pipe closed by the sending side")]
pub struct RecvError;
