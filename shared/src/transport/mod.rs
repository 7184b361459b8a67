//! Command-stream plumbing.
//!
//! The core never frames bytes or talks to sockets. It hands finished
//! [`CommandPacket`]s to a [`CommandSender`] and pulls them back out of a
//! [`CommandReceiver`]; whatever sits between the two must deliver every
//! packet exactly once, in order. Any reliable-ordered byte transport can
//! carry the stream by serializing packets at the edge.

mod channel;
mod error;

pub use channel::CommandChannel;
pub use error::{RecvError, SendError};

use crate::command::CommandPacket;

pub trait CommandSender: Send + Sync {
    /// Queues one packet for delivery to every mirror behind this sender.
    fn send(&self, packet: &CommandPacket) -> Result<(), SendError>;
}

pub trait CommandReceiver: Send {
    /// Takes the next delivered packet, if one is waiting.
    fn receive(&mut self) -> Result<Option<CommandPacket>, RecvError>;
}
