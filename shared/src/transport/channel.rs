use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use super::{CommandReceiver, CommandSender, RecvError, SendError};
use crate::command::CommandPacket;

/// In-memory command pipe, mostly for tests, demos and listen-server
/// setups where host and mirror share a process.
pub struct CommandChannel;

impl CommandChannel {
    pub fn unbounded() -> (Box<dyn CommandSender>, Box<dyn CommandReceiver>) {
        let (sender, receiver) = mpsc::channel();
        let receiver = CommandChannelReceiver::new(receiver);
        (Box::new(sender), Box::new(receiver))
    }
}

impl CommandSender for Sender<CommandPacket> {
    fn send(&self, packet: &CommandPacket) -> Result<(), SendError> {
        self.send(packet.clone()).map_err(|_| SendError)
    }
}

struct CommandChannelReceiver {
    receiver: Receiver<CommandPacket>,
}

impl CommandChannelReceiver {
    fn new(receiver: Receiver<CommandPacket>) -> Self {
        Self { receiver }
    }
}

impl CommandReceiver for CommandChannelReceiver {
    fn receive(&mut self) -> Result<Option<CommandPacket>, RecvError> {
        match self.receiver.try_recv() {
            Ok(packet) => Ok(Some(packet)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(RecvError),
        }
    }
}
