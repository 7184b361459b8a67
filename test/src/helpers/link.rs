use std::sync::Arc;

use colloquy_client::{Client, ClientConfig};
use colloquy_server::{Server, ServerConfig};
use colloquy_shared::{CommandChannel, CommandReceiver, Graph};

/// An authority and an observer joined by an in-process command channel,
/// with the observer's graph already registered.
pub struct Link {
    pub server: Server,
    pub client: Client,
    receiver: Box<dyn CommandReceiver>,
}

impl Link {
    pub fn pair(graph: &Arc<Graph>) -> Self {
        let (sender, receiver) = CommandChannel::unbounded();
        let mut server = Server::new(ServerConfig::default());
        server.subscribe(sender);
        let mut client = Client::new(ClientConfig::default());
        client.register_graph(graph);
        Self {
            server,
            client,
            receiver,
        }
    }

    /// Drains every queued command packet into the client. Returns how
    /// many packets were applied.
    pub fn pump(&mut self) -> usize {
        self.client.process_all(self.receiver.as_mut())
    }
}
