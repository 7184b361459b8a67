//! A complete two-sided session in one process: an authoritative server
//! plays a short tavern scene, a client mirrors it over the in-memory
//! command channel, and both sides print the transcript they observed.
//!
//! Run with `RUST_LOG=info cargo run -p colloquy-basic-demo` to also see
//! every mirrored command.

use std::sync::Arc;

use log::info;

use colloquy_client::{Client, ClientConfig};
use colloquy_server::{NodeBeganEvent, Server, ServerConfig};
use colloquy_shared::{
    BehaviorCtx, CommandChannel, CommandReceiver, GraphBuilder, GraphView, NodeBehavior, NodeId,
    Playback, PropertyValue, SessionId,
};

/// A spoken line. It ends itself as soon as it begins (stock leaf
/// semantics) and hands the flow to whatever its authored `next` property
/// points at.
struct Line;

impl NodeBehavior for Line {
    fn select_next(&self, view: &GraphView) -> Vec<NodeId> {
        match view.property("next") {
            Some(PropertyValue::Id(next)) => vec![*next],
            _ => Vec::new(),
        }
    }

    fn name(&self) -> &'static str {
        "line"
    }
}

/// A question that waits for the player. It stays active until the host
/// skips past it, and picks whichever node its `choice` property names at
/// that moment.
struct Prompt;

impl NodeBehavior for Prompt {
    fn post_begin(&self, _ctx: &mut BehaviorCtx) {
        // hold: the player decides when this node is over
    }

    fn select_next(&self, view: &GraphView) -> Vec<NodeId> {
        match view.property("choice") {
            Some(PropertyValue::Id(choice)) => vec![*choice],
            _ => Vec::new(),
        }
    }

    fn name(&self) -> &'static str {
        "prompt"
    }
}

fn main() {
    env_logger::init();
    info!("colloquy basic demo started");

    // The authored asset. Lines chain through `next` properties; the prompt
    // branches on a `choice` the host fills in at play time.
    let mut builder = GraphBuilder::new("tavern");
    let greeting = builder.base_node(Line);
    let question = builder.base_node(Prompt);
    let stay = builder.base_node(Line);
    let leave = builder.base_node(Line);

    let author = |builder: &mut GraphBuilder, node, text| {
        builder
            .property(node, "text", text)
            .expect("node was just added");
    };
    author(&mut builder, greeting, "Innkeeper: Welcome in, traveler.");
    author(&mut builder, question, "Innkeeper: Staying the night?");
    author(&mut builder, stay, "Innkeeper: The good room, then.");
    author(&mut builder, leave, "Innkeeper: Suit yourself. Mind the wolves.");
    builder
        .property(greeting, "next", question)
        .expect("node was just added");
    // the prompt mirrors its runtime state, so observers see the choice too
    builder
        .replicates(question, true)
        .expect("node was just added");
    builder.entry(greeting).expect("greeting is a base node");
    let graph = Arc::new(builder.build());

    // One host, one mirror, an in-memory pipe between them.
    let (sender, mut receiver) = CommandChannel::unbounded();
    let mut server = Server::new(ServerConfig { log_commands: true });
    server.subscribe(sender);
    let mut client = Client::new(ClientConfig::default());
    client.register_graph(&graph);

    let session = server.spawn_session(&graph).expect("demo graph has nodes");

    println!("--- scene starts ---");
    server.start_session(&session);
    report(&mut server, &mut client, receiver.as_mut(), &session);

    // The greeting spoke and ended itself; the flow is now holding on the
    // prompt. The player answers: the host records the pick on the prompt
    // (mirrored, since the prompt replicates) and skips the flow forward.
    println!("--- player picks 'stay' ---");
    server.set_node_property(&session, question, "choice", stay);
    server.send_updates();
    server.play_next_node(&session);
    report(&mut server, &mut client, receiver.as_mut(), &session);

    // `stay` was a plain line: it spoke, ended itself, had no `next`, and
    // the session ran out of road.
    let host_done = server
        .session(&session)
        .map(|live| live.is_ended())
        .unwrap_or(false);
    let mirror_done = client
        .session(&session)
        .map(|mirror| mirror.is_ended())
        .unwrap_or(false);
    println!("--- scene over (host ended: {host_done}, mirror ended: {mirror_done}) ---");

    let mirrored_choice = client
        .session(&session)
        .and_then(|mirror| mirror.properties(question))
        .and_then(|properties| properties.get("choice").cloned());
    match mirrored_choice {
        Some(PropertyValue::Id(choice)) if choice == stay => {
            println!("mirror saw the player's choice arrive as a property delta");
        }
        other => println!("mirror never saw the choice: {other:?}"),
    }
}

/// Pumps queued packets into the client, then prints what each side
/// observed since the last call.
fn report(
    server: &mut Server,
    client: &mut Client,
    receiver: &mut dyn CommandReceiver,
    session: &SessionId,
) {
    let applied = client.process_all(receiver);
    info!("mirror applied {applied} packets");

    let mut host_events = server.receive();
    if let Some(live) = server.session(session) {
        for (_, node) in host_events.read::<NodeBeganEvent>() {
            speak("host", live.playback(), node);
        }
    }

    let mut mirror_events = client.receive();
    if let Some(mirror) = client.session(session) {
        for (_, node) in mirror_events.read::<colloquy_client::NodeBeganEvent>() {
            speak("mirror", mirror, node);
        }
    }
}

fn speak(side: &str, playback: &Playback, node: NodeId) {
    if let Some(PropertyValue::Text(text)) = playback
        .properties(node)
        .and_then(|properties| properties.get("text"))
    {
        println!("[{side}] {text}");
    }
}
