/// Integration tests for host orchestration
/// These tests verify the session-level state machine: start, the settle
/// loop that moves the flow, reload on revisits, skip semantics, and the
/// teardown guarantee that no active node survives a session end.
use std::sync::Arc;

use colloquy_server::{
    EndSessionEvent, NodeReloadedEvent, Server, ServerConfig, SpawnError, StartSessionEvent,
};
use colloquy_shared::GraphBuilder;
use colloquy_test::{
    assert_flags, empty_graph, linear_graph, loop_graph, manager_graph, HookRecorder, Probe,
};

/// A linear flow of self-ending lines runs front to back in one start call:
/// each node ends itself, the settle loop advances, and the session runs
/// out of road after the last one.
#[test]
fn linear_flow_runs_to_completion_on_start() {
    let recorder = HookRecorder::new();
    let (graph, nodes) = linear_graph(&recorder);
    let mut server = Server::new(ServerConfig::default());

    let id = server.spawn_session(&graph).expect("graph has nodes");
    server.start_session(&id);

    let begins: Vec<_> = recorder
        .take()
        .into_iter()
        .filter(|(_, hook)| *hook == "begin")
        .map(|(node, _)| node)
        .collect();
    assert_eq!(begins, nodes, "flow visits every node in authored order");

    let session = server.session(&id).expect("session is hosted");
    assert!(session.is_ended());
    assert!(session.known_active().is_empty());
    for node in &nodes {
        assert_flags!(session.playback(), *node, begun: true, ended: true, pending: true);
    }
}

/// Flow control can revisit a node, but only through the host's reload:
/// the second visit re-runs the begin notification instead of being
/// swallowed as already-begun.
#[test]
fn revisit_reloads_before_the_second_begin() {
    let recorder = HookRecorder::new();
    let (graph, a, b) = loop_graph(&recorder);
    let mut server = Server::new(ServerConfig::default());

    let id = server.spawn_session(&graph).expect("graph has nodes");
    server.start_session(&id);
    assert_eq!(recorder.count(a, "begin"), 1);
    server.receive();

    // a -> b: b has never run, so no reload
    server.play_next_node(&id);
    assert!(!server.receive().has::<NodeReloadedEvent>());
    assert_eq!(recorder.count(b, "begin"), 1);

    // b -> a: a already ran this session, so the host reloads it first
    server.play_next_node(&id);
    let mut events = server.receive();
    let reloads: Vec<_> = events.read::<NodeReloadedEvent>().collect();
    assert_eq!(reloads, vec![(id, a)]);
    assert_eq!(recorder.count(a, "begin"), 2, "second visit notifies again");

    let session = server.session(&id).expect("session is hosted");
    assert_eq!(session.current(), Some(a));
    assert!(!session.is_ended());
    assert_flags!(session.playback(), a, begun: true, ended: false, pending: false);
}

/// Skipping past a node ends it first; nothing keeps running behind the
/// flow.
#[test]
fn play_next_ends_the_node_it_skips() {
    let recorder = HookRecorder::new();
    let (graph, a, b) = loop_graph(&recorder);
    let mut server = Server::new(ServerConfig::default());

    let id = server.spawn_session(&graph).expect("graph has nodes");
    server.start_session(&id);
    server.play_next_node(&id);

    let session = server.session(&id).expect("session is hosted");
    assert_flags!(session.playback(), a, begun: true, ended: true, pending: true);
    assert_eq!(session.current(), Some(b));
    assert_eq!(session.known_active(), &[b]);
}

/// An empty next-pick from the current node means the flow is out of road
/// and the session ends.
#[test]
fn empty_selection_ends_the_session() {
    let recorder = HookRecorder::new();
    // a lone holding base with no sub-nodes: the stock selector has nobody
    // to ask and comes back empty
    let mut builder = GraphBuilder::new("dead-end");
    let base = builder.base_node(Probe::holding(&recorder));
    let graph = Arc::new(builder.build());
    let mut server = Server::new(ServerConfig::default());

    let id = server.spawn_session(&graph).expect("graph has nodes");
    server.start_session(&id);
    assert!(!server.session(&id).expect("session is hosted").is_ended());
    server.receive();

    server.play_next_node(&id);

    let session = server.session(&id).expect("session is hosted");
    assert!(session.is_ended());
    assert_flags!(session.playback(), base, begun: true, ended: true, pending: true);
    let mut events = server.receive();
    let ends: Vec<_> = events.read::<EndSessionEvent>().collect();
    assert_eq!(ends, vec![id]);
}

/// Ending a session force-ends everything still active, manager fragments
/// included, and leaves the active set empty. Doing it again changes
/// nothing.
#[test]
fn end_session_leaves_no_active_nodes() {
    let recorder = HookRecorder::new();
    let (graph, base, manager) = manager_graph(&recorder);
    let mut server = Server::new(ServerConfig::default());

    let id = server.spawn_session(&graph).expect("graph has nodes");
    server.start_session(&id);
    {
        let session = server.session(&id).expect("session is hosted");
        assert_eq!(session.known_active(), &[manager, base]);
    }

    server.end_session(&id);

    let session = server.session(&id).expect("session is hosted");
    assert!(session.is_ended());
    assert!(session.known_active().is_empty());
    assert_flags!(session.playback(), base, begun: true, ended: true, pending: true);
    assert_flags!(session.playback(), manager, begun: true, ended: true, pending: true);

    server.receive();
    server.end_session(&id);
    assert!(!server.receive().has::<EndSessionEvent>());
}

/// Manager fragments begin when the session starts, before the entry node.
#[test]
fn manager_fragments_begin_before_the_entry_node() {
    let recorder = HookRecorder::new();
    let (graph, base, manager) = manager_graph(&recorder);
    let mut server = Server::new(ServerConfig::default());

    let id = server.spawn_session(&graph).expect("graph has nodes");
    server.start_session(&id);

    assert_eq!(recorder.take(), vec![(manager, "begin"), (base, "begin")]);
}

/// Spawning an empty graph yields no session and no transitions.
#[test]
fn spawning_an_empty_graph_fails() {
    let mut server = Server::new(ServerConfig::default());

    let result = server.spawn_session(&empty_graph());

    assert!(matches!(result, Err(SpawnError::EmptyGraph { .. })));
    assert_eq!(server.session_count(), 0);
    assert!(server.receive().is_empty());
}

/// A session starts once. An ended session never starts again; the only
/// way to replay a graph is a fresh session.
#[test]
fn sessions_start_once_and_end_for_good() {
    let recorder = HookRecorder::new();
    let (graph, _, _) = manager_graph(&recorder);
    let mut server = Server::new(ServerConfig::default());

    let id = server.spawn_session(&graph).expect("graph has nodes");
    server.start_session(&id);
    server.start_session(&id);

    let mut events = server.receive();
    let starts: Vec<_> = events.read::<StartSessionEvent>().collect();
    assert_eq!(starts, vec![id], "the second start is a no-op");

    server.end_session(&id);
    server.start_session(&id);
    let session = server.session(&id).expect("session is hosted");
    assert!(session.is_ended(), "nothing revives an ended session");
}

/// Discarding a session force-ends its nodes and removes it from the host.
#[test]
fn despawn_tears_the_session_down() {
    let recorder = HookRecorder::new();
    let (graph, base, _) = manager_graph(&recorder);
    let mut server = Server::new(ServerConfig::default());

    let id = server.spawn_session(&graph).expect("graph has nodes");
    server.start_session(&id);
    server.despawn_session(&id);

    assert!(!server.has_session(&id));
    assert_eq!(recorder.count(base, "end"), 1, "teardown ended the base node");

    // requests against the discarded session are logged no-ops
    server.start_session(&id);
    server.end_session(&id);
    assert_eq!(server.session_count(), 0);
}
