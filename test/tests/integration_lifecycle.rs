/// Integration tests for the node lifecycle
/// These tests verify the begin/end/pending state machine of one hosted
/// session: begin order, the once-only pending notification, and how far
/// a pending child lets its parent settle.
use colloquy_server::{Server, ServerConfig};
use colloquy_shared::NodeId;
use colloquy_test::{assert_flags, fan_graph, HookRecorder};

/// Beginning a parent begins its sub-nodes in declaration order, parent
/// first.
#[test]
fn children_begin_in_declaration_order() {
    let recorder = HookRecorder::new();
    let (graph, base, children) = fan_graph(&recorder, 3);
    let mut server = Server::new(ServerConfig::default());

    let id = server.spawn_session(&graph).expect("graph has nodes");
    server.start_session(&id);

    let mut expected = vec![(base, "begin")];
    for child in &children {
        expected.push((*child, "begin"));
    }
    assert_eq!(recorder.take(), expected, "begin order must follow authoring");

    let session = server.session(&id).expect("session is hosted");
    assert_eq!(session.current(), Some(base));
    let mut active = vec![base];
    active.extend(&children);
    assert_eq!(session.known_active(), active.as_slice());
}

/// The parent's pending predicate holds out until the last child ends, and
/// the notification fires exactly once.
#[test]
fn parent_goes_pending_after_the_last_child_only() {
    let recorder = HookRecorder::new();
    let (graph, base, children) = fan_graph(&recorder, 3);
    let mut server = Server::new(ServerConfig::default());

    let id = server.spawn_session(&graph).expect("graph has nodes");
    server.start_session(&id);

    server.request_node_end(&id, children[0]);
    server.request_node_end(&id, children[1]);
    assert_eq!(recorder.count(base, "pending"), 0, "two of three is not enough");
    assert!(!server.session(&id).expect("session is hosted").is_ended());

    server.request_node_end(&id, children[2]);
    assert_eq!(recorder.count(base, "pending"), 1);
    // pending current node gets ended by the host, and with nothing to
    // select next the session runs out
    assert_eq!(recorder.hooks_for(base), vec!["begin", "pending", "end"]);
    assert!(server.session(&id).expect("session is hosted").is_ended());
}

/// Ending twice is a logged no-op: flags, hooks and notifications all stay
/// single-shot.
#[test]
fn ending_a_child_twice_changes_nothing() {
    let recorder = HookRecorder::new();
    let (graph, _base, children) = fan_graph(&recorder, 3);
    let mut server = Server::new(ServerConfig::default());

    let id = server.spawn_session(&graph).expect("graph has nodes");
    server.start_session(&id);

    server.request_node_end(&id, children[0]);
    server.request_node_end(&id, children[0]);

    assert_eq!(recorder.count(children[0], "end"), 1);
    assert_eq!(recorder.count(children[0], "pending"), 1);
}

/// An ended node keeps its begun flag and counts as pending from then on.
#[test]
fn ended_nodes_count_as_pending() {
    let recorder = HookRecorder::new();
    let (graph, base, children) = fan_graph(&recorder, 3);
    let mut server = Server::new(ServerConfig::default());

    let id = server.spawn_session(&graph).expect("graph has nodes");
    server.start_session(&id);
    server.request_node_end(&id, children[0]);

    let session = server.session(&id).expect("session is hosted");
    assert_flags!(session.playback(), children[0], begun: true, ended: true, pending: true);
    assert_flags!(session.playback(), base, begun: true, ended: false, pending: false);
}

/// Forcing pending skips the predicate entirely. Forcing it on the current
/// node makes the host end it, which tears the subtree down and runs the
/// session out.
#[test]
fn forced_pending_skips_the_predicate() {
    let recorder = HookRecorder::new();
    let (graph, base, children) = fan_graph(&recorder, 3);
    let mut server = Server::new(ServerConfig::default());

    let id = server.spawn_session(&graph).expect("graph has nodes");
    server.start_session(&id);

    server.force_node_pending(&id, base);

    assert_eq!(recorder.count(base, "pending"), 1);
    let session = server.session(&id).expect("session is hosted");
    assert!(session.is_ended());
    for child in &children {
        assert_flags!(session.playback(), *child, begun: true, ended: true, pending: true);
    }
    assert!(session.known_active().is_empty());
}

/// Requests against nodes the session never heard of change nothing.
#[test]
fn requests_on_unknown_nodes_are_ignored() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .is_test(true)
        .try_init()
        .ok();

    let recorder = HookRecorder::new();
    let (graph, base, _children) = fan_graph(&recorder, 2);
    let mut server = Server::new(ServerConfig::default());

    let id = server.spawn_session(&graph).expect("graph has nodes");
    server.start_session(&id);
    server.receive();

    let foreign = NodeId::new();
    server.request_node_begin(&id, foreign);
    server.request_node_end(&id, foreign);
    server.request_node_pending(&id, foreign);

    assert!(server.receive().is_empty());
    let session = server.session(&id).expect("session is hosted");
    assert!(!session.is_ended());
    assert_eq!(session.current(), Some(base));
}
