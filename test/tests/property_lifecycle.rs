/// PROPERTY-BASED TESTS: lifecycle invariants
///
/// Uses proptest to verify the node state machine holds up under arbitrary
/// transition sequences.
///
/// Key invariants:
/// 1. A node is never ended (or pending) without having begun
/// 2. The active set is exactly the begun-and-not-ended nodes
/// 3. Repeating a transition changes nothing (idempotence)
/// 4. A begun leaf satisfies the stock pending predicate vacuously
use std::sync::Arc;

use proptest::prelude::*;

use colloquy_shared::{Graph, GraphBuilder, NodeId, Playback, PlaybackEvent, Role, SessionId};
use colloquy_test::{HookRecorder, Probe};

/// base -> (child, child -> grandchild): deep enough for upward pending
/// walks, every node holding so transitions only happen when driven.
fn holding_tree(recorder: &HookRecorder) -> (Arc<Graph>, Vec<NodeId>) {
    let mut builder = GraphBuilder::new("held");
    let base = builder.base_node(Probe::holding(recorder));
    let left = builder.fragment(base, Probe::holding(recorder)).expect("parent exists");
    let right = builder.fragment(base, Probe::holding(recorder)).expect("parent exists");
    let leaf = builder.fragment(right, Probe::holding(recorder)).expect("parent exists");
    (Arc::new(builder.build()), vec![base, left, right, leaf])
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Begin(usize),
    End(usize),
    Pend(usize),
}

fn op_strategy(node_count: usize) -> impl Strategy<Value = Op> {
    (0usize..3, 0..node_count).prop_map(|(op, target)| match op {
        0 => Op::Begin(target),
        1 => Op::End(target),
        _ => Op::Pend(target),
    })
}

fn run(playback: &mut Playback, nodes: &[NodeId], op: Op) {
    match op {
        Op::Begin(target) => playback.begin_node(nodes[target]),
        Op::End(target) => playback.end_node(nodes[target]),
        Op::Pend(target) => playback.mark_node_pending_if_needed(nodes[target]),
    }
}

/// Flags and active set of every node, for state comparisons.
fn snapshot(playback: &Playback, nodes: &[NodeId]) -> Vec<(bool, bool, bool)> {
    nodes
        .iter()
        .map(|id| {
            (
                playback.is_node_begun(*id),
                playback.is_node_ended(*id),
                playback.is_node_pending(*id),
            )
        })
        .collect()
}

proptest! {
    /// No transition sequence produces an ended or pending node that never
    /// begun, and the active set always matches the flags.
    #[test]
    fn prop_flags_stay_coherent(ops in prop::collection::vec(op_strategy(4), 0..40)) {
        let recorder = HookRecorder::new();
        let (graph, nodes) = holding_tree(&recorder);
        let mut playback = Playback::new(SessionId::new(), &graph, Role::Authority);

        for op in ops {
            run(&mut playback, &nodes, op);
            for id in &nodes {
                if playback.is_node_ended(*id) {
                    prop_assert!(playback.is_node_begun(*id), "ended implies begun");
                }
                if playback.is_node_pending(*id) {
                    prop_assert!(playback.is_node_begun(*id), "pending implies begun");
                }
                prop_assert_eq!(
                    playback.known_active().contains(id),
                    playback.is_node_begun(*id) && !playback.is_node_ended(*id),
                    "active set tracks the flags"
                );
            }
        }
    }

    /// After any history, repeating the last transition is a no-op: same
    /// flags, no fresh notifications.
    #[test]
    fn prop_transitions_are_idempotent(
        ops in prop::collection::vec(op_strategy(4), 0..25),
        target in 0usize..4,
    ) {
        let recorder = HookRecorder::new();
        let (graph, nodes) = holding_tree(&recorder);
        let mut playback = Playback::new(SessionId::new(), &graph, Role::Authority);

        for op in ops {
            run(&mut playback, &nodes, op);
        }
        playback.begin_node(nodes[target]);
        playback.end_node(nodes[target]);
        let once = snapshot(&playback, &nodes);
        playback.receive_events();

        playback.end_node(nodes[target]);
        prop_assert_eq!(snapshot(&playback, &nodes), once.clone(), "second end changed flags");
        prop_assert!(
            playback.receive_events().is_empty(),
            "second end raised notifications"
        );

        playback.begin_node(nodes[target]);
        prop_assert_eq!(snapshot(&playback, &nodes), once, "re-begin revived an ended node");
    }

    /// The stock predicate is vacuously true for a begun leaf: the first
    /// pending nudge marks it, and exactly one notification fires.
    #[test]
    fn prop_begun_leaves_pend_on_the_first_nudge(nudges in 1usize..5) {
        let recorder = HookRecorder::new();
        let mut builder = GraphBuilder::new("leaf");
        let leaf = builder.base_node(Probe::holding(&recorder));
        let graph = builder.build();
        let mut playback = Playback::new(SessionId::new(), &graph, Role::Authority);

        playback.mark_node_pending_if_needed(leaf);
        prop_assert!(!playback.is_node_pending(leaf), "an idle node cannot pend");

        playback.begin_node(leaf);
        for _ in 0..nudges {
            playback.mark_node_pending_if_needed(leaf);
        }
        prop_assert!(playback.is_node_pending(leaf));
        let pendings = playback
            .receive_events()
            .into_iter()
            .filter(|event| matches!(event, PlaybackEvent::NodePending { .. }))
            .count();
        prop_assert_eq!(pendings, 1, "the pending notification never repeats");
    }

    /// Teardown ends every active node no matter what state the sequence
    /// left the tree in, and it is idempotent.
    #[test]
    fn prop_force_end_always_clears_the_active_set(
        ops in prop::collection::vec(op_strategy(4), 0..40),
    ) {
        let recorder = HookRecorder::new();
        let (graph, nodes) = holding_tree(&recorder);
        let mut playback = Playback::new(SessionId::new(), &graph, Role::Authority);

        for op in ops {
            run(&mut playback, &nodes, op);
        }
        let touched: Vec<NodeId> = nodes
            .iter()
            .copied()
            .filter(|id| playback.is_node_begun(*id))
            .collect();

        playback.force_end_all_active();
        prop_assert!(playback.known_active().is_empty());
        for id in &touched {
            prop_assert!(playback.is_node_ended(*id), "every begun node ended");
        }

        let settled = snapshot(&playback, &nodes);
        playback.force_end_all_active();
        prop_assert_eq!(snapshot(&playback, &nodes), settled, "teardown is idempotent");
    }
}
