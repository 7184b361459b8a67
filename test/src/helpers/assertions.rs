use colloquy_shared::{NodeId, Playback, PropertyValue};

/// Assert all three lifecycle flags of a node at once
#[macro_export]
macro_rules! assert_flags {
    ($playback:expr, $node:expr, begun: $begun:expr, ended: $ended:expr, pending: $pending:expr) => {
        assert_eq!(
            $playback.is_node_begun($node),
            $begun,
            "begun flag mismatch for node {}",
            $node
        );
        assert_eq!(
            $playback.is_node_ended($node),
            $ended,
            "ended flag mismatch for node {}",
            $node
        );
        assert_eq!(
            $playback.is_node_pending($node),
            $pending,
            "pending flag mismatch for node {}",
            $node
        );
    };
}

/// Assert that an observer's mirror reached the same state as the host:
/// session flags, current node, the active set, every node's lifecycle
/// flags, and the property maps of replicating nodes.
pub fn assert_converged(host: &Playback, mirror: &Playback, nodes: &[NodeId]) {
    assert_eq!(host.is_started(), mirror.is_started(), "started diverged");
    assert_eq!(host.is_ended(), mirror.is_ended(), "ended diverged");
    assert_eq!(host.current(), mirror.current(), "current node diverged");
    assert_eq!(
        host.known_active(),
        mirror.known_active(),
        "active set diverged"
    );
    for id in nodes {
        assert_eq!(
            host.is_node_begun(*id),
            mirror.is_node_begun(*id),
            "begun flag diverged for node {}",
            id
        );
        assert_eq!(
            host.is_node_ended(*id),
            mirror.is_node_ended(*id),
            "ended flag diverged for node {}",
            id
        );
        assert_eq!(
            host.is_node_pending(*id),
            mirror.is_node_pending(*id),
            "pending flag diverged for node {}",
            id
        );
        if host.node_replicates(*id) {
            assert_eq!(
                snapshot(host, *id),
                snapshot(mirror, *id),
                "properties diverged for replicating node {}",
                id
            );
        }
    }
}

fn snapshot(playback: &Playback, node: NodeId) -> Vec<(String, PropertyValue)> {
    playback
        .properties(node)
        .map(|properties| {
            properties
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect()
        })
        .unwrap_or_default()
}
