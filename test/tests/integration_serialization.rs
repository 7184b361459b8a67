/// Round-trip tests for the wire-facing command types
/// The core hands serde-serializable packets to the transport; any
/// reliable-ordered byte pipe can carry them. These tests prove every
/// command survives a serialize/deserialize cycle intact.
use colloquy_shared::{
    CommandPacket, GraphId, NodeId, PlaybackCommand, Properties, SessionId,
};

fn roundtrip(packet: &CommandPacket) -> CommandPacket {
    let wire = serde_json::to_string(packet).expect("packet serializes");
    serde_json::from_str(&wire).expect("packet deserializes")
}

#[test]
fn every_command_survives_the_wire() {
    let node = NodeId::new();
    let mut properties = Properties::new();
    properties.set("text", "Well met.");
    properties.set("mood", 2i64);
    properties.set("volume", 0.5f64);
    properties.set("muted", false);
    properties.set("speaker", NodeId::new());
    let delta = properties.take_delta().expect("five dirty names");

    let commands = vec![
        PlaybackCommand::Spawned {
            graph: GraphId::new(),
        },
        PlaybackCommand::Started,
        PlaybackCommand::SetCurrentNode { node: Some(node) },
        PlaybackCommand::SetCurrentNode { node: None },
        PlaybackCommand::BeginCurrentNode,
        PlaybackCommand::EndCurrentNode,
        PlaybackCommand::ReloadNode { node },
        PlaybackCommand::SetNodeReplicates {
            node,
            replicates: true,
        },
        PlaybackCommand::UpdateNode { node, delta },
        PlaybackCommand::Ended,
        PlaybackCommand::Discarded,
    ];

    let session = SessionId::new();
    for (index, command) in commands.into_iter().enumerate() {
        let packet = CommandPacket {
            session,
            index: index as u64,
            command,
        };
        assert_eq!(roundtrip(&packet), packet);
    }
}

/// A mirrored delta applies identically whether it took a trip through the
/// wire format or not.
#[test]
fn deltas_apply_identically_after_the_wire() {
    let mut host = Properties::new();
    host.set("text", "Mind the wolves.");
    host.set("count", 9i64);
    let delta = host.take_delta().expect("dirty");

    let node = NodeId::new();
    let packet = CommandPacket {
        session: SessionId::new(),
        index: 0,
        command: PlaybackCommand::UpdateNode { node, delta },
    };
    let PlaybackCommand::UpdateNode { delta: wired, .. } = roundtrip(&packet).command else {
        panic!("variant changed in flight");
    };

    let mut direct = Properties::new();
    let mut via_wire = Properties::new();
    let PlaybackCommand::UpdateNode { delta: original, .. } = packet.command else {
        unreachable!()
    };
    direct.apply_delta(&original);
    via_wire.apply_delta(&wired);

    let collect = |properties: &Properties| {
        properties
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(collect(&direct), collect(&via_wire));
}
