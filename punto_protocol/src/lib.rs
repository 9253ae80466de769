// punto_protocol — wire protocol for the move relay.
//
// This crate defines the message types, framing, and serialization used by
// the relay server (`punto_relay`) and game clients to communicate over
// TCP. It is shared between both sides and has no dependency on the game
// core.
//
// Module overview:
// - `types.rs`:   `RelayPlayerId` — the relay's own id space.
// - `message.rs`: Request/response enums plus the `RelayMove` wire struct.
// - `framing.rs`: Length-delimited framing over any `Read`/`Write` stream:
//                 4-byte big-endian length prefix, then JSON payload.
//
// Design decisions:
// - **Explicit tagged schema.** Every request and response is an enum
//   variant with named payload fields; nothing on the wire is an opaque
//   serialized object graph, so a peer can never smuggle arbitrary types
//   through deserialization.
// - **JSON serialization.** Messages are tiny and infrequent (one move per
//   human turn); binary framing can be swapped in later if it ever matters.
// - **No async runtime.** Uses `std::io::Read`/`Write` for framing,
//   compatible with both blocking TCP streams and buffered wrappers.

pub mod framing;
pub mod message;
pub mod types;

pub use framing::{MAX_MESSAGE_SIZE, read_message, write_message};
pub use message::{ClientMessage, RelayMove, ServerMessage};
pub use types::RelayPlayerId;

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    /// Serialize a ClientMessage to JSON, frame it, read it back, deserialize.
    fn client_roundtrip(msg: &ClientMessage) {
        let json = serde_json::to_vec(msg).unwrap();
        let mut wire = Vec::new();
        write_message(&mut wire, &json).unwrap();

        let mut cursor = Cursor::new(&wire);
        let recovered_json = read_message(&mut cursor).unwrap();
        let recovered: ClientMessage = serde_json::from_slice(&recovered_json).unwrap();
        assert_eq!(&recovered, msg);
    }

    /// Serialize a ServerMessage to JSON, frame it, read it back, deserialize.
    fn server_roundtrip(msg: &ServerMessage) {
        let json = serde_json::to_vec(msg).unwrap();
        let mut wire = Vec::new();
        write_message(&mut wire, &json).unwrap();

        let mut cursor = Cursor::new(&wire);
        let recovered_json = read_message(&mut cursor).unwrap();
        let recovered: ServerMessage = serde_json::from_slice(&recovered_json).unwrap();
        assert_eq!(&recovered, msg);
    }

    #[test]
    fn roundtrip_query_connected_count() {
        client_roundtrip(&ClientMessage::QueryConnectedCount);
    }

    #[test]
    fn roundtrip_query_players() {
        client_roundtrip(&ClientMessage::QueryPlayers);
    }

    #[test]
    fn roundtrip_submit_move() {
        client_roundtrip(&ClientMessage::SubmitMove {
            mv: RelayMove {
                player_id: RelayPlayerId(2),
                col: 5,
                row: 6,
            },
        });
    }

    #[test]
    fn roundtrip_query_pending_move() {
        client_roundtrip(&ClientMessage::QueryPendingMove);
    }

    #[test]
    fn roundtrip_goodbye() {
        client_roundtrip(&ClientMessage::Goodbye);
    }

    #[test]
    fn roundtrip_welcome() {
        server_roundtrip(&ServerMessage::Welcome {
            player_id: RelayPlayerId(0),
        });
    }

    #[test]
    fn roundtrip_rejected() {
        server_roundtrip(&ServerMessage::Rejected {
            reason: "relay is full".into(),
        });
    }

    #[test]
    fn roundtrip_connected_count() {
        server_roundtrip(&ServerMessage::ConnectedCount { count: 3 });
    }

    #[test]
    fn roundtrip_players() {
        server_roundtrip(&ServerMessage::Players {
            players: vec![RelayPlayerId(0), RelayPlayerId(1), RelayPlayerId(3)],
        });
    }

    #[test]
    fn roundtrip_players_empty() {
        server_roundtrip(&ServerMessage::Players { players: vec![] });
    }

    #[test]
    fn roundtrip_move_accepted() {
        server_roundtrip(&ServerMessage::MoveAccepted);
    }

    #[test]
    fn roundtrip_pending_move_some() {
        server_roundtrip(&ServerMessage::PendingMove {
            mv: Some(RelayMove {
                player_id: RelayPlayerId(1),
                col: 10,
                row: 0,
            }),
        });
    }

    #[test]
    fn roundtrip_pending_move_none() {
        server_roundtrip(&ServerMessage::PendingMove { mv: None });
    }
}
