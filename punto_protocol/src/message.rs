// Protocol messages for client-relay communication.
//
// Two enums define the full protocol vocabulary:
// - `ClientMessage`: requests sent by game clients to the relay.
// - `ServerMessage`: responses sent by the relay to game clients.
//
// The exchange is strict request/response with one outstanding request per
// connection. The one exception is the greeting: connecting *is* the join
// request, and the relay speaks first with `Welcome` (or `Rejected`)
// before the client has sent anything.
//
// All types are explicit tagged serde enums for JSON framing (see
// `framing.rs`) — a move travels as the mover's id plus the targeted board
// cell, never as an opaque serialized object graph.

use serde::{Deserialize, Serialize};

use crate::types::RelayPlayerId;

/// A single relayed placement: who moved and which cell they targeted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayMove {
    pub player_id: RelayPlayerId,
    pub col: u8,
    pub row: u8,
}

/// Requests a client sends to the relay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ClientMessage {
    /// How many connections the relay has accepted and still holds.
    QueryConnectedCount,
    /// Snapshot of the currently connected player ids.
    QueryPlayers,
    /// Publish a placement to every other player's pending slot.
    SubmitMove { mv: RelayMove },
    /// The most recent move waiting for this player, if any.
    QueryPendingMove,
    /// Leaving gracefully.
    Goodbye,
}

/// Responses the relay sends to a client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ServerMessage {
    /// Sent unprompted when a connection is accepted.
    Welcome { player_id: RelayPlayerId },
    /// Sent instead of `Welcome` when the relay is full; the connection
    /// closes afterwards.
    Rejected { reason: String },
    /// Answer to `QueryConnectedCount`.
    ConnectedCount { count: u32 },
    /// Answer to `QueryPlayers`, ids ascending.
    Players { players: Vec<RelayPlayerId> },
    /// Acknowledges `SubmitMove`.
    MoveAccepted,
    /// Answer to `QueryPendingMove`. `None` when no peer has moved since
    /// the last poll. A pending move is consumed by the poll that returns
    /// it, and an unconsumed one is overwritten by a newer submission.
    PendingMove { mv: Option<RelayMove> },
}
