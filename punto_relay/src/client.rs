// Blocking TCP client for the relay.
//
// The protocol is strict request/response with one outstanding request per
// connection, so no reader thread is needed: every method writes one
// framed request and blocks until the matching response arrives. The only
// unsolicited message is the greeting — the relay sends `Welcome` (or
// `Rejected`) as soon as the connection is accepted, and `connect()`
// consumes it.
//
// All methods surface I/O failures as `Err(String)` with context. A
// failure means the relay is unreachable; callers show a
// waiting/disconnected status to the player and keep running — they never
// crash the game over a lost connection.

use std::io::{self, BufReader, BufWriter};
use std::net::TcpStream;

use punto_protocol::framing::{read_message, write_message};
use punto_protocol::message::{ClientMessage, RelayMove, ServerMessage};
use punto_protocol::types::RelayPlayerId;

/// TCP client for relay communication.
pub struct RelayClient {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
    player_id: RelayPlayerId,
}

impl RelayClient {
    /// Connect to a relay server and read the unprompted greeting. Returns
    /// the client with its relay-assigned player id.
    pub fn connect(addr: &str) -> Result<Self, String> {
        let stream = TcpStream::connect(addr).map_err(|e| format!("connect failed: {e}"))?;
        let reader_stream = stream
            .try_clone()
            .map_err(|e| format!("clone failed: {e}"))?;
        let mut reader = BufReader::new(reader_stream);
        let writer = BufWriter::new(stream);

        let greeting = recv(&mut reader).map_err(|e| format!("read greeting failed: {e}"))?;
        let player_id = match greeting {
            ServerMessage::Welcome { player_id } => player_id,
            ServerMessage::Rejected { reason } => return Err(format!("rejected: {reason}")),
            other => return Err(format!("unexpected greeting: {other:?}")),
        };

        Ok(Self {
            reader,
            writer,
            player_id,
        })
    }

    /// The id the relay assigned to this connection.
    pub fn player_id(&self) -> RelayPlayerId {
        self.player_id
    }

    /// Publish a placement to every other player's pending slot.
    pub fn submit_move(&mut self, col: u8, row: u8) -> Result<(), String> {
        let mv = RelayMove {
            player_id: self.player_id,
            col,
            row,
        };
        match self.request(&ClientMessage::SubmitMove { mv })? {
            ServerMessage::MoveAccepted => Ok(()),
            other => Err(format!("unexpected response: {other:?}")),
        }
    }

    /// Fetch and clear the move waiting for this player, if any.
    pub fn query_pending_move(&mut self) -> Result<Option<RelayMove>, String> {
        match self.request(&ClientMessage::QueryPendingMove)? {
            ServerMessage::PendingMove { mv } => Ok(mv),
            other => Err(format!("unexpected response: {other:?}")),
        }
    }

    /// How many connections the relay currently holds.
    pub fn query_connected_count(&mut self) -> Result<u32, String> {
        match self.request(&ClientMessage::QueryConnectedCount)? {
            ServerMessage::ConnectedCount { count } => Ok(count),
            other => Err(format!("unexpected response: {other:?}")),
        }
    }

    /// Snapshot of the currently connected player ids.
    pub fn query_players(&mut self) -> Result<Vec<RelayPlayerId>, String> {
        match self.request(&ClientMessage::QueryPlayers)? {
            ServerMessage::Players { players } => Ok(players),
            other => Err(format!("unexpected response: {other:?}")),
        }
    }

    /// Send `Goodbye`; the relay drops this player on receipt. No response
    /// is expected.
    pub fn disconnect(&mut self) {
        let _ = send(&mut self.writer, &ClientMessage::Goodbye);
    }

    fn request(&mut self, msg: &ClientMessage) -> Result<ServerMessage, String> {
        send(&mut self.writer, msg).map_err(|e| format!("send failed: {e}"))?;
        recv(&mut self.reader).map_err(|e| format!("recv failed: {e}"))
    }
}

/// Serialize a `ClientMessage` to JSON and write with length-delimited
/// framing.
fn send(writer: &mut BufWriter<TcpStream>, msg: &ClientMessage) -> io::Result<()> {
    let json = serde_json::to_vec(msg)?;
    write_message(writer, &json)
}

/// Read one framed `ServerMessage`.
fn recv(reader: &mut BufReader<TcpStream>) -> io::Result<ServerMessage> {
    let bytes = read_message(reader)?;
    Ok(serde_json::from_slice(&bytes)?)
}
