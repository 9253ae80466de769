// TCP server and accept loop for the relay.
//
// Architecture: thread-per-connection over one shared `RelayState`.
//
// - **Accept thread** (`TcpListener::accept()` loop): accepts new TCP
//   connections, registers the player (or sends `Rejected` when the relay
//   is full), sends the unprompted `Welcome`, and spawns a handler thread.
// - **Handler threads** (one per client): a blocking request/response loop —
//   read one framed `ClientMessage`, answer it under the state lock, write
//   one framed `ServerMessage`. The protocol allows one outstanding request
//   per connection, so each stream has exactly one reader and one writer:
//   its own thread.
// - Read error, EOF, `Goodbye`, or a malformed request ends the handler:
//   the player is removed from the state and the thread exits. Every other
//   connection keeps running; the server process never dies on a client
//   failure.
//
// Shutdown: the accept thread polls a `keep_running` flag (cleared by
// `RelayHandle::stop`) between accept attempts.

use std::io::{BufReader, BufWriter};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use log::warn;

use punto_protocol::framing::{read_message, write_message};
use punto_protocol::message::{ClientMessage, ServerMessage};
use punto_protocol::types::RelayPlayerId;

use crate::state::RelayState;

/// Handle returned by `start_relay` to control the running server.
pub struct RelayHandle {
    keep_running: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl RelayHandle {
    /// Signal the relay to stop accepting connections and wait for the
    /// accept thread to shut down.
    pub fn stop(self) {
        self.keep_running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread {
            let _ = handle.join();
        }
    }
}

/// Configuration for starting a relay server.
pub struct RelayConfig {
    pub port: u16,
    pub max_players: u32,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: 5555,
            max_players: 4,
        }
    }
}

/// Start the relay server on a background thread. Returns a handle for
/// stopping it and the actual bound address (useful when port 0 is used
/// to let the OS pick a free port).
pub fn start_relay(config: RelayConfig) -> std::io::Result<(RelayHandle, std::net::SocketAddr)> {
    let listener = TcpListener::bind(("127.0.0.1", config.port))?;
    let addr = listener.local_addr()?;
    let keep_running = Arc::new(AtomicBool::new(true));
    let keep_running_accept = keep_running.clone();
    let state = Arc::new(Mutex::new(RelayState::new(config.max_players)));

    let thread = thread::spawn(move || {
        accept_loop(&listener, &state, &keep_running_accept);
    });

    Ok((
        RelayHandle {
            keep_running,
            thread: Some(thread),
        },
        addr,
    ))
}

/// Accept loop. Runs until `keep_running` is cleared.
fn accept_loop(
    listener: &TcpListener,
    state: &Arc<Mutex<RelayState>>,
    keep_running: &Arc<AtomicBool>,
) {
    // Non-blocking so the loop can check keep_running periodically.
    listener.set_nonblocking(true).ok();

    while keep_running.load(Ordering::SeqCst) {
        match listener.accept() {
            Ok((stream, _addr)) => {
                stream.set_nonblocking(false).ok();
                handle_new_connection(state, stream, keep_running);
            }
            Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                thread::sleep(Duration::from_millis(50));
            }
            Err(_) => break,
        }
    }
}

/// Register the player, greet them with `Welcome` (or `Rejected` when the
/// relay is full), and spawn the connection's handler thread.
fn handle_new_connection(
    state: &Arc<Mutex<RelayState>>,
    stream: TcpStream,
    keep_running: &Arc<AtomicBool>,
) {
    // Bind before matching: a guard in the scrutinee would live for the
    // whole match, and the failure paths below take the lock again.
    let registered = lock(state).register();
    match registered {
        Ok(player_id) => {
            let write_stream = match stream.try_clone() {
                Ok(s) => s,
                Err(_) => {
                    lock(state).disconnect(player_id);
                    return;
                }
            };
            let mut writer = BufWriter::new(write_stream);
            if send_message(&mut writer, &ServerMessage::Welcome { player_id }).is_err() {
                lock(state).disconnect(player_id);
                return;
            }

            let reader = BufReader::new(stream);
            let state_conn = Arc::clone(state);
            let keep_running_conn = Arc::clone(keep_running);
            thread::spawn(move || {
                connection_loop(reader, writer, player_id, &state_conn, &keep_running_conn);
            });
        }
        Err(reason) => {
            warn!("rejected connection: {reason}");
            let mut writer = BufWriter::new(stream);
            let _ = send_message(&mut writer, &ServerMessage::Rejected { reason });
        }
    }
}

/// Request/response loop for a single client. Runs in its own thread.
fn connection_loop(
    mut reader: BufReader<TcpStream>,
    mut writer: BufWriter<TcpStream>,
    player_id: RelayPlayerId,
    state: &Arc<Mutex<RelayState>>,
    keep_running: &Arc<AtomicBool>,
) {
    while keep_running.load(Ordering::SeqCst) {
        let request = match read_message(&mut reader) {
            Ok(bytes) => match serde_json::from_slice::<ClientMessage>(&bytes) {
                Ok(msg) => msg,
                // Malformed request — drop the connection.
                Err(_) => break,
            },
            // Read error or EOF — the client is gone.
            Err(_) => break,
        };

        let response = {
            let mut state = lock(state);
            match request {
                ClientMessage::Goodbye => break,
                ClientMessage::QueryConnectedCount => ServerMessage::ConnectedCount {
                    count: state.connected_count(),
                },
                ClientMessage::QueryPlayers => ServerMessage::Players {
                    players: state.roster(),
                },
                ClientMessage::SubmitMove { mv } => {
                    state.submit_move(mv);
                    ServerMessage::MoveAccepted
                }
                ClientMessage::QueryPendingMove => ServerMessage::PendingMove {
                    mv: state.take_pending(player_id),
                },
            }
        };

        if send_message(&mut writer, &response).is_err() {
            break;
        }
    }
    lock(state).disconnect(player_id);
}

/// Lock the shared state. Poisoning only follows a panic in another
/// handler thread, at which point propagating it is the right outcome.
fn lock(state: &Arc<Mutex<RelayState>>) -> MutexGuard<'_, RelayState> {
    state.lock().expect("relay state lock poisoned")
}

/// Serialize a `ServerMessage` to JSON and write it with length-delimited
/// framing.
fn send_message(writer: &mut BufWriter<TcpStream>, msg: &ServerMessage) -> std::io::Result<()> {
    let json = serde_json::to_vec(msg)?;
    write_message(writer, &json)
}
