// Test-only networked game client.
//
// Pairs a real `RelayClient` (from `punto_relay::client`) with a real
// `GameState` (from `punto_core::game`) to provide a synchronous,
// test-friendly API for exercising the full multiplayer pipeline:
// connect → place locally → submit → peer polls → peer replays the move.
//
// The only test-specific code here is the bounded polling loop in
// `wait_for_move`. All networking and game logic uses the same code paths
// as a live game.
//
// See also: `tests/full_pipeline.rs` for the integration scenarios.

use std::thread;
use std::time::Duration;

use punto_core::game::GameState;
use punto_core::types::GridPos;
use punto_protocol::message::RelayMove;
use punto_relay::client::RelayClient;

/// Attempts made by `wait_for_move` before giving up.
const POLL_ATTEMPTS: usize = 100;

/// Sleep duration between poll attempts.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// A networked player for integration tests: relay connection plus the
/// locally recomputed game.
pub struct TestGameClient {
    pub client: RelayClient,
    pub game: GameState,
}

impl TestGameClient {
    /// Connect to the relay and build the local game. Every peer must use
    /// the same `(n_players, seed)` pair to reproduce identical decks.
    pub fn connect(addr: std::net::SocketAddr, n_players: usize, seed: u64) -> Self {
        let client =
            RelayClient::connect(&addr.to_string()).expect("TestGameClient::connect failed");
        Self {
            client,
            game: GameState::new(n_players, seed),
        }
    }

    /// The first selectable cell for the current player's drawn card.
    pub fn any_selectable(&self) -> GridPos {
        let value = self
            .game
            .current_player()
            .current_card()
            .expect("current player holds no card");
        self.game.board().selectable_cells(value)[0]
    }

    /// Place the current player's card locally and publish the move.
    /// Panics on an illegal placement — tests only place on selectable
    /// cells.
    pub fn place_and_submit(&mut self, pos: GridPos) {
        assert!(
            self.game.place_card(pos),
            "placement at {pos} not selectable"
        );
        self.client
            .submit_move(pos.col, pos.row)
            .expect("submit_move failed");
    }

    /// Poll the relay once; if a peer move is waiting, replay it locally.
    pub fn apply_pending(&mut self) -> Option<RelayMove> {
        let mv = self
            .client
            .query_pending_move()
            .expect("query_pending_move failed")?;
        let pos = GridPos::new(mv.col, mv.row);
        assert!(
            self.game.place_card(pos),
            "relayed move at {pos} not selectable"
        );
        Some(mv)
    }

    /// Poll until a peer move arrives and has been replayed locally.
    pub fn wait_for_move(&mut self) -> RelayMove {
        for _ in 0..POLL_ATTEMPTS {
            if let Some(mv) = self.apply_pending() {
                return mv;
            }
            thread::sleep(POLL_INTERVAL);
        }
        panic!("timed out waiting for a relayed move");
    }

    /// JSON snapshot of the local game, for cross-client comparison.
    pub fn state_json(&self) -> String {
        serde_json::to_string(&self.game).expect("serialize GameState failed")
    }
}
