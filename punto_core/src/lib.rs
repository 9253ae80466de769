// punto_core — pure game logic for punto.
//
// Everything needed to run a round headless lives here: decks, the board
// and its selectability rules, the turn state machine, and winning-run
// detection. The crate has zero network or rendering dependencies; the
// companion crates `punto_protocol` and `punto_relay` handle the wire, and
// all pixel concerns stay in the embedding UI (which uses `layout` for the
// one agreed screen↔cell mapping).
//
// Module overview:
// - `types.rs`:  GridPos, PlayerId, CardValue, Card, grid constants.
// - `rng.rs`:    Deterministic xoshiro256++ PRNG for deck shuffling.
// - `deck.rs`:   The 18-card per-player supply.
// - `player.rs`: A seat at the table — deck, drawn card, turn flag.
// - `board.rs`:  The 11×11 grid, selectability, render highlights.
// - `win.rs`:    Row/column/diagonal winning-run scan.
// - `game.rs`:   GameState — the turn state machine.
// - `layout.rs`: Screen↔cell geometry for the input/render layer.
//
// **Critical constraint: determinism.** In a networked game every client
// rebuilds the entire game (all players' decks included) from a shared seed
// and replays peer moves through the same `place_card` path as local ones.
// There is no server-side game state to reconcile against, so any
// non-deterministic shuffle or iteration order desynchronizes peers
// permanently.

pub mod board;
pub mod deck;
pub mod game;
pub mod layout;
pub mod player;
pub mod rng;
pub mod types;
pub mod win;
