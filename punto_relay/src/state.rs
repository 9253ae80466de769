// Pending-move bookkeeping for the relay.
//
// `RelayState` is the single shared structure behind the server: the
// roster of accepted connections and one pending-move slot per player.
// Connection handler threads reach it through one `Mutex` (see
// `server.rs`), so the fan-out in `submit_move` is atomic with respect to
// every concurrent poll — a reader can never observe half of a submission.
//
// The slot is intentionally lossy: it holds the *latest* move addressed to
// a player, and a second submission overwrites an unconsumed first one.
// The relay holds no board, turn, or win state — each client recomputes
// the whole game from the moves it observes.

use std::collections::BTreeMap;

use log::{debug, info};

use punto_protocol::message::RelayMove;
use punto_protocol::types::RelayPlayerId;

/// Roster and pending-move slots for one relay process.
#[derive(Debug)]
pub struct RelayState {
    next_player_id: u32,
    max_players: u32,
    /// One slot per connected player, holding the latest unconsumed move
    /// addressed to them.
    pending: BTreeMap<RelayPlayerId, Option<RelayMove>>,
}

impl RelayState {
    pub fn new(max_players: u32) -> Self {
        Self {
            next_player_id: 0,
            max_players,
            pending: BTreeMap::new(),
        }
    }

    /// Admit a new connection. Ids are 0-based, monotonically increasing,
    /// and never reused — not even after a disconnect. Returns an error
    /// reason when the relay is full.
    pub fn register(&mut self) -> Result<RelayPlayerId, String> {
        if self.pending.len() as u32 >= self.max_players {
            return Err("relay is full".into());
        }
        let id = RelayPlayerId(self.next_player_id);
        self.next_player_id += 1;
        self.pending.insert(id, None);
        info!("player {} connected ({} online)", id.0, self.pending.len());
        Ok(id)
    }

    /// Drop a player. Their slot disappears with them; peers simply stop
    /// seeing the id in the roster.
    pub fn disconnect(&mut self, player_id: RelayPlayerId) {
        if self.pending.remove(&player_id).is_some() {
            info!(
                "player {} disconnected ({} online)",
                player_id.0,
                self.pending.len()
            );
        }
    }

    pub fn connected_count(&self) -> u32 {
        self.pending.len() as u32
    }

    /// Ids of every currently connected player, ascending.
    pub fn roster(&self) -> Vec<RelayPlayerId> {
        self.pending.keys().copied().collect()
    }

    /// Store `mv` in the slot of every player except the mover. An
    /// unconsumed earlier move is overwritten — the slot holds the latest
    /// submission only.
    pub fn submit_move(&mut self, mv: RelayMove) {
        debug!(
            "move from player {} at ({}, {})",
            mv.player_id.0, mv.col, mv.row
        );
        for (id, slot) in &mut self.pending {
            if *id != mv.player_id {
                *slot = Some(mv);
            }
        }
    }

    /// Take (and clear) the move waiting for `player_id`, if any.
    pub fn take_pending(&mut self, player_id: RelayPlayerId) -> Option<RelayMove> {
        self.pending.get_mut(&player_id).and_then(Option::take)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(player: u32, col: u8, row: u8) -> RelayMove {
        RelayMove {
            player_id: RelayPlayerId(player),
            col,
            row,
        }
    }

    #[test]
    fn ids_increase_monotonically() {
        let mut state = RelayState::new(4);
        assert_eq!(state.register(), Ok(RelayPlayerId(0)));
        assert_eq!(state.register(), Ok(RelayPlayerId(1)));
        assert_eq!(state.register(), Ok(RelayPlayerId(2)));
    }

    #[test]
    fn ids_are_not_reused_after_disconnect() {
        let mut state = RelayState::new(4);
        let first = state.register().unwrap();
        state.disconnect(first);
        assert_eq!(state.register(), Ok(RelayPlayerId(1)));
    }

    #[test]
    fn register_fails_when_full() {
        let mut state = RelayState::new(2);
        state.register().unwrap();
        state.register().unwrap();
        assert_eq!(state.register(), Err("relay is full".to_string()));
        // A disconnect frees a slot again.
        state.disconnect(RelayPlayerId(0));
        assert_eq!(state.register(), Ok(RelayPlayerId(2)));
    }

    #[test]
    fn roster_tracks_connected_players() {
        let mut state = RelayState::new(4);
        state.register().unwrap();
        state.register().unwrap();
        state.register().unwrap();
        state.disconnect(RelayPlayerId(1));
        assert_eq!(state.roster(), vec![RelayPlayerId(0), RelayPlayerId(2)]);
        assert_eq!(state.connected_count(), 2);
    }

    #[test]
    fn submit_fans_out_to_everyone_but_the_mover() {
        let mut state = RelayState::new(4);
        state.register().unwrap();
        state.register().unwrap();
        state.register().unwrap();

        state.submit_move(mv(0, 5, 5));
        assert_eq!(state.take_pending(RelayPlayerId(0)), None);
        assert_eq!(state.take_pending(RelayPlayerId(1)), Some(mv(0, 5, 5)));
        assert_eq!(state.take_pending(RelayPlayerId(2)), Some(mv(0, 5, 5)));
    }

    #[test]
    fn take_pending_clears_the_slot() {
        let mut state = RelayState::new(2);
        state.register().unwrap();
        state.register().unwrap();

        state.submit_move(mv(0, 5, 5));
        assert_eq!(state.take_pending(RelayPlayerId(1)), Some(mv(0, 5, 5)));
        assert_eq!(state.take_pending(RelayPlayerId(1)), None);
    }

    #[test]
    fn second_submission_overwrites_an_unconsumed_first() {
        let mut state = RelayState::new(2);
        state.register().unwrap();
        state.register().unwrap();

        state.submit_move(mv(0, 5, 5));
        state.submit_move(mv(0, 5, 6));
        // The earlier move is gone, by design.
        assert_eq!(state.take_pending(RelayPlayerId(1)), Some(mv(0, 5, 6)));
        assert_eq!(state.take_pending(RelayPlayerId(1)), None);
    }

    #[test]
    fn take_pending_for_unknown_player_is_none() {
        let mut state = RelayState::new(2);
        assert_eq!(state.take_pending(RelayPlayerId(9)), None);
    }
}
