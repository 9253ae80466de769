// The turn state machine.
//
// `GameState` owns the board and the seats and advances play: the current
// seat holds a drawn card, a legal placement overwrites the target cell,
// and the turn passes round-robin to the next seat, which draws and gets a
// fresh selectable set. Win checking is a separate caller-invoked query so
// the embedding layer decides when a round ends and when to re-render.
//
// `GameState` is single-threaded by design: one control loop per process
// owns it and serializes local input against relayed peer moves. In a
// networked game every client constructs its state from the same seed, so
// all deck orders match and a relayed move replays through the same
// `place_card` path as a local one.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::player::Player;
use crate::rng::GameRng;
use crate::types::{Card, GridPos, PlayerId, goal_for};
use crate::win;

/// The full game: seats in turn order, the shared board, the win goal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    players: Vec<Player>,
    current: usize,
    board: Board,
    goal: usize,
}

impl GameState {
    /// Start a fresh game. All decks shuffle from a single seeded stream,
    /// so two states built with equal `(n_players, seed)` agree on every
    /// draw of every player.
    ///
    /// Panics if `n_players` is outside 2..=4.
    pub fn new(n_players: usize, seed: u64) -> Self {
        assert!(
            (2..=4).contains(&n_players),
            "punto seats 2 to 4 players, got {n_players}"
        );
        let mut rng = GameRng::new(seed);
        let players: Vec<Player> = (0..n_players)
            .map(|p| Player::new(PlayerId(p as u8), &mut rng))
            .collect();
        let mut state = Self {
            players,
            current: 0,
            board: Board::new(),
            goal: goal_for(n_players),
        };
        state.begin_turn();
        state
    }

    /// Hand the turn to `self.current`: set the flag, draw, restamp the
    /// selectable highlights for the drawn value.
    fn begin_turn(&mut self) {
        let player = &mut self.players[self.current];
        player.set_playing(true);
        // 18 cards per seat against a 121-cell board: a winning run always
        // lands before any deck runs dry.
        let value = player
            .draw_card()
            .expect("deck exhausted before a winning run");
        let owner = player.id();
        self.board.clear_selectable_marks();
        self.board.apply_selectable_marks(value, owner);
    }

    /// Try to place the current player's drawn card at `pos`.
    ///
    /// Returns `false` — changing nothing — when `pos` is not selectable
    /// for the drawn value: an ignored input, not an error. On success the
    /// target cell is overwritten (weaker cards are discarded), the turn
    /// passes to the next seat, and that seat's draw recomputes the
    /// selectable set.
    pub fn place_card(&mut self, pos: GridPos) -> bool {
        let Some(value) = self.players[self.current].current_card() else {
            return false;
        };
        if !self.board.selectable_cells(value).contains(&pos) {
            return false;
        }
        let owner = self.players[self.current].id();
        self.board.set(pos, Card { owner, value });
        self.advance_turn();
        true
    }

    fn advance_turn(&mut self) {
        self.players[self.current].set_playing(false);
        self.current = (self.current + 1) % self.players.len();
        self.begin_turn();
    }

    /// Scan for a winning run. Callers run this after every successful
    /// placement; the state machine never ends the game on its own.
    pub fn check_winner(&self) -> Option<PlayerId> {
        win::find_winner(&self.board, self.goal)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn goal(&self) -> usize {
        self.goal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CENTER;

    /// The first selectable cell for the current player's drawn card.
    fn any_selectable(state: &GameState) -> GridPos {
        let value = state.current_player().current_card().unwrap();
        state.board().selectable_cells(value)[0]
    }

    #[test]
    fn two_player_game_has_goal_five() {
        assert_eq!(GameState::new(2, 42).goal(), 5);
        assert_eq!(GameState::new(3, 42).goal(), 4);
        assert_eq!(GameState::new(4, 42).goal(), 4);
    }

    #[test]
    fn player_zero_opens_the_game() {
        let state = GameState::new(2, 42);
        assert_eq!(state.current_player().id(), PlayerId(0));
        assert!(state.current_player().is_playing());
        assert!(state.current_player().current_card().is_some());
        assert!(!state.players()[1].is_playing());
        assert_eq!(state.players()[1].current_card(), None);
    }

    #[test]
    fn first_placement_must_hit_the_center() {
        let mut state = GameState::new(2, 42);
        assert!(!state.place_card(GridPos::new(4, 4)));
        assert!(!state.place_card(GridPos::new(0, 0)));
        // Still player 0's turn, board untouched.
        assert_eq!(state.current_player().id(), PlayerId(0));
        assert_eq!(state.board().get(CENTER), None);
        assert!(state.place_card(CENTER));
    }

    #[test]
    fn successful_placement_records_owner_and_value() {
        let mut state = GameState::new(2, 42);
        let value = state.current_player().current_card().unwrap();
        assert!(state.place_card(CENTER));
        assert_eq!(
            state.board().get(CENTER),
            Some(Card {
                owner: PlayerId(0),
                value,
            })
        );
    }

    #[test]
    fn turn_passes_round_robin() {
        let mut state = GameState::new(3, 7);
        for expected in [0u8, 1, 2, 0, 1] {
            assert_eq!(state.current_player().id(), PlayerId(expected));
            let pos = any_selectable(&state);
            assert!(state.place_card(pos));
        }
    }

    #[test]
    fn exactly_one_player_holds_the_turn() {
        let mut state = GameState::new(4, 99);
        for _ in 0..10 {
            let playing: Vec<PlayerId> = state
                .players()
                .iter()
                .filter(|p| p.is_playing())
                .map(Player::id)
                .collect();
            assert_eq!(playing, vec![state.current_player().id()]);
            let pos = any_selectable(&state);
            assert!(state.place_card(pos));
        }
    }

    #[test]
    fn placement_draws_for_the_next_player() {
        let mut state = GameState::new(2, 42);
        assert!(state.place_card(CENTER));
        let next = state.current_player();
        assert_eq!(next.id(), PlayerId(1));
        assert!(next.current_card().is_some());
        assert_eq!(next.cards_left(), 17);
    }

    #[test]
    fn rejected_placement_changes_nothing() {
        let mut state = GameState::new(2, 42);
        assert!(state.place_card(CENTER));
        let before = serde_json::to_string(&state).unwrap();
        // A far-away empty cell is not adjacent to anything.
        assert!(!state.place_card(GridPos::new(0, 0)));
        let after = serde_json::to_string(&state).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn marks_are_restamped_for_the_new_turn() {
        let mut state = GameState::new(2, 42);
        assert!(state.place_card(CENTER));
        let value = state.current_player().current_card().unwrap();
        let selectable = state.board().selectable_cells(value);
        for pos in Board::positions() {
            let expected = selectable.contains(&pos).then_some(PlayerId(1));
            assert_eq!(state.board().selectable_mark(pos), expected);
        }
    }

    #[test]
    fn no_winner_early_in_the_game() {
        let mut state = GameState::new(2, 42);
        assert_eq!(state.check_winner(), None);
        assert!(state.place_card(CENTER));
        assert_eq!(state.check_winner(), None);
    }

    #[test]
    fn same_seed_runs_identically() {
        let mut a = GameState::new(2, 1234);
        let mut b = GameState::new(2, 1234);
        for _ in 0..12 {
            assert_eq!(
                a.current_player().current_card(),
                b.current_player().current_card()
            );
            let pos = any_selectable(&a);
            assert!(a.place_card(pos));
            assert!(b.place_card(pos));
        }
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    #[should_panic(expected = "punto seats 2 to 4 players")]
    fn rejects_a_single_player() {
        let _ = GameState::new(1, 42);
    }
}
