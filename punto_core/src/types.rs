// Core types shared across the game logic.
//
// Defines the board coordinate (`GridPos`), the seat and card-value
// newtypes, and the `Card` struct that occupies a cell. An empty cell is
// `None` at the board level — there is no sentinel "empty card" value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Board edge length. The grid is `GRID_SIZE × GRID_SIZE`.
pub const GRID_SIZE: usize = 11;

/// The fixed center cell — the only legal target before any card has been
/// placed.
pub const CENTER: GridPos = GridPos { col: 5, row: 5 };

/// 0-based seat index, stable for the lifetime of a game. Doubles as the
/// owner tag on placed cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// A card face value, 1..=9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardValue(pub u8);

impl fmt::Display for CardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A board coordinate: column then row, both in `[0, GRID_SIZE)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub col: u8,
    pub row: u8,
}

impl GridPos {
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// A placed card: owner seat plus face value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub owner: PlayerId,
    pub value: CardValue,
}

/// Run length required to win: 5 for a two-player game, 4 otherwise.
pub fn goal_for(n_players: usize) -> usize {
    if n_players == 2 { 5 } else { 4 }
}
