// The 11×11 card grid and its selectability rules.
//
// Storage is a flat `Vec<Option<Card>>` indexed by `col + row * GRID_SIZE`,
// giving O(1) read/write access. Out-of-bounds reads come back empty;
// out-of-bounds writes are no-ops.
//
// Selectability — the cells where a card of value `v` may land this turn:
// - before the first placement, only the center cell;
// - an occupied cell whose value is strictly below `v` (overwrite works
//   anywhere on the board, no adjacency required);
// - an empty cell touching any occupied cell on one of its 8 Moore
//   neighbors (the empty cell always loses the value comparison, so no
//   further check is needed).
//
// A separate mark layer records the selectable set for rendering, tagged
// with the acting player so the UI can color the highlights. Marks are
// transient: cleared and restamped on every turn change.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::{CENTER, Card, CardValue, GRID_SIZE, GridPos, PlayerId};

/// The shared playing field.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    /// Flat storage: index = col + row * GRID_SIZE.
    cells: Vec<Option<Card>>,
    /// True only before any card has been placed.
    first_move: bool,
    /// Render-only highlight layer; `Some(p)` means "selectable this turn,
    /// shown in player p's color".
    marks: Vec<Option<PlayerId>>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: vec![None; GRID_SIZE * GRID_SIZE],
            first_move: true,
            marks: vec![None; GRID_SIZE * GRID_SIZE],
        }
    }

    pub fn in_bounds(pos: GridPos) -> bool {
        (pos.col as usize) < GRID_SIZE && (pos.row as usize) < GRID_SIZE
    }

    /// Convert a coordinate to a flat index. Returns `None` if out of bounds.
    fn index(pos: GridPos) -> Option<usize> {
        if Self::in_bounds(pos) {
            Some(pos.col as usize + pos.row as usize * GRID_SIZE)
        } else {
            None
        }
    }

    /// Read a cell. Out-of-bounds reads come back empty.
    pub fn get(&self, pos: GridPos) -> Option<Card> {
        Self::index(pos).and_then(|i| self.cells[i])
    }

    /// Place a card, destructively overwriting whatever was there, and
    /// clear the first-move flag. No-op for out-of-bounds coordinates.
    pub fn set(&mut self, pos: GridPos, card: Card) {
        if let Some(i) = Self::index(pos) {
            self.cells[i] = Some(card);
            self.first_move = false;
        }
    }

    /// True only before any card has been placed.
    pub fn first_move(&self) -> bool {
        self.first_move
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// All positions in row-major order.
    pub fn positions() -> impl Iterator<Item = GridPos> {
        (0..GRID_SIZE)
            .flat_map(|row| (0..GRID_SIZE).map(move |col| GridPos::new(col as u8, row as u8)))
    }

    /// The Moore neighbors of `pos` that fall inside the grid.
    fn neighbors(pos: GridPos) -> SmallVec<[GridPos; 8]> {
        let mut out = SmallVec::new();
        for d_col in -1i16..=1 {
            for d_row in -1i16..=1 {
                if (d_col, d_row) == (0, 0) {
                    continue;
                }
                let col = pos.col as i16 + d_col;
                let row = pos.row as i16 + d_row;
                if col < 0 || row < 0 {
                    continue;
                }
                let candidate = GridPos::new(col as u8, row as u8);
                if Self::in_bounds(candidate) {
                    out.push(candidate);
                }
            }
        }
        out
    }

    /// Cells where a card of value `value` may legally land this turn, in
    /// row-major order.
    pub fn selectable_cells(&self, value: CardValue) -> Vec<GridPos> {
        if self.first_move {
            return vec![CENTER];
        }
        Self::positions()
            .filter(|&pos| self.is_selectable(pos, value))
            .collect()
    }

    fn is_selectable(&self, pos: GridPos, value: CardValue) -> bool {
        match self.get(pos) {
            // Occupied: strictly weaker cards can be overwritten, anywhere.
            Some(card) => card.value < value,
            // Empty: legal iff some Moore neighbor is occupied.
            None => Self::neighbors(pos).iter().any(|&n| self.get(n).is_some()),
        }
    }

    /// Stamp the render highlight layer with the selectable set for the
    /// acting player's drawn value. Callers run `clear_selectable_marks`
    /// first; stale marks from a previous turn are never overwritten here.
    pub fn apply_selectable_marks(&mut self, value: CardValue, owner: PlayerId) {
        for pos in self.selectable_cells(value) {
            if let Some(i) = Self::index(pos) {
                self.marks[i] = Some(owner);
            }
        }
    }

    /// Drop all highlights.
    pub fn clear_selectable_marks(&mut self) {
        self.marks.fill(None);
    }

    /// The highlight at `pos`: the acting player whose card may land there
    /// this turn, if the cell is selectable.
    pub fn selectable_mark(&self, pos: GridPos) -> Option<PlayerId> {
        Self::index(pos).and_then(|i| self.marks[i])
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
