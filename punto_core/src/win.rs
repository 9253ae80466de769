// Winning-run detection.
//
// A transient owner matrix is rebuilt from the board on every call and
// scanned line by line: all rows, then all columns, then the diagonals
// running down-right, then the diagonals running down-left (including the
// corner-truncated ones long enough to matter). Within a line a run grows
// while consecutive cells share an owner, resets to zero on an empty cell,
// and restarts at one when the owner changes. The first run to reach the
// goal decides the game, so the scan order doubles as the tie-break
// between simultaneous winning lines of different owners.

use crate::board::Board;
use crate::types::{GRID_SIZE, PlayerId};

/// Scan the whole board for a run of at least `goal` same-owner cells.
pub fn find_winner(board: &Board, goal: usize) -> Option<PlayerId> {
    let owners = owner_matrix(board);

    // Rows.
    for row in 0..GRID_SIZE {
        let line = (0..GRID_SIZE).map(|col| owners[col + row * GRID_SIZE]);
        if let Some(winner) = scan_line(line, goal) {
            return Some(winner);
        }
    }

    // Columns.
    for col in 0..GRID_SIZE {
        let line = (0..GRID_SIZE).map(|row| owners[col + row * GRID_SIZE]);
        if let Some(winner) = scan_line(line, goal) {
            return Some(winner);
        }
    }

    // Diagonals running down-right, anchored on the top row and left column.
    let mut down_right: Vec<(usize, usize)> = (0..GRID_SIZE).map(|col| (col, 0)).collect();
    down_right.extend((1..GRID_SIZE).map(|row| (0, row)));
    for (col0, row0) in down_right {
        let len = GRID_SIZE - col0.max(row0);
        if len < goal {
            continue; // too short to hold a winning run
        }
        let line = (0..len).map(|k| owners[(col0 + k) + (row0 + k) * GRID_SIZE]);
        if let Some(winner) = scan_line(line, goal) {
            return Some(winner);
        }
    }

    // Diagonals running down-left, anchored on the top row and right column.
    let mut down_left: Vec<(usize, usize)> = (0..GRID_SIZE).map(|col| (col, 0)).collect();
    down_left.extend((1..GRID_SIZE).map(|row| (GRID_SIZE - 1, row)));
    for (col0, row0) in down_left {
        let len = (col0 + 1).min(GRID_SIZE - row0);
        if len < goal {
            continue;
        }
        let line = (0..len).map(|k| owners[(col0 - k) + (row0 + k) * GRID_SIZE]);
        if let Some(winner) = scan_line(line, goal) {
            return Some(winner);
        }
    }

    None
}

/// Flatten the board into owners only; card values play no part in winning.
fn owner_matrix(board: &Board) -> Vec<Option<PlayerId>> {
    let mut owners = vec![None; GRID_SIZE * GRID_SIZE];
    for pos in Board::positions() {
        if let Some(card) = board.get(pos) {
            owners[pos.col as usize + pos.row as usize * GRID_SIZE] = Some(card.owner);
        }
    }
    owners
}

/// Run scan over one line. An empty cell resets the run; a change of owner
/// restarts it at one.
fn scan_line(line: impl Iterator<Item = Option<PlayerId>>, goal: usize) -> Option<PlayerId> {
    let mut run_owner: Option<PlayerId> = None;
    let mut run_len = 0usize;
    for cell in line {
        match cell {
            None => {
                run_owner = None;
                run_len = 0;
            }
            Some(owner) => {
                if run_owner == Some(owner) {
                    run_len += 1;
                } else {
                    run_owner = Some(owner);
                    run_len = 1;
                }
                if run_len >= goal {
                    return Some(owner);
                }
            }
        }
    }
    None
}
