// Screen-space layout for the input/render layer.
//
// The state machine reasons purely in cell coordinates; this module holds
// the one agreed mapping between window pixels and `GridPos` so that hit
// testing and rendering use identical geometry. A click maps to a cell via
// `floor((screen - margin) / (card + spacing))`, and counts only when it
// lands inside the card square itself — the spacing gaps and margins miss.

use crate::types::{GRID_SIZE, GridPos};

/// Card square edge, in pixels.
pub const CARD_SIZE: i32 = 30;
/// Gap between adjacent cards, in pixels.
pub const SPACING: i32 = 10;
/// Window edge length, in pixels.
pub const WINDOW: i32 = 500;
/// Outer margin centering the grid in the window.
pub const MARGIN: i32 =
    (WINDOW - GRID_SIZE as i32 * CARD_SIZE - (GRID_SIZE as i32 - 1) * SPACING) / 2;

/// Top-left pixel of the card square at `pos`.
pub const fn cell_origin(pos: GridPos) -> (i32, i32) {
    (
        MARGIN + pos.col as i32 * (CARD_SIZE + SPACING),
        MARGIN + pos.row as i32 * (CARD_SIZE + SPACING),
    )
}

/// Map a window pixel to the board cell whose card square contains it.
pub fn cell_at(x: i32, y: i32) -> Option<GridPos> {
    let col = axis_cell(x)?;
    let row = axis_cell(y)?;
    Some(GridPos::new(col, row))
}

fn axis_cell(screen: i32) -> Option<u8> {
    let offset = screen - MARGIN;
    if offset < 0 {
        return None;
    }
    let pitch = CARD_SIZE + SPACING;
    let cell = offset / pitch;
    if cell >= GRID_SIZE as i32 || offset % pitch >= CARD_SIZE {
        return None;
    }
    Some(cell as u8)
}
