use crate::types::{Color, Orientation};

/// Largest supported number of rows or columns
pub const MAX_SIDE: usize = 8;

/// Unit steps in all eight directions, as `(delta_row, delta_col)`
pub const STEP_DELTAS: [(isize, isize); 8] = [
    (1, -1),
    (1, 0),
    (1, 1),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (2, -1),
    (2, 1),
    (1, -2),
    (1, 2),
    (-1, -2),
    (-1, 2),
    (-2, -1),
    (-2, 1),
];

pub const STRAIGHT_DIRS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

pub const DIAGONAL_DIRS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Row direction in which pawns of color `c` advance
///
/// With White at the bottom, White pawns move towards row `0`.
pub const fn pawn_forward(o: Orientation, c: Color) -> isize {
    -o.sign() * c.sign()
}

/// Row on which a pawn moving in direction `forward` gets promoted
pub const fn promotion_row(forward: isize, rows: usize) -> usize {
    if forward < 0 {
        0
    } else {
        rows - 1
    }
}

/// Row from which a pawn moving in direction `forward` may make a double step
///
/// Returns `None` if the board is too short to have such a row.
pub const fn double_step_row(forward: isize, rows: usize) -> Option<usize> {
    if forward > 0 {
        Some(1)
    } else {
        rows.checked_sub(2)
    }
}
