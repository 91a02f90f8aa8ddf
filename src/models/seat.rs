//! Seat grid dimensions and status values.
//!
//! The grid is a fixed 5x5 matrix per movie, fully materialized at seed time.
//! Statuses are stored as integers; a seat has no other states (no holds,
//! no expiry).

pub const GRID_ROWS: i64 = 5;
pub const GRID_COLS: i64 = 5;

pub const AVAILABLE: i64 = 0;
pub const BOOKED: i64 = 1;

/// True when (row, col) lies inside the fixed grid.
pub fn in_bounds(row: i64, col: i64) -> bool {
    (0..GRID_ROWS).contains(&row) && (0..GRID_COLS).contains(&col)
}
