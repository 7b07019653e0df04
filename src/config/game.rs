/// Game configuration constants.
///
/// This module defines the board dimensions and the snake's starting layout.
/// Every Game in every room is played on a board of this size.

/// Number of rows in the game grid.
pub const GRID_ROWS: i32 = 12;

/// Number of columns in the game grid.
pub const GRID_COLS: i32 = 12;

/// Length of a freshly spawned snake. Growth is measured against it.
pub const SNAKE_INITIAL_LENGTH: usize = 3;

/// Starting segments (head first) as `(x, y)` pairs. The snake heads Right.
pub const SNAKE_START_SEGMENTS: [(i32, i32); SNAKE_INITIAL_LENGTH] = [(2, 0), (1, 0), (0, 0)];
