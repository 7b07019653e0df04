use serde::{Serialize, Deserialize};

use crate::config::game::{GRID_COLS, GRID_ROWS};
use crate::game::types::Vector2;

/// Fixed board dimensions shared by every Game of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: i32,
    pub cols: i32,
}

impl Grid {
    /// Panics unless both dimensions are positive.
    pub const fn new(rows: i32, cols: i32) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
        Self { rows, cols }
    }

    /// Total number of cells. A grid built with a non-positive dimension has none.
    pub fn size(&self) -> usize {
        let rows = usize::try_from(self.rows).unwrap_or(0);
        let cols = usize::try_from(self.cols).unwrap_or(0);
        rows * cols
    }

    pub fn is_within_boundaries(&self, p: Vector2) -> bool {
        (0..self.cols).contains(&p.x) && (0..self.rows).contains(&p.y)
    }

    /// Every cell of the board, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Vector2> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| Vector2::new(x, y)))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(GRID_ROWS, GRID_COLS)
    }
}
