//! Food entity logic.
//!
//! Food is placed uniformly at random on a cell the snake does not occupy.

use rand::Rng;
use rand::seq::IteratorRandom;

use crate::game::entities::snake::Snake;
use crate::game::grid::Grid;
use crate::game::types::Vector2;

/// Pick a random empty cell for the next food item.
/// Returns `None` when the snake covers the whole board.
pub fn spawn_food<R: Rng + ?Sized>(grid: &Grid, snake: &Snake, rng: &mut R) -> Option<Vector2> {
    grid.cells()
        .filter(|cell| !snake.is_colliding(*cell))
        .choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use crate::game::types::Direction;

    #[test]
    fn test_food_never_on_snake() {
        let grid = Grid::new(12, 12);
        let snake = Snake::spawn();
        let mut rng = rand::rng();
        for _ in 0..500 {
            let food = spawn_food(&grid, &snake, &mut rng).expect("board has empty cells");
            assert!(!snake.is_colliding(food));
            assert!(grid.is_within_boundaries(food));
        }
    }

    #[test]
    fn test_food_distribution_is_uniform() {
        // 3x3 board, snake on the top row: six empty cells.
        let grid = Grid::new(3, 3);
        let snake = Snake::spawn();
        let mut rng = StdRng::seed_from_u64(42);
        let trials = 6000;
        let mut counts: HashMap<Vector2, u32> = HashMap::new();
        for _ in 0..trials {
            let food = spawn_food(&grid, &snake, &mut rng).expect("board has empty cells");
            *counts.entry(food).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        for (cell, count) in counts {
            assert!(cell.y > 0);
            assert!((800..=1200).contains(&count), "cell {:?} drawn {} times", cell, count);
        }
    }

    #[test]
    fn test_full_board_has_no_food_cell() {
        let grid = Grid::new(1, 3);
        let snake = Snake::new(
            [Vector2::new(2, 0), Vector2::new(1, 0), Vector2::new(0, 0)],
            Direction::Right,
        );
        assert!(spawn_food(&grid, &snake, &mut rand::rng()).is_none());
    }
}
