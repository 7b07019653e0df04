//! One player's round inside a room.
//!
//! A Game owns a snake, the current food position and its status. It advances one
//! step per call to [`Game::update_state`] while Running.

use log::debug;

use crate::game::entities::{spawn_food, Snake};
use crate::game::grid::Grid;
use crate::game::types::{Direction, GameSnapshot, GameStatus, PlayerId, Vector2};

#[derive(Debug, Clone)]
pub struct Game {
    pub(crate) player_id: PlayerId,
    pub(crate) grid: Grid,
    pub(crate) snake: Snake,
    pub(crate) food: Vector2,
    pub(crate) status: GameStatus,
    pub(crate) just_ate_food: bool,
}

impl Game {
    pub fn new(player_id: PlayerId, grid: Grid) -> Self {
        let snake = Snake::spawn();
        let food = spawn_food(&grid, &snake, &mut rand::rng())
            .expect("a new game needs at least one empty cell for food");
        Self {
            player_id,
            grid,
            snake,
            food,
            status: GameStatus::Initialized,
            just_ate_food: false,
        }
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[cfg(test)]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[cfg(test)]
    pub fn food(&self) -> Vector2 {
        self.food
    }

    /// Initialized -> Running. Returns false if the game was already started.
    pub fn start(&mut self) -> bool {
        if self.status != GameStatus::Initialized {
            return false;
        }
        self.status = GameStatus::Running;
        true
    }

    /// Force the game into Finished (player left). Returns false if already finished.
    /// Any food eaten on the last tick no longer counts as news.
    pub fn finish(&mut self) -> bool {
        if self.status == GameStatus::Finished {
            return false;
        }
        self.status = GameStatus::Finished;
        self.just_ate_food = false;
        true
    }

    pub fn update_move_direction(&mut self, direction: Direction) -> bool {
        let applied = self.snake.update_move_direction(direction);
        if !applied {
            debug!("[Game] {} ignored {:?}, keeping {:?}", self.player_id, direction, self.snake.direction());
        }
        applied
    }

    /// Advance the simulation by one tick. No-op unless Running.
    pub fn update_state(&mut self) {
        if self.status != GameStatus::Running {
            return;
        }
        self.just_ate_food = false;

        let next = self.snake.next_head_position();
        if !self.grid.is_within_boundaries(next) || self.snake.is_colliding(next) {
            debug!("[Game] {} collided at ({}, {})", self.player_id, next.x, next.y);
            self.status = GameStatus::Finished;
        } else if next == self.food {
            self.snake.grow();
            self.just_ate_food = true;
            match spawn_food(&self.grid, &self.snake, &mut rand::rng()) {
                Some(food) => self.food = food,
                None => {
                    debug!("[Game] {} filled the board", self.player_id);
                    self.status = GameStatus::Finished;
                }
            }
        } else if self.grid.size() == self.snake.length() + 1 {
            debug!("[Game] {} has no room left to grow", self.player_id);
            self.status = GameStatus::Finished;
        } else {
            self.snake.advance();
        }
    }

    /// Snapshot for the current tick; score and food only when food was just eaten.
    pub fn current_state(&self) -> GameSnapshot {
        GameSnapshot {
            player_id: self.player_id.clone(),
            segments: self.snake.segments().collect(),
            score: self.just_ate_food.then(|| self.snake.growth()),
            food: self.just_ate_food.then_some(self.food),
        }
    }

    /// Full snapshot sent before the first tick, always carrying score and food.
    pub fn initial_state(&self) -> GameSnapshot {
        GameSnapshot {
            score: Some(self.snake.growth()),
            food: Some(self.food),
            ..self.current_state()
        }
    }
}
