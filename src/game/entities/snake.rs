//! Snake entity logic.
//!
//! A snake is an ordered list of segments (head first) plus the direction it will
//! travel on the next tick. Its length never decreases during a Game.

use std::collections::VecDeque;

use crate::config::game::{SNAKE_INITIAL_LENGTH, SNAKE_START_SEGMENTS};
use crate::game::types::{Direction, Vector2};

#[derive(Debug, Clone)]
pub struct Snake {
    segments: VecDeque<Vector2>,
    direction: Direction,
}

impl Snake {
    /// Build a snake from explicit segments (head first).
    pub fn new(segments: impl IntoIterator<Item = Vector2>, direction: Direction) -> Self {
        let segments: VecDeque<Vector2> = segments.into_iter().collect();
        assert!(!segments.is_empty(), "snake needs at least one segment");
        Self { segments, direction }
    }

    /// Snake in its configured starting position, heading Right.
    pub fn spawn() -> Self {
        Self::new(SNAKE_START_SEGMENTS.map(Vector2::from), Direction::Right)
    }

    pub fn segments(&self) -> impl Iterator<Item = Vector2> + '_ {
        self.segments.iter().copied()
    }

    pub fn head(&self) -> Vector2 {
        self.segments[0]
    }

    pub fn length(&self) -> usize {
        self.segments.len()
    }

    /// Number of food items eaten so far.
    pub fn growth(&self) -> u32 {
        self.segments.len().saturating_sub(SNAKE_INITIAL_LENGTH) as u32
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn move_vector(&self) -> Vector2 {
        self.direction.vector()
    }

    /// Change the pending direction. Returns whether it was applied.
    ///
    /// The base rule rejects a direction whose dot product with the pending one
    /// is negative. On top of that, this also rejects a direction opposing the way
    /// the head last travelled (head minus neck), which the base rule alone lets
    /// through when two turns arrive within one tick (Right, Down, Left).
    pub fn update_move_direction(&mut self, direction: Direction) -> bool {
        let wanted = direction.vector();
        if self.move_vector().dot(wanted) < 0 {
            return false;
        }
        if let Some(heading) = self.heading() {
            if heading.dot(wanted) < 0 {
                return false;
            }
        }
        self.direction = direction;
        true
    }

    pub fn next_head_position(&self) -> Vector2 {
        self.head() + self.move_vector()
    }

    /// Shift every segment onto its predecessor and advance the head.
    pub fn advance(&mut self) {
        let next = self.next_head_position();
        self.segments.pop_back();
        self.segments.push_front(next);
    }

    /// Add a new head at the next position, keeping the tail.
    pub fn grow(&mut self) {
        let next = self.next_head_position();
        self.segments.push_front(next);
    }

    pub fn is_colliding(&self, p: Vector2) -> bool {
        self.segments.contains(&p)
    }

    /// Direction of the last step taken (head minus neck), if the snake has a neck.
    fn heading(&self) -> Option<Vector2> {
        let neck = self.segments.get(1)?;
        Some(Vector2::new(self.head().x - neck.x, self.head().y - neck.y))
    }
}
