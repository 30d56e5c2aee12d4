use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::food::Food;

/// A cell on the game grid
///
/// Valid cells lie in `[0, cell_count)` on both axes. A head one step past
/// an edge (`-1` or `cell_count`) is how a wall hit shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: VecDeque<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a straight snake with `length` segments trailing behind `head`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();

        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn contains_position(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body.iter().skip(1).any(|segment| *segment == pos)
    }

    /// Advance one cell in the current direction.
    ///
    /// The tail is kept when `grow` is set, so the body gains one segment.
    pub fn move_snake(&mut self, grow: bool) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.push_front(new_head);

        if !grow {
            self.body.pop_back();
        }
    }

    /// Restore the snake to a freshly spawned one
    pub fn reset(&mut self, head: Position, direction: Direction, length: usize) {
        *self = Self::new(head, direction, length);
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// Waiting for a directional input to resume
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub cell_count: i32,
    pub score: u32,
    pub steps: u32,
    /// Seconds between simulation ticks
    pub update_interval: f64,
    pub status: GameStatus,
    /// Food was eaten; the next move keeps the tail
    pub pending_growth: bool,
    /// A direction change was already accepted since the last tick
    pub direction_locked: bool,
}

impl GameState {
    /// Create a new running game state
    pub fn new(snake: Snake, food: Food, cell_count: i32, update_interval: f64) -> Self {
        Self {
            snake,
            food,
            cell_count,
            score: 0,
            steps: 0,
            update_interval,
            status: GameStatus::Running,
            pending_growth: false,
            direction_locked: false,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        (0..self.cell_count).contains(&pos.x) && (0..self.cell_count).contains(&pos.y)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.contains_position(pos)
    }
}
