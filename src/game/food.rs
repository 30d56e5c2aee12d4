use rand::Rng;

use super::state::{Position, Snake};

/// The single piece of food on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Place fresh food on a random cell the snake does not cover
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, cell_count: i32, snake: &Snake) -> Self {
        Self::new(Self::random_cell_excluding(rng, cell_count, snake))
    }

    /// Move the food to a random free cell and return where it landed
    pub fn reposition<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        cell_count: i32,
        snake: &Snake,
    ) -> Position {
        self.position = Self::random_cell_excluding(rng, cell_count, snake);
        self.position
    }

    /// Uniformly sample cells until one is not covered by the snake.
    ///
    /// There is no retry bound; the board must have at least one free cell.
    pub fn random_cell_excluding<R: Rng + ?Sized>(
        rng: &mut R,
        cell_count: i32,
        snake: &Snake,
    ) -> Position {
        loop {
            let pos = Position::new(rng.gen_range(0..cell_count), rng.gen_range(0..cell_count));

            if !snake.contains_position(pos) {
                return pos;
            }
        }
    }
}
