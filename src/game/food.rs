use rand::{Rng, seq::SliceRandom};

use super::{
    grid::{Board, Cell},
    snake::Snake,
};

/// The single food item on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    position: Cell,
}

impl Food {
    /// Spawn food at a random cell
    pub fn new<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Self {
        Self {
            position: board.random_cell(rng),
        }
    }

    /// Spawn food at a random cell not covered by the snake
    pub fn avoiding<R: Rng + ?Sized>(board: &Board, snake: &Snake, rng: &mut R) -> Self {
        let mut food = Self::at(snake.head());
        food.respawn_avoiding(board, snake, rng);
        food
    }

    /// Food at a fixed cell
    pub fn at(position: Cell) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Move to a uniformly random cell. The snake is not excluded, so food
    /// can land underneath it.
    pub fn respawn<R: Rng + ?Sized>(&mut self, board: &Board, rng: &mut R) {
        self.position = board.random_cell(rng);
    }

    /// Move to a uniformly random cell not covered by the snake. Falls back
    /// to `respawn` when the snake fills the board.
    pub fn respawn_avoiding<R: Rng + ?Sized>(&mut self, board: &Board, snake: &Snake, rng: &mut R) {
        let free: Vec<Cell> = board.cells().filter(|cell| !snake.occupies(*cell)).collect();

        match free.choose(rng) {
            Some(cell) => self.position = *cell,
            None => self.respawn(board, rng),
        }
    }
}
