use rand::Rng;

use super::direction::Direction;

/// A cell on the game grid, in grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell offset by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Neighbouring cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Largest board side, matching terminal coordinates
pub const MAX_SIDE: usize = u16::MAX as usize;

/// Board dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
}

impl Board {
    /// Sides are clamped to `MAX_SIDE`, so every cell fits an `i32`
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.min(MAX_SIDE),
            height: height.min(MAX_SIDE),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells on the board
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Check if a cell is within `[0, width) x [0, height)`
    pub fn contains(&self, cell: Cell) -> bool {
        usize::try_from(cell.x).is_ok_and(|x| x < self.width)
            && usize::try_from(cell.y).is_ok_and(|y| y < self.height)
    }

    /// Uniformly random cell, x and y drawn independently.
    ///
    /// The board must not be empty.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        let x = rng.gen_range(0..self.width) as i32;
        let y = rng.gen_range(0..self.height) as i32;
        Cell::new(x, y)
    }

    /// Every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let width = self.width as i32;
        (0..self.height as i32).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }

    /// Row at the vertical centre of the board
    pub fn center_row(&self) -> i32 {
        (self.height / 2) as i32
    }
}
