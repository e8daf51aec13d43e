use super::{
    direction::Direction,
    grid::{Board, Cell},
    state::CollisionType,
};

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Cell>,
    /// Current direction of movement
    heading: Direction,
    /// Set by `grow`, consumed by the next `advance`
    pending_growth: bool,
}

impl Snake {
    /// Create a new snake with its head at `head` and the rest of the body
    /// trailing behind it. A length of 0 is treated as 1.
    pub fn new(head: Cell, heading: Direction, length: usize) -> Self {
        let (back_dx, back_dy) = heading.opposite().delta();
        let mut body = Vec::with_capacity(length.max(1));
        body.push(head);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self {
            body,
            heading,
            pending_growth: false,
        }
    }

    /// Get the head cell
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Cell] {
        &self.body
    }

    /// Segments excluding the head
    pub fn body_segments(&self) -> &[Cell] {
        &self.body[1..]
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Whether the next `advance` will add a segment
    pub fn is_growing(&self) -> bool {
        self.pending_growth
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false, a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// The cell the head will enter on the next `advance`
    pub fn next_head(&self) -> Cell {
        self.head().moved_in_direction(self.heading)
    }

    /// Change heading. A 180-degree turn is ignored and returns false.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.heading.is_opposite(direction) {
            return false;
        }
        self.heading = direction;
        true
    }

    /// Queue one segment of growth for the next `advance`
    pub fn grow(&mut self) {
        self.pending_growth = true;
    }

    /// Move one cell along the heading, keeping the tail if growth is
    /// pending. Returns the tail cell the move vacated, if any.
    pub fn advance(&mut self) -> Option<Cell> {
        let new_head = self.next_head();
        self.body.insert(0, new_head);

        if self.pending_growth {
            self.pending_growth = false;
            None
        } else {
            self.body.pop()
        }
    }

    /// Put back a tail cell vacated by the last `advance`, growing by one.
    /// If the head moved into that cell the two overlap until the next move.
    pub fn extend_tail(&mut self, cell: Cell) {
        self.body.push(cell);
    }

    /// Wall or self collision of the current head, wall first
    pub fn collision(&self, board: &Board) -> Option<CollisionType> {
        let head = self.head();

        if !board.contains(head) {
            return Some(CollisionType::Wall);
        }

        if self.body_segments().contains(&head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// True iff the head is off the board or on another segment
    pub fn check_collision(&self, board: &Board) -> bool {
        self.collision(board).is_some()
    }
}
