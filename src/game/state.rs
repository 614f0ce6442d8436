use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
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

/// Contents of a board cell. The discriminant is the value stored in the
/// observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cell {
    Empty = 0,
    Snake = 1,
    Food = 2,
}

impl Cell {
    /// Largest cell code that can appear on a board.
    pub const MAX: u8 = Cell::Food as u8;

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// The board observed by an agent.
///
/// Cells are stored row-major by `y` and the observation shape is
/// `(height, width, 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Board {
    /// Create an empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty.code(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Observation shape: `(height, width, channels)`
    pub fn shape(&self) -> [usize; 3] {
        [self.height, self.width, 1]
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.is_in_bounds(pos)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }

    /// Raw cell code at `pos`, `None` when off the board.
    pub fn get(&self, pos: Position) -> Option<u8> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Whether `pos` is on the board and holds `cell`.
    pub fn is(&self, pos: Position, cell: Cell) -> bool {
        self.get(pos) == Some(cell.code())
    }

    /// Write `cell` at `pos`. Off-board writes are ignored.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = cell.code();
        }
    }

    /// Every position currently holding `cell`, in row-major order
    pub fn positions_of(&self, cell: Cell) -> impl Iterator<Item = Position> + '_ {
        let code = cell.code();
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == code)
            .map(move |(idx, _)| Position::new((idx % width) as i32, (idx / width) as i32))
    }

    /// Row-major cell codes
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty.code());
    }
}

/// The snake in the game
///
/// Segments are ordered tail first, head last.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: Position) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Get the head position
    pub fn head(&self) -> Option<Position> {
        self.body.back().copied()
    }

    /// The segment directly behind the head, if the snake is longer than one
    pub fn neck(&self) -> Option<Position> {
        self.body.len().checked_sub(2).and_then(|idx| self.body.get(idx)).copied()
    }

    pub fn push_head(&mut self, pos: Position) {
        self.body.push_back(pos);
    }

    pub fn pop_tail(&mut self) -> Option<Position> {
        self.body.pop_front()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::North), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::West), Position::new(4, 5));
    }

    #[test]
    fn test_bounds_checking() {
        let board = Board::new(20, 10);

        assert!(board.is_in_bounds(Position::new(0, 0)));
        assert!(board.is_in_bounds(Position::new(19, 9)));
        assert!(!board.is_in_bounds(Position::new(-1, 0)));
        assert!(!board.is_in_bounds(Position::new(20, 0)));
        assert!(!board.is_in_bounds(Position::new(0, 10)));
    }

    #[test]
    fn test_board_layout() {
        let mut board = Board::new(4, 3);
        assert_eq!(board.shape(), [3, 4, 1]);
        assert_eq!(board.as_slice().len(), 12);

        board.set(Position::new(1, 2), Cell::Food);
        assert_eq!(board.as_slice()[2 * 4 + 1], 2);
        assert!(board.is(Position::new(1, 2), Cell::Food));
        assert_eq!(board.get(Position::new(5, 5)), None);

        // off-board writes are dropped
        board.set(Position::new(-1, 0), Cell::Snake);
        assert_eq!(board.positions_of(Cell::Snake).count(), 0);
    }

    #[test]
    fn test_positions_of() {
        let mut board = Board::new(3, 3);
        board.set(Position::new(2, 0), Cell::Snake);
        board.set(Position::new(0, 1), Cell::Snake);

        let snake: Vec<_> = board.positions_of(Cell::Snake).collect();
        assert_eq!(snake, vec![Position::new(2, 0), Position::new(0, 1)]);
        assert_eq!(board.positions_of(Cell::Empty).count(), 7);

        board.clear();
        assert_eq!(board.positions_of(Cell::Empty).count(), 9);
    }

    #[test]
    fn test_snake_segments() {
        let mut snake = Snake::new(Position::new(3, 3));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.neck(), None);

        snake.push_head(Position::new(3, 4));
        snake.push_head(Position::new(4, 4));
        assert_eq!(snake.head(), Some(Position::new(4, 4)));
        assert_eq!(snake.neck(), Some(Position::new(3, 4)));

        assert_eq!(snake.pop_tail(), Some(Position::new(3, 3)));
        assert!(!snake.contains(Position::new(3, 3)));
        assert_eq!(snake.len(), 2);
    }
}
