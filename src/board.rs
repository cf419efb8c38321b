//! Game board representation and collision detection

use crate::tetromino::{Color, Matrix};
use serde::{Deserialize, Serialize};

/// Standard board dimensions
pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 20;

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// Absolute board coordinate. `y` grows downward and may be negative
/// for segments still above the visible field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Absolute positions of every occupied cell of `matrix` anchored at `anchor`
pub fn cells_at(matrix: &Matrix, anchor: Position) -> impl Iterator<Item = Position> + '_ {
    matrix
        .filled()
        .map(move |(row, col)| anchor.offset(col as i32, row as i32))
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Grid stored as rows[y][x], row 0 is the top
    rows: Vec<Vec<Cell>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![Self::empty_row(width); height],
        }
    }

    fn empty_row(width: usize) -> Vec<Cell> {
        vec![Cell::Empty; width]
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at (x, y).
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    /// Set a cell at (x, y).
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        match self
            .rows
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Check whether `matrix` placed at `anchor` overlaps a wall, the floor,
    /// or a locked cell. Segments above row 0 only check the side walls.
    pub fn collides(&self, matrix: &Matrix, anchor: Position) -> bool {
        cells_at(matrix, anchor).any(|Position { x, y }| {
            if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
                return true;
            }
            y >= 0 && self.rows[y as usize][x as usize].is_filled()
        })
    }

    /// Lock a piece onto the board. Segments above row 0 are dropped.
    pub fn lock(&mut self, matrix: &Matrix, anchor: Position, color: Color) {
        for Position { x, y } in cells_at(matrix, anchor) {
            if y >= 0 {
                self.set(x, y, Cell::Filled(color));
            }
        }
    }

    /// Check if a row is completely filled
    fn is_row_full(row: &[Cell]) -> bool {
        row.iter().all(Cell::is_filled)
    }

    /// Build the board with every full row removed and the rest shifted
    /// down, returning it with the number of rows removed.
    pub fn clear_full_rows(&self) -> (Board, u32) {
        let kept: Vec<Vec<Cell>> = self
            .rows
            .iter()
            .filter(|row| !Self::is_row_full(row))
            .cloned()
            .collect();
        let cleared = self.height - kept.len();

        let mut rows = vec![Self::empty_row(self.width); cleared];
        rows.extend(kept);

        let board = Board {
            width: self.width,
            height: self.height,
            rows,
        };
        (board, cleared as u32)
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().all(Cell::is_empty))
    }
}
