//! Tetromino definitions and shapes
//!
//! All 7 tetrominoes as square occupancy matrices. Rotation is a pure
//! function returning a new matrix, so the constant table is never touched.

use serde::{Deserialize, Serialize};

/// Largest bounding box any shape needs (the I piece)
pub const MAX_SIZE: usize = 4;

/// Color tag carried by locked cells, as plain RGB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceShape {
    I, // Cyan - long bar
    O, // Yellow - square
    T, // Purple - T-shape
    S, // Green - S-shape
    Z, // Red - Z-shape
    J, // Blue - J-shape
    L, // Orange - L-shape
}

impl PieceShape {
    /// Every variant, in a fixed order used by random selection
    pub const ALL: [PieceShape; 7] = [
        PieceShape::I,
        PieceShape::O,
        PieceShape::T,
        PieceShape::S,
        PieceShape::Z,
        PieceShape::J,
        PieceShape::L,
    ];

    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            PieceShape::I => Color::rgb(0x00, 0xf0, 0xf0),
            PieceShape::O => Color::rgb(0xf0, 0xf0, 0x00),
            PieceShape::T => Color::rgb(0xa0, 0x00, 0xf0),
            PieceShape::S => Color::rgb(0x00, 0xf0, 0x00),
            PieceShape::Z => Color::rgb(0xf0, 0x00, 0x00),
            PieceShape::J => Color::rgb(0x00, 0x00, 0xf0),
            PieceShape::L => Color::rgb(0xf0, 0xa0, 0x00),
        }
    }

    /// Canonical spawn-orientation matrix
    pub fn matrix(&self) -> Matrix {
        match self {
            PieceShape::I => I_MATRIX,
            PieceShape::O => O_MATRIX,
            PieceShape::T => T_MATRIX,
            PieceShape::S => S_MATRIX,
            PieceShape::Z => Z_MATRIX,
            PieceShape::J => J_MATRIX,
            PieceShape::L => L_MATRIX,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PieceShape::I => "I",
            PieceShape::O => "O",
            PieceShape::T => "T",
            PieceShape::S => "S",
            PieceShape::Z => "Z",
            PieceShape::J => "J",
            PieceShape::L => "L",
        }
    }
}

/// Square occupancy matrix, stored in a fixed 4x4 buffer.
///
/// Only the top-left `size x size` corner is meaningful; everything
/// outside it is always `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    size: usize,
    cells: [[bool; MAX_SIZE]; MAX_SIZE],
}

impl Matrix {
    /// Build a matrix from `size` rows of `0`/`1` flags
    const fn from_rows(size: usize, rows: [[u8; MAX_SIZE]; MAX_SIZE]) -> Self {
        let mut cells = [[false; MAX_SIZE]; MAX_SIZE];
        let mut r = 0;
        while r < size {
            let mut c = 0;
            while c < size {
                cells[r][c] = rows[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self { size, cells }
    }

    /// Side length of the bounding box
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether (row, col) inside the bounding box is occupied
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.cells[row][col]
    }

    /// Iterate over occupied cells as (row, col) offsets from the top-left corner
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size).flat_map(move |row| {
            (0..self.size)
                .filter(move |&col| self.cells[row][col])
                .map(move |col| (row, col))
        })
    }

    /// Rotate 90 degrees clockwise: `rotated[c][n-1-r] = self[r][c]`
    pub fn rotated_cw(&self) -> Matrix {
        let n = self.size;
        let mut cells = [[false; MAX_SIZE]; MAX_SIZE];
        for r in 0..n {
            for c in 0..n {
                cells[c][n - 1 - r] = self.cells[r][c];
            }
        }
        Matrix { size: n, cells }
    }
}

const I_MATRIX: Matrix = Matrix::from_rows(
    4,
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const O_MATRIX: Matrix = Matrix::from_rows(
    2,
    [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const T_MATRIX: Matrix = Matrix::from_rows(
    3,
    [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const S_MATRIX: Matrix = Matrix::from_rows(
    3,
    [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const Z_MATRIX: Matrix = Matrix::from_rows(
    3,
    [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const J_MATRIX: Matrix = Matrix::from_rows(
    3,
    [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const L_MATRIX: Matrix = Matrix::from_rows(
    3,
    [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_four_blocks() {
        for shape in PieceShape::ALL {
            assert_eq!(shape.matrix().filled().count(), 4, "{}", shape.name());
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        // .T.      .T.
        // TTT  ->  .TT
        // ...      .T.
        let rotated = PieceShape::T.matrix().rotated_cw();
        let cells: Vec<_> = rotated.filled().collect();
        assert_eq!(cells, vec![(0, 1), (1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_four_rotations_is_identity() {
        for shape in PieceShape::ALL {
            let m = shape.matrix();
            let back = m.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(m, back);
        }
    }

    #[test]
    fn test_rotation_leaves_constant_untouched() {
        let before = PieceShape::S.matrix();
        let _ = before.rotated_cw();
        assert_eq!(PieceShape::S.matrix(), before);
    }

    #[test]
    fn test_o_rotation_is_stable() {
        let o = PieceShape::O.matrix();
        assert_eq!(o.rotated_cw(), o);
    }

    #[test]
    fn test_i_rotates_to_vertical() {
        let rotated = PieceShape::I.matrix().rotated_cw();
        let cells: Vec<_> = rotated.filled().collect();
        assert_eq!(cells, vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
    }
}
