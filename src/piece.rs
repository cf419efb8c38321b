//! Active falling piece

use crate::board::{Board, Position, cells_at};
use crate::tetromino::{Matrix, PieceShape};

/// An active falling piece.
///
/// Pieces are values: moving or rotating yields a new `ActivePiece`
/// and leaves the original untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    /// The type of tetromino
    pub shape: PieceShape,
    /// Current occupancy, already rotated
    pub matrix: Matrix,
    /// Top-left corner of the bounding box
    pub anchor: Position,
}

impl ActivePiece {
    /// Create a piece in its canonical orientation at `anchor`
    pub fn spawn(shape: PieceShape, anchor: Position) -> Self {
        Self {
            shape,
            matrix: shape.matrix(),
            anchor,
        }
    }

    /// Absolute positions of all occupied cells
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        cells_at(&self.matrix, self.anchor)
    }

    /// Same piece shifted by (dx, dy)
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            anchor: self.anchor.offset(dx, dy),
            ..*self
        }
    }

    /// Same piece rotated clockwise about the unchanged anchor
    pub fn rotated(&self) -> Self {
        Self {
            matrix: self.matrix.rotated_cw(),
            ..*self
        }
    }

    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.matrix, self.anchor)
    }

    /// Where this piece would come to rest if dropped straight down
    pub fn landing(&self, board: &Board) -> Self {
        let mut landed = *self;
        loop {
            let below = landed.shifted(0, 1);
            if below.collides(board) {
                return landed;
            }
            landed = below;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_uses_canonical_matrix() {
        let piece = ActivePiece::spawn(PieceShape::T, Position::new(3, 0));
        assert_eq!(piece.matrix, PieceShape::T.matrix());
        assert_eq!(piece.anchor, Position::new(3, 0));
    }

    #[test]
    fn test_block_positions() {
        let piece = ActivePiece::spawn(PieceShape::O, Position::new(4, 2));
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(
            cells,
            vec![
                Position::new(4, 2),
                Position::new(5, 2),
                Position::new(4, 3),
                Position::new(5, 3),
            ]
        );
    }

    #[test]
    fn test_shift_does_not_mutate_original() {
        let piece = ActivePiece::spawn(PieceShape::L, Position::new(3, 0));
        let moved = piece.shifted(1, 1);
        assert_eq!(piece.anchor, Position::new(3, 0));
        assert_eq!(moved.anchor, Position::new(4, 1));
        assert_eq!(moved.matrix, piece.matrix);
    }

    #[test]
    fn test_landing_on_empty_board() {
        let board = Board::default();
        let piece = ActivePiece::spawn(PieceShape::I, Position::new(3, 0));
        let landed = piece.landing(&board);
        // The I bar sits in matrix row 1, so the anchor ends one above the floor row
        assert_eq!(landed.anchor, Position::new(3, 18));
        assert!(landed.shifted(0, 1).collides(&board));
    }
}
