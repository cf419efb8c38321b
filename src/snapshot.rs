//! Read-only view of the engine for rendering

use crate::board::{Cell, Position};
use crate::game::GameState;
use crate::tetromino::PieceShape;
use serde::Serialize;
use std::collections::BTreeSet;

/// Board cells composed with the active piece, plus the side-panel data.
///
/// Built fresh by [`GameEngine::snapshot`](crate::game::GameEngine::snapshot);
/// holding one never observes later mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Rows top to bottom, active piece cells drawn over locked ones
    pub cells: Vec<Vec<Cell>>,
    /// Every absolute cell the active piece occupies, including any above row 0
    pub active_piece_cells: BTreeSet<Position>,
    pub score: u32,
    pub state: GameState,
    pub next_piece: PieceShape,
}

impl Snapshot {
    pub fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Whether the active piece is drawn at (x, y)
    pub fn is_active(&self, x: usize, y: usize) -> bool {
        self.active_piece_cells
            .contains(&Position::new(x as i32, y as i32))
    }
}
