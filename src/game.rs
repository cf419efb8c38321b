//! Core game state and logic

use crate::board::{Board, Cell, Position};
use crate::error::EngineError;
use crate::piece::ActivePiece;
use crate::randomizer::{PieceSource, UniformSource};
use crate::snapshot::Snapshot;
use crate::tetromino::{MAX_SIZE, PieceShape};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Smallest width or height on which every shape can spawn
pub const MIN_DIMENSION: usize = 4;

/// Flat bonus per cleared row, no combo or multi-line multiplier
pub const POINTS_PER_ROW: u32 = 100;

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Running,
    Paused,
    GameOver,
}

/// Input commands the engine can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
}

/// Whether a command changed anything. Rejections are routine, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandResult {
    pub applied: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickResult {
    pub locked: bool,
    pub rows_cleared: u32,
    /// Engine is in `GameOver` after the tick
    pub game_over: bool,
}

/// Result of one lock sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    pub rows_cleared: u32,
    pub game_over: bool,
}

/// Spawn anchor for a board `width` columns wide: the widest bounding box
/// centered horizontally, top edge on row 0.
pub fn spawn_anchor(width: usize) -> Position {
    Position::new((width.saturating_sub(MAX_SIZE) / 2) as i32, 0)
}

fn check_dimensions(width: usize, height: usize) -> Result<(), EngineError> {
    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        return Err(EngineError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// The engine: board, active piece, one-piece lookahead, score and lifecycle.
///
/// Driven entirely from outside: call [`tick`](Self::tick) on a fixed interval
/// and [`apply`](Self::apply) for player input. Calls must not overlap.
#[derive(Debug, Clone)]
pub struct GameEngine<S = UniformSource> {
    board: Board,
    active: ActivePiece,
    next: PieceShape,
    score: u32,
    state: GameState,
    spawn: Position,
    source: S,
}

impl GameEngine<UniformSource> {
    /// Create an engine with an empty `width` x `height` board and an entropy-seeded source
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        Self::with_source(width, height, UniformSource::from_entropy())
    }
}

impl<S: PieceSource> GameEngine<S> {
    /// Create an engine that draws its pieces from `source`
    pub fn with_source(width: usize, height: usize, source: S) -> Result<Self, EngineError> {
        check_dimensions(width, height)?;
        Self::from_board(Board::new(width, height), source)
    }

    /// Start from a prepared board. If the first piece cannot spawn the
    /// engine begins in `GameOver`.
    pub fn from_board(board: Board, mut source: S) -> Result<Self, EngineError> {
        check_dimensions(board.width(), board.height())?;
        let spawn = spawn_anchor(board.width());
        let active = ActivePiece::spawn(source.draw(), spawn);
        let next = source.draw();
        let state = if active.collides(&board) {
            GameState::GameOver
        } else {
            GameState::Running
        };

        tracing::debug!(
            "engine created {}x{}, active={} next={}",
            board.width(),
            board.height(),
            active.shape.name(),
            next.name()
        );

        Ok(Self {
            board,
            active,
            next,
            score: 0,
            state,
            spawn,
            source,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn next_piece(&self) -> PieceShape {
        self.next
    }

    pub fn spawn_anchor(&self) -> Position {
        self.spawn
    }

    fn is_running(&self) -> bool {
        self.state == GameState::Running
    }

    /// Process a command
    pub fn apply(&mut self, command: Command) -> CommandResult {
        let applied = match command {
            Command::TogglePause => self.toggle_pause(),
            Command::MoveLeft => self.try_move(-1, 0),
            Command::MoveRight => self.try_move(1, 0),
            Command::SoftDrop => self.try_move(0, 1),
            Command::Rotate => self.rotate(),
            Command::HardDrop => self.hard_drop().is_some(),
        };
        if !applied {
            tracing::trace!("{:?} rejected in state {:?}", command, self.state);
        }
        CommandResult { applied }
    }

    /// Flip between Running and Paused. Returns false once the game is over.
    pub fn toggle_pause(&mut self) -> bool {
        self.state = match self.state {
            GameState::Running => GameState::Paused,
            GameState::Paused => GameState::Running,
            GameState::GameOver => return false,
        };
        tracing::info!("state -> {:?}", self.state);
        true
    }

    /// Shift the active piece by (dx, dy) if the target is free
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        if !self.is_running() {
            return false;
        }
        let candidate = self.active.shifted(dx, dy);
        if candidate.collides(&self.board) {
            return false;
        }
        self.active = candidate;
        true
    }

    /// Rotate clockwise in place. No kicks: a colliding rotation is rejected.
    pub fn rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let candidate = self.active.rotated();
        if candidate.collides(&self.board) {
            return false;
        }
        self.active = candidate;
        true
    }

    /// Drop straight to the resting row and lock immediately
    pub fn hard_drop(&mut self) -> Option<LockOutcome> {
        if !self.is_running() {
            return None;
        }
        self.active = self.active.landing(&self.board);
        Some(self.lock_active())
    }

    /// One gravity step: fall one row, or lock if something is below
    pub fn tick(&mut self) -> TickResult {
        if !self.is_running() {
            return TickResult {
                game_over: self.state == GameState::GameOver,
                ..TickResult::default()
            };
        }
        if self.try_move(0, 1) {
            return TickResult::default();
        }
        let outcome = self.lock_active();
        TickResult {
            locked: true,
            rows_cleared: outcome.rows_cleared,
            game_over: outcome.game_over,
        }
    }

    /// Lock the active piece, clear rows, and advance the piece pipeline
    fn lock_active(&mut self) -> LockOutcome {
        let locked = self.active;
        self.board
            .lock(&locked.matrix, locked.anchor, locked.shape.color());

        let (board, rows_cleared) = self.board.clear_full_rows();
        self.board = board;
        self.score = self
            .score
            .saturating_add(rows_cleared.saturating_mul(POINTS_PER_ROW));

        // active <- incoming (old lookahead), next <- fresh draw.
        // The spawn check must test `incoming`, never `locked`.
        let incoming = ActivePiece::spawn(self.next, self.spawn);
        let fresh = self.source.draw();
        let game_over = incoming.collides(&self.board);
        self.active = incoming;
        self.next = fresh;

        tracing::debug!(
            "locked {} at ({}, {}), cleared={} score={} next={}",
            locked.shape.name(),
            locked.anchor.x,
            locked.anchor.y,
            rows_cleared,
            self.score,
            fresh.name()
        );

        if game_over {
            self.state = GameState::GameOver;
            tracing::info!(
                "game over: {} cannot spawn, final score {}",
                incoming.shape.name(),
                self.score
            );
        }

        LockOutcome {
            rows_cleared,
            game_over,
        }
    }

    /// Start over on an empty board with two new pieces
    pub fn reset(&mut self) {
        self.board = Board::new(self.board.width(), self.board.height());
        self.score = 0;
        self.active = ActivePiece::spawn(self.source.draw(), self.spawn);
        self.next = self.source.draw();
        self.state = GameState::Running;
        tracing::info!("game reset");
    }

    /// Compose locked cells with the active piece for rendering
    pub fn snapshot(&self) -> Snapshot {
        let mut cells = self.board.rows().to_vec();
        let active_piece_cells: BTreeSet<Position> = self.active.cells().collect();
        let color = self.active.shape.color();

        for pos in &active_piece_cells {
            if pos.x < 0 || pos.y < 0 {
                continue;
            }
            if let Some(cell) = cells
                .get_mut(pos.y as usize)
                .and_then(|row| row.get_mut(pos.x as usize))
            {
                *cell = Cell::Filled(color);
            }
        }

        Snapshot {
            cells,
            active_piece_cells,
            score: self.score,
            state: self.state,
            next_piece: self.next,
        }
    }
}
