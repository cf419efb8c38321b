//! blockfall - falling-block puzzle engine
//!
//! The engine owns the board, the active piece and a one-piece lookahead.
//! It has no clock and no I/O: a driver calls [`GameEngine::tick`] on a fixed
//! interval, forwards input through [`GameEngine::apply`], and draws
//! [`GameEngine::snapshot`].

pub mod board;
pub mod error;
pub mod game;
pub mod piece;
pub mod randomizer;
pub mod snapshot;
pub mod tetromino;

pub use board::{Board, Cell, Position};
pub use error::EngineError;
pub use game::{Command, CommandResult, GameEngine, GameState, LockOutcome, TickResult};
pub use piece::ActivePiece;
pub use randomizer::{PieceSource, ScriptedSource, UniformSource};
pub use snapshot::Snapshot;
pub use tetromino::{Color, Matrix, PieceShape};
