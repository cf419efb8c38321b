//! Engine construction errors

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// The board is too small for a piece to spawn. Both sides must be at least
    /// [`MIN_DIMENSION`](crate::game::MIN_DIMENSION).
    InvalidDimensions { width: usize, height: usize },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidDimensions { width, height } => write!(
                f,
                "invalid board dimensions {width}x{height}: width and height must be at least {}",
                crate::game::MIN_DIMENSION
            ),
        }
    }
}

impl std::error::Error for EngineError {}
