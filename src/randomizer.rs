//! Piece generation
//!
//! Every piece is drawn independently and uniformly from the seven shapes.
//! There is no bag: the same shape may repeat any number of times.

use crate::tetromino::PieceShape;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Supplies the shapes the engine spawns
pub trait PieceSource {
    fn draw(&mut self) -> PieceShape;
}

/// Uniform random selection over all seven shapes
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: ChaCha8Rng,
}

impl UniformSource {
    /// Deterministic source, for replays and tests
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl Default for UniformSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl PieceSource for UniformSource {
    fn draw(&mut self) -> PieceShape {
        PieceShape::ALL[self.rng.gen_range(0..PieceShape::ALL.len())]
    }
}

/// Cycles through a fixed list of shapes
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    shapes: Vec<PieceShape>,
    index: usize,
}

impl ScriptedSource {
    /// Panics if `shapes` is empty.
    pub fn new(shapes: impl Into<Vec<PieceShape>>) -> Self {
        let shapes = shapes.into();
        assert!(!shapes.is_empty(), "scripted source needs at least one shape");
        Self { shapes, index: 0 }
    }

    /// A source that only ever yields `shape`
    pub fn repeat(shape: PieceShape) -> Self {
        Self::new(vec![shape])
    }
}

impl PieceSource for ScriptedSource {
    fn draw(&mut self) -> PieceShape {
        let shape = self.shapes[self.index];
        self.index = (self.index + 1) % self.shapes.len();
        shape
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn draw(&mut self) -> PieceShape {
        (**self).draw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = UniformSource::with_seed(42);
        let mut b = UniformSource::with_seed(42);
        for _ in 0..50 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn test_uniform_source_reaches_every_shape() {
        let mut source = UniformSource::with_seed(7);
        let mut counts: HashMap<PieceShape, usize> = HashMap::new();
        for _ in 0..7000 {
            *counts.entry(source.draw()).or_default() += 1;
        }
        assert_eq!(counts.len(), 7);
        // Loose bound; uniform draws average 1000 per shape
        assert!(counts.values().all(|&n| n > 700 && n < 1300), "{counts:?}");
    }

    #[test]
    fn test_scripted_source_cycles() {
        let mut source = ScriptedSource::new([PieceShape::I, PieceShape::O]);
        let drawn: Vec<_> = (0..5).map(|_| source.draw()).collect();
        assert_eq!(
            drawn,
            vec![PieceShape::I, PieceShape::O, PieceShape::I, PieceShape::O, PieceShape::I]
        );
    }

    #[test]
    #[should_panic]
    fn test_scripted_source_rejects_empty() {
        let _ = ScriptedSource::new(Vec::<PieceShape>::new());
    }
}
