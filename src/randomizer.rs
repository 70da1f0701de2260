//! Piece randomizer
//!
//! Every draw is an independent uniform pick among the 7 tetrominoes, so
//! repeats and droughts are possible.

use crate::tetromino::TetrominoType;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Something that hands out the next tetromino to spawn
pub trait PieceSource {
    fn next_piece(&mut self) -> TetrominoType;
}

/// Uniform, memoryless randomizer
#[derive(Debug, Clone)]
pub struct UniformRandom {
    rng: ChaCha8Rng,
}

impl Default for UniformRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformRandom {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Create a randomizer with a fixed seed (reproducible sequences)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl PieceSource for UniformRandom {
    fn next_piece(&mut self) -> TetrominoType {
        let all = TetrominoType::all();
        all[self.rng.gen_range(0..all.len())]
    }
}
