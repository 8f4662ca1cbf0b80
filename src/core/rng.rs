//! Deterministic random number generation for level scrambling.
//!
//! Scrambling must be reproducible: the same level and seed always
//! yield the same starting rotations, so a host can offer "replay this
//! puzzle" without storing the scrambled layout.
//!
//! ```
//! use netpuzzle::core::PuzzleRng;
//!
//! let mut a = PuzzleRng::new(42);
//! let mut b = PuzzleRng::new(42);
//! assert_eq!(a.rotation(4), b.rotation(4));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct PuzzleRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl PuzzleRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// A rotation in `0..directions`. Returns 0 when `directions` is 0.
    pub fn rotation(&mut self, directions: usize) -> u8 {
        if directions == 0 {
            return 0;
        }
        self.inner.gen_range(0..directions) as u8
    }
}
