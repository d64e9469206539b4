//! Deterministic random number generation for deck shuffling.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical deals
//! - **Explicit**: Passed to the deck factory, never held globally
//! - **Context streams**: Independent sequences for different purposes,
//!   derived with a fixed mix so deals stay stable across toolchains
//!
//! ```
//! use rust_klondike::core::GameRng;
//!
//! let mut a = GameRng::new(42).for_context("deck");
//! let mut b = GameRng::new(42).for_context("deck");
//!
//! let mut left: Vec<u32> = (0..52).collect();
//! let mut right = left.clone();
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// 64-bit FNV prime, folded over the context bytes.
const CONTEXT_PRIME: u64 = 0x0000_0100_0000_01B3;

/// Golden-ratio multiplier that spreads the folded context over all bits.
const SPREAD: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic RNG used by the deck factory.
///
/// Uses ChaCha8 for speed while keeping shuffles of good quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let context_seed = context
            .bytes()
            .fold(self.seed, |acc, b| (acc ^ u64::from(b)).wrapping_mul(CONTEXT_PRIME))
            .wrapping_mul(SPREAD);

        Self {
            inner: ChaCha8Rng::seed_from_u64(context_seed),
            seed: context_seed,
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
