//! Deterministic shuffling for duel setup.
//!
//! A duel's opening deck order is the only randomness in the engine. It is
//! drawn from a seeded ChaCha8 stream so that a duel started with the same
//! seed and deck is reproducible. The seed is recorded on the duel state,
//! so a duel started from entropy can be replayed too.
//!
//! ```
//! use duel_engine::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let mut left = vec![1, 2, 3, 4, 5, 6, 7, 8];
//! let mut right = left.clone();
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded RNG used for deck shuffles.
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

    /// Create an RNG seeded from OS entropy.
    ///
    /// The chosen seed is kept and readable through `seed()`.
    #[must_use]
    pub fn from_entropy() -> Self {
        let seed = rand::thread_rng().next_u64();
        Self::new(seed)
    }

    /// Create from an optional seed: seeded when given, entropy otherwise.
    #[must_use]
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u32> = (0..20).collect();
        let original = data.clone();

        rng.shuffle(&mut data);

        assert_ne!(data, original);
        data.sort_unstable();
        assert_eq!(data, original);
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a: Vec<u32> = (0..20).collect();
        let mut b = a.clone();

        GameRng::new(1).shuffle(&mut a);
        GameRng::new(2).shuffle(&mut b);

        assert_ne!(a, b);
    }

    #[test]
    fn test_shuffle_trivial_slices() {
        let mut rng = GameRng::new(3);
        let mut empty: Vec<u8> = vec![];
        let mut single = vec![9];

        rng.shuffle(&mut empty);
        rng.shuffle(&mut single);

        assert!(empty.is_empty());
        assert_eq!(single, vec![9]);
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut a: Vec<u32> = (0..30).collect();
        let mut b = a.clone();

        GameRng::new(77).shuffle(&mut a);
        GameRng::new(77).shuffle(&mut b);

        assert_eq!(a, b);
    }

    #[test]
    fn test_entropy_seed_reproduces_stream() {
        let mut first = GameRng::from_entropy();
        let mut replay = GameRng::new(first.seed());
        let mut a: Vec<u32> = (0..30).collect();
        let mut b = a.clone();

        first.shuffle(&mut a);
        replay.shuffle(&mut b);

        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_option() {
        assert_eq!(GameRng::from_seed_option(Some(9)).seed(), 9);
        let _ = GameRng::from_seed_option(None);
    }
}
