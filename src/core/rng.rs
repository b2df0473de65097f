//! Seeded randomness for matches.
//!
//! Every random decision in a match goes through a [`GameRng`]: the deck
//! shuffle, the opponent's skip roll, card and target choice, placement
//! jitter, and the exhausted-deck fallback. Same seed, same match.
//!
//! ## Streams
//!
//! ChaCha supports 2^64 independent streams per key. [`RngStream`] names
//! the ones this crate hands out, so a bot driving the player side never
//! perturbs the opponent's rolls even though both start from one seed.
//!
//! ## Forks
//!
//! [`GameRng::fork`] derives a fresh key from the parent's seed and a fork
//! counter. A match keeps one master generator and forks it on every
//! `reset()`, so successive rounds differ but replay identically.
//!
//! ```
//! use arena_clash::core::{GameRng, RngStream};
//!
//! let mut a = GameRng::new(42).stream(RngStream::Bot);
//! let mut b = GameRng::new(42).stream(RngStream::Bot);
//! assert_eq!(a.uniform(0.0, 100.0), b.uniform(0.0, 100.0));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Named ChaCha stream ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RngStream {
    /// Deck shuffles, the opponent and everything else inside a match.
    Match,
    /// An external bot driving the player side.
    Bot,
}

impl RngStream {
    const fn id(self) -> u64 {
        match self {
            RngStream::Match => 0,
            RngStream::Bot => 1,
        }
    }
}

/// SplitMix64 finalizer, used to spread fork keys.
const fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Deterministic generator backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    /// Generator for `seed` on the [`RngStream::Match`] stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// Same key, different stream. The result starts at word 0.
    #[must_use]
    pub fn stream(&self, stream: RngStream) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(self.seed);
        inner.set_stream(stream.id());
        Self {
            inner,
            seed: self.seed,
            forks: 0,
        }
    }

    /// Derive an independent child generator.
    ///
    /// The n-th fork of a given seed is always the same generator.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(mix(self.seed ^ mix(self.forks)))
    }

    /// Seed this generator was keyed with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform f32 in `[low, high)`; `low` when the range is empty.
    pub fn uniform(&mut self, low: f32, high: f32) -> f32 {
        if high <= low {
            return low;
        }
        self.inner.gen_range(low..high)
    }

    /// `true` with `probability`, clamped to `[0, 1]`.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Random element of `items`, `None` when empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    /// Capture the exact position in the stream.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            stream: self.inner.get_stream(),
            word_pos: self.inner.get_word_pos(),
            forks: self.forks,
        }
    }

    /// Resume from a captured position.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_stream(state.stream);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            forks: state.forks,
        }
    }
}

/// Serializable position of a [`GameRng`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Key seed.
    pub seed: u64,
    /// ChaCha stream id.
    pub stream: u64,
    /// Word offset within the stream.
    pub word_pos: u128,
    /// Forks taken so far.
    pub forks: u64,
}
