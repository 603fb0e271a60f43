//! Seeded randomness for dice, seating and random strategies.
//!
//! One seed drives a whole game. Consumers that must not disturb each other
//! draw from separate ChaCha streams of that seed:
//!
//! - `for_context("seating")` picks the first team
//! - `for_context("dice")` rolls the die
//! - `fork()` hands a strategy its own branch
//!
//! so adding a random strategy to a table never changes the dice a seeded
//! game rolls.
//!
//! ```
//! use ludo_engine::core::GameRng;
//!
//! let mut dice = GameRng::new(42).for_context("dice");
//! let roll = dice.roll_die();
//! assert!((1..=6).contains(&roll));
//!
//! let mut again = GameRng::new(42).for_context("dice");
//! assert_eq!(again.roll_die(), roll);
//! ```

use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

/// Faces on the die.
pub const DIE_FACES: u8 = 6;

/// Mixed into the seed of each fork.
const FORK_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// ChaCha8 generator tagged with its seed and stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    /// Stream 0 of `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::on_stream(seed, 0)
    }

    fn on_stream(seed: u64, stream: u64) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(seed);
        inner.set_stream(stream);
        Self {
            inner,
            seed,
            forks: 0,
        }
    }

    /// Seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// ChaCha stream this generator reads.
    #[must_use]
    pub fn stream(&self) -> u64 {
        self.inner.get_stream()
    }

    /// Branch off a generator for a strategy.
    ///
    /// Successive forks differ from each other and from the parent; none of
    /// them advance the parent's sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::on_stream(self.seed ^ self.forks.wrapping_mul(FORK_MIX), self.stream())
    }

    /// The stream of this seed reserved for `context`.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        context.hash(&mut hasher);
        Self::on_stream(self.seed, hasher.finish())
    }

    /// Uniform die face in `1..=6`.
    pub fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=DIE_FACES)
    }

    /// Uniform pick from a slice; `None` when it is empty.
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Snapshot for saving a game mid-play.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            stream: self.stream(),
            word_pos: self.inner.get_word_pos(),
            forks: self.forks,
        }
    }

    /// Resume exactly where a snapshot was taken.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut rng = Self::on_stream(state.seed, state.stream);
        rng.inner.set_word_pos(state.word_pos);
        rng.forks = state.forks;
        rng
    }
}

/// Serializable [`GameRng`] position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Seed of the generator.
    pub seed: u64,
    /// ChaCha stream id.
    pub stream: u64,
    /// Words consumed from the stream.
    pub word_pos: u128,
    /// Forks taken so far.
    pub forks: u64,
}
