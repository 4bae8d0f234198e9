//! Injectable randomness for the AI loop (spec §4.7: "Randomness sources
//! are injectable to permit deterministic tests").
//!
//! Production code uses [`SmallRngSource`], a thin wrapper around
//! `rand::rngs::SmallRng` in the same spirit as the donor framework's
//! `AgentRng`. Tests substitute a double that implements [`RandomSource`]
//! directly — e.g. one that always returns the first element of a slice and
//! the minimum of a range, as spec §8 scenario S6 requires.

use crate::geometry::Direction;

/// Source of the randomness consumed by the AI demo loop.
///
/// Implementations must be deterministic given the same internal state —
/// i.e. no wall-clock or OS entropy sneaking in outside of seeding.
pub trait RandomSource {
    /// A uniformly distributed integer in `[lo, hi]` (inclusive both ends).
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32;

    /// One of the four cardinal directions, uniformly chosen.
    fn direction(&mut self) -> Direction {
        let idx = self.range_inclusive(0, 3) as usize;
        Direction::ALL[idx]
    }
}

/// Default [`RandomSource`] backed by `rand`'s non-cryptographic `SmallRng`.
pub struct SmallRngSource(rand::rngs::SmallRng);

impl SmallRngSource {
    /// Seed deterministically — the same seed always produces the same
    /// sequence of draws.
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::SmallRng::seed_from_u64(seed))
    }
}

impl RandomSource for SmallRngSource {
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        use rand::Rng;
        self.0.gen_range(lo..=hi)
    }
}

/// A deterministic [`RandomSource`] double for tests: always returns `lo`
/// (the minimum of the requested range), matching spec §8 S6's "Random
/// returns ... min-of-range".
#[cfg(any(test, feature = "test-support"))]
pub struct MinRandomSource;

#[cfg(any(test, feature = "test-support"))]
impl RandomSource for MinRandomSource {
    fn range_inclusive(&mut self, lo: u32, _hi: u32) -> u32 {
        lo
    }
}
