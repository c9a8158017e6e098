//! Injectable uniform random source consumed by every generator.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Uniform random source threaded through generation. The single required
/// method yields `[0, 1)`; the helpers are derived from it so that any
/// substitute implementation (a scripted sequence in tests, for example)
/// behaves consistently.
pub trait Rand {
    /// Uniform draw in `[0, 1)`.
    fn next(&mut self) -> f64;

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next() < p
    }

    fn coin_flip(&mut self) -> bool {
        self.next() < 0.5
    }

    /// Uniform integer in `[min, max]` inclusive. The clamp guards the
    /// single maximal `next()` value from rounding up past the span.
    fn range(&mut self, min: usize, max: usize) -> usize {
        debug_assert!(min <= max);
        let span = max - min + 1;
        min + ((self.next() * span as f64) as usize).min(span - 1)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.range(0, items.len() - 1)]
    }
}

/// Production source backed by a seeded ChaCha8 stream.
pub struct SeededRand {
    rng: ChaCha8Rng,
}

impl SeededRand {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Independent stream for one level of a run, so regenerating level N
    /// never requires replaying levels 0..N.
    pub fn for_level(run_seed: u64, level: u32) -> Self {
        Self::from_seed(derive_level_seed(run_seed, level))
    }
}

impl Rand for SeededRand {
    fn next(&mut self) -> f64 {
        // 53 mantissa bits of the raw draw, scaled into [0, 1).
        (self.rng.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
    }
}

pub fn derive_level_seed(run_seed: u64, level: u32) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= (level as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}
