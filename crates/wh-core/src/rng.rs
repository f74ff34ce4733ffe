//! Runtime and per-slot RNG wrappers.
//!
//! # Two sources of randomness
//!
//! - **Structural** randomness (which shelves become spawn slots and what
//!   period each slot gets) is derived from the caller's seed so the same
//!   seed always yields the same warehouse.  Each slot's period comes from
//!   its own `SlotRng`:
//!
//!     seed = structural_seed XOR (slot_id * MIXING_CONSTANT)
//!
//!   so adding slots at the end never disturbs the periods of earlier ones.
//!
//! - **Runtime** randomness (package identifiers, destinations, placement)
//!   lives in a `SimRng`.  After construction it is reseeded from OS
//!   entropy unless the caller pins a runtime seed, so two processes built
//!   from the same structural seed diverge at runtime by default.
//!
//! Both wrappers are `Clone` so a branched warehouse carries an identical,
//! independent copy of the RNG state.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::SlotId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── SlotRng ───────────────────────────────────────────────────────────────────

/// Per-slot deterministic RNG used to draw the slot's recurring period.
#[derive(Clone, Debug)]
pub struct SlotRng(SmallRng);

impl SlotRng {
    /// Seed deterministically from the structural seed and a slot ID.
    pub fn new(structural_seed: u64, slot: SlotId) -> Self {
        let seed = structural_seed ^ (slot.0 as u64).wrapping_mul(MIXING_CONSTANT);
        SlotRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// General-purpose simulation RNG.
///
/// Used for structural sampling (seeded) and for runtime draws (usually
/// entropy-seeded).  Single-threaded only.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy.  Results differ between processes.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Choose a random element from a slice, `None` if it is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    /// Sample `amount` distinct indices from `0..len` without replacement.
    ///
    /// The result is in sampling order.  `amount` is clamped to `len`.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.0, len, amount.min(len)).into_vec()
    }
}
