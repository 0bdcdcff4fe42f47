//! Pre-generated benchmark inputs.
//!
//! Arrays are drawn once from a caller-supplied RNG and never mutated, so
//! the same seed always reproduces the same workload.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Default number of elements per array.
pub const DEFAULT_SIZE: usize = 50;
/// Upper bound of the small range, `10^4`.
pub const DEFAULT_SMALL: i32 = 10_000;
/// Width of the medium range, `10^8`.
pub const DEFAULT_MEDIUM: i32 = 100_000_000;

/// Which magnitude band an array is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputRange {
    /// `[1, small]`
    Small,
    /// `[small, small + medium)`
    Medium,
}

impl InputRange {
    pub fn name(self) -> &'static str {
        match self {
            InputRange::Small => "small",
            InputRange::Medium => "medium",
        }
    }
}

impl fmt::Display for InputRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Magnitudes the two ranges are built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBounds {
    pub small: i32,
    pub medium: i32,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            small: DEFAULT_SMALL,
            medium: DEFAULT_MEDIUM,
        }
    }
}

impl InputBounds {
    /// Inclusive `(low, high)` bounds for `range`.
    pub fn bounds(&self, range: InputRange) -> (i32, i32) {
        match range {
            InputRange::Small => (1, self.small),
            InputRange::Medium => (self.small, self.small + self.medium - 1),
        }
    }

    /// True when both ranges are non-empty and every value stays within
    /// the kernels' domain.
    pub fn is_valid(&self) -> bool {
        self.small >= 1
            && self.medium >= 1
            && self
                .small
                .checked_add(self.medium)
                .is_some_and(|top| top - 1 <= crate::pow2::MAX_INPUT)
    }
}

/// Immutable array of benchmark inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputArray {
    range: InputRange,
    values: Box<[i32]>,
}

impl InputArray {
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        range: InputRange,
        bounds: &InputBounds,
        size: usize,
    ) -> Self {
        let (low, high) = bounds.bounds(range);
        let values = (0..size).map(|_| rng.gen_range(low..=high)).collect();
        Self { range, values }
    }

    /// Wrap explicit values, mostly for tests.
    pub fn from_values(range: InputRange, values: Vec<i32>) -> Self {
        Self {
            range,
            values: values.into_boxed_slice(),
        }
    }

    pub fn range(&self) -> InputRange {
        self.range
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }
}

impl Deref for InputArray {
    type Target = [i32];

    fn deref(&self) -> &[i32] {
        &self.values
    }
}

/// The small and medium arrays for one trial, plus the seed that made them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSet {
    pub seed: u64,
    pub small: InputArray,
    pub medium: InputArray,
}

impl InputSet {
    /// Draw both arrays from `rng`, small first.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        seed: u64,
        bounds: &InputBounds,
        size: usize,
    ) -> Self {
        let small = InputArray::generate(rng, InputRange::Small, bounds, size);
        let medium = InputArray::generate(rng, InputRange::Medium, bounds, size);
        Self {
            seed,
            small,
            medium,
        }
    }

    /// Deterministic inputs from a `StdRng` seeded with `seed`.
    pub fn from_seed(seed: u64, bounds: &InputBounds, size: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate(&mut rng, seed, bounds, size)
    }

    pub fn get(&self, range: InputRange) -> &InputArray {
        match range {
            InputRange::Small => &self.small,
            InputRange::Medium => &self.medium,
        }
    }
}

/// A fresh seed from the OS entropy source.
pub fn entropy_seed() -> u64 {
    rand::rngs::OsRng.gen()
}
