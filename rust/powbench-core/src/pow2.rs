//! Next power of two, two ways.
//!
//! [`slow`] doubles an accumulator until it catches up with the input;
//! [`fast`] smears the highest set bit of `x - 1` into every lower bit and
//! adds one. Both return the smallest power of two `>= x` for inputs in
//! `1..=MAX_INPUT`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Largest input whose next power of two still fits in an `i32`.
pub const MAX_INPUT: i32 = 1 << 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PowerError {
    #[error("next power of two is undefined for non-positive input {0}")]
    NonPositive(i32),
    #[error("next power of two of {0} does not fit in i32 (max input {max})", max = MAX_INPUT)]
    Overflow(i32),
}

/// Doubling loop. O(log x) iterations.
///
/// Inputs outside `1..=MAX_INPUT` never terminate in release builds
/// (the accumulator wraps to zero); use [`Kernel::checked`] for untrusted
/// values.
#[inline]
pub fn slow(x: i32) -> i32 {
    debug_assert!((1..=MAX_INPUT).contains(&x), "slow({x}) out of domain");
    let mut res = 1;
    while res < x {
        res <<= 1;
    }
    res
}

/// Bit smearing. Constant time.
#[inline]
pub fn fast(x: i32) -> i32 {
    let mut x = x.wrapping_sub(1);
    x |= x >> 1;
    x |= x >> 2;
    x |= x >> 4;
    x |= x >> 8;
    x |= x >> 16;
    x.wrapping_add(1)
}

/// Which next-power-of-two implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kernel {
    Slow,
    Fast,
}

impl Kernel {
    pub const ALL: [Kernel; 2] = [Kernel::Fast, Kernel::Slow];

    #[inline]
    pub fn apply(self, x: i32) -> i32 {
        match self {
            Kernel::Slow => slow(x),
            Kernel::Fast => fast(x),
        }
    }

    /// Domain-checked variant of [`Kernel::apply`].
    pub fn checked(self, x: i32) -> Result<i32, PowerError> {
        if x <= 0 {
            return Err(PowerError::NonPositive(x));
        }
        if x > MAX_INPUT {
            return Err(PowerError::Overflow(x));
        }
        Ok(self.apply(x))
    }

    pub fn name(self) -> &'static str {
        match self {
            Kernel::Slow => "Slow",
            Kernel::Fast => "Fast",
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sum of the next powers of two of every value, starting from 1.
///
/// Additions wrap: fifty medium-range results overflow an `i32`, and the
/// total only exists to keep the kernel calls observable.
#[inline]
pub fn sum_next_powers(values: &[i32], kernel: Kernel) -> i32 {
    match kernel {
        Kernel::Slow => values.iter().fold(1i32, |a, &v| a.wrapping_add(slow(v))),
        Kernel::Fast => values.iter().fold(1i32, |a, &v| a.wrapping_add(fast(v))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(fast(1), 1);
        assert_eq!(fast(2), 2);
        assert_eq!(fast(3), 4);
        assert_eq!(fast(5), 8);
        assert_eq!(fast(1024), 1024);
        assert_eq!(fast(1025), 2048);
        assert_eq!(slow(1025), 2048);
        assert_eq!(fast(MAX_INPUT), MAX_INPUT);
        assert_eq!(slow(MAX_INPUT), MAX_INPUT);
    }

    #[test]
    fn fast_zero_wraps_to_zero() {
        assert_eq!(fast(0), 0);
    }

    #[test]
    fn fast_matches_slow_exhaustively_below_two_to_the_sixteen() {
        for x in 1..=(1 << 16) {
            assert_eq!(fast(x), slow(x), "x = {}", x);
        }
    }

    #[test]
    fn matches_std_next_power_of_two() {
        for x in [1, 7, 100, 4095, 4097, 65_537, 10_000_000, MAX_INPUT - 1] {
            let expected = (x as u32).next_power_of_two() as i32;
            assert_eq!(fast(x), expected);
            assert_eq!(slow(x), expected);
        }
    }

    #[test]
    fn checked_rejects_out_of_domain() {
        assert_eq!(Kernel::Fast.checked(0), Err(PowerError::NonPositive(0)));
        assert_eq!(Kernel::Slow.checked(-5), Err(PowerError::NonPositive(-5)));
        assert_eq!(
            Kernel::Slow.checked(MAX_INPUT + 1),
            Err(PowerError::Overflow(MAX_INPUT + 1))
        );
        assert_eq!(Kernel::Fast.checked(17), Ok(32));
    }

    #[test]
    fn sum_starts_at_one() {
        assert_eq!(sum_next_powers(&[], Kernel::Fast), 1);
        assert_eq!(sum_next_powers(&[3, 5], Kernel::Slow), 1 + 4 + 8);
    }

    #[test]
    fn sum_wraps_instead_of_panicking() {
        let values = [MAX_INPUT; 4];
        let expected = 1i32.wrapping_add(MAX_INPUT.wrapping_mul(4));
        assert_eq!(sum_next_powers(&values, Kernel::Fast), expected);
        assert_eq!(sum_next_powers(&values, Kernel::Slow), expected);
    }
}
