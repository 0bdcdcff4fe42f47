//! powbench core
//!
//! Next-power-of-two kernels and the input arrays they are measured over.

pub mod inputs;
pub mod pow2;

pub use inputs::{
    entropy_seed, InputArray, InputBounds, InputRange, InputSet, DEFAULT_MEDIUM, DEFAULT_SIZE,
    DEFAULT_SMALL,
};
pub use pow2::{fast, slow, sum_next_powers, Kernel, PowerError, MAX_INPUT};
