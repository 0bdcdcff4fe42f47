//! The benchmark table: named operations iterated by the driver.

use crate::error::BenchError;
use powbench_core::{sum_next_powers, InputRange, InputSet, Kernel};
use regex::Regex;

/// A measured operation over one input array. Returns a value so the
/// work cannot be optimised away.
pub type BenchFn = fn(&[i32]) -> i32;

#[derive(Debug, Clone)]
pub struct BenchCase {
    pub name: String,
    pub range: InputRange,
    pub op: BenchFn,
    /// Logical operations per invocation; scores are reported per operation.
    pub ops_per_invocation: usize,
}

impl BenchCase {
    pub fn new(name: impl Into<String>, range: InputRange, op: BenchFn, ops: usize) -> Self {
        Self {
            name: name.into(),
            range,
            op,
            ops_per_invocation: ops,
        }
    }

    /// Sum `kernel` over every element of the `range` array, named like
    /// `smallPowerFast`.
    pub fn summing(range: InputRange, kernel: Kernel, size: usize) -> Self {
        let op: BenchFn = match kernel {
            Kernel::Fast => sum_fast,
            Kernel::Slow => sum_slow,
        };
        Self::new(format!("{}Power{}", range.name(), kernel.name()), range, op, size)
    }

    #[inline]
    pub fn invoke(&self, inputs: &InputSet) -> i32 {
        (self.op)(inputs.get(self.range).values())
    }
}

fn sum_fast(values: &[i32]) -> i32 {
    sum_next_powers(values, Kernel::Fast)
}

fn sum_slow(values: &[i32]) -> i32 {
    sum_next_powers(values, Kernel::Slow)
}

#[derive(Debug, Clone, Default)]
pub struct BenchTable {
    cases: Vec<BenchCase>,
}

impl BenchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four fast/slow by small/medium cases, each over `size` elements.
    pub fn standard(size: usize) -> Self {
        let mut table = Self::new();
        for range in [InputRange::Small, InputRange::Medium] {
            for kernel in Kernel::ALL {
                table.cases.push(BenchCase::summing(range, kernel, size));
            }
        }
        table
    }

    pub fn register(&mut self, case: BenchCase) -> Result<(), BenchError> {
        if self.get(&case.name).is_some() {
            return Err(BenchError::DuplicateCase(case.name));
        }
        self.cases.push(case);
        Ok(())
    }

    /// Keep only cases whose name matches `pattern`.
    pub fn filtered(self, pattern: &str) -> Result<Self, BenchError> {
        let re = Regex::new(pattern).map_err(|source| BenchError::Filter {
            pattern: pattern.to_string(),
            source,
        })?;
        let cases: Vec<BenchCase> = self
            .cases
            .into_iter()
            .filter(|c| re.is_match(&c.name))
            .collect();
        if cases.is_empty() {
            return Err(BenchError::NoMatch(pattern.to_string()));
        }
        Ok(Self { cases })
    }

    pub fn get(&self, name: &str) -> Option<&BenchCase> {
        self.cases.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BenchCase> {
        self.cases.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.cases.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}
