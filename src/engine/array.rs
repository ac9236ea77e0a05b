//! The instrumented value buffer

use crate::engine::operation::Operation;

/// Monotonically accumulated instrumentation counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub reads: usize,
    pub writes: usize,
    pub compares: usize,
    pub swaps: usize,
}

impl Counters {
    /// True when no operation has been applied since the last reset
    pub fn is_zero(&self) -> bool {
        self.reads == 0 && self.writes == 0 && self.compares == 0 && self.swaps == 0
    }
}

/// The array being sorted, plus its operation counters.
///
/// The buffer starts as the ascending run `1..=size`; arrangements and
/// algorithms only ever permute or rewrite those values through
/// [`TrackedArray::apply`], which is the single place the counters are
/// bumped.
#[derive(Debug, Clone)]
pub struct TrackedArray {
    values: Vec<u16>,
    counters: Counters,
}

impl TrackedArray {
    pub fn new(size: usize) -> Self {
        let values = (1..=size as u16).collect();

        Self {
            values,
            counters: Counters::default(),
        }
    }

    pub fn values(&self) -> &[u16] {
        &self.values
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn reset_counters(&mut self) {
        self.counters = Counters::default();
    }

    /// Apply one replayed operation, mutating the buffer for writes and
    /// bumping the matching counter.
    pub fn apply(&mut self, operation: &Operation) {
        match *operation {
            Operation::Read(_) => {
                self.counters.reads += 1;
            }
            Operation::Write(index, value) => {
                self.counters.writes += 1;
                self.values[index] = value;
            }
            Operation::Compare => {
                self.counters.compares += 1;
            }
            Operation::Swap => {
                self.counters.swaps += 1;
            }
        }
    }
}
