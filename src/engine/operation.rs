//! Elementary operations reported by the sorting engine

use std::fmt;

/// A single instrumented step of a sorting algorithm.
///
/// Every algorithm is recorded as a flat sequence of these operations and
/// replayed one at a time, which is what makes frame-by-frame playback
/// possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Read the value at an index
    Read(usize),
    /// Write a value to an index
    Write(usize, u16),
    /// Compare the two most recently read values
    Compare,
    /// Marker emitted after the pair of writes that make up a swap
    Swap,
}

impl Operation {
    /// Index to highlight while this operation is on screen.
    ///
    /// Only reads carry a cursor; writes are already visible as the bar
    /// that changed.
    pub fn cursor(&self) -> Option<usize> {
        match self {
            Operation::Read(index) => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Read(index) => write!(f, "Read({})", index),
            Operation::Write(index, value) => write!(f, "Write({}, {})", index, value),
            Operation::Compare => write!(f, "Compare"),
            Operation::Swap => write!(f, "Swap"),
        }
    }
}
