//! The instrumented sorting engine
//!
//! This module provides everything the session controller steps against:
//! - [`operation`]: the elementary operations an algorithm is recorded as
//! - [`array`]: the visible value buffer with its read/write/compare/swap
//!   counters
//! - [`algorithms`]: the ten supported algorithms, recorded through the
//!   sorter's instrumentation helpers
//! - [`sorter`]: [`Sorter`], the concrete engine that records an operation
//!   script and replays it step by step
//!
//! # Stepping model
//!
//! The controller only ever talks to the [`SortEngine`] trait: select an
//! arrangement and an algorithm, commit, then call [`SortEngine::step_one`]
//! or the budgeted [`SortEngine::step_frame`] until it reports termination.
//! Termination is final; no further stepping is valid until a new
//! arrangement or algorithm is committed.

pub mod algorithms;
pub mod array;
pub mod operation;
pub mod sorter;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use algorithms::AlgorithmId;
pub use array::Counters;
pub use operation::Operation;
pub use sorter::Sorter;

/// Initial ordering imposed on the array before a sort begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Arrangement {
    Shuffled,
    Reversed,
    /// Leave the array in its constructed ascending order
    Identity,
}

impl Arrangement {
    pub const ALL: [Arrangement; 3] = [
        Arrangement::Shuffled,
        Arrangement::Reversed,
        Arrangement::Identity,
    ];

    /// Display label, matching the identifier used in the fragment encoding
    pub fn label(&self) -> &'static str {
        match self {
            Arrangement::Shuffled => "shuffled",
            Arrangement::Reversed => "reversed",
            Arrangement::Identity => "identity",
        }
    }
}

/// The narrow contract the session controller drives.
///
/// [`Sorter`] is the production implementation; tests drive the controller
/// with scripted mocks.
pub trait SortEngine {
    /// Destroy and rebuild the array at a new size
    fn rebuild(&mut self, size: usize);

    /// Select the initial-arrangement pass to record next
    fn arrange(&mut self, arrangement: Arrangement);

    /// Lock in the initial order by replaying the arrangement to completion
    fn commit_arrangement(&mut self);

    fn reset_counters(&mut self);

    /// Select the algorithm whose run the next steps will replay
    fn select_algorithm(&mut self, algorithm: AlgorithmId);

    /// Advance as many elementary steps as fit in the budget; false once
    /// the algorithm has terminated
    fn step_frame(&mut self, budget: Duration) -> bool;

    /// Advance exactly one elementary step; false on termination
    fn step_one(&mut self) -> bool;

    /// The most recently replayed operation, if any
    fn last_operation(&self) -> Option<Operation>;

    fn values(&self) -> &[u16];

    fn size(&self) -> usize;

    fn counters(&self) -> Counters;
}
