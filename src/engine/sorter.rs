//! The script-recording sorting engine
//!
//! A [`Sorter`] never sorts the visible array directly. Selecting an
//! algorithm (or an arrangement) only remembers *what* to run; the first
//! step records the full run against a scratch copy of the values as a flat
//! operation script, and stepping replays that script one elementary
//! operation at a time against the visible [`TrackedArray`].

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::engine::algorithms::AlgorithmId;
use crate::engine::array::{Counters, TrackedArray};
use crate::engine::operation::Operation;
use crate::engine::{Arrangement, SortEngine};

/// What the next recorded script will contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Plan {
    /// Nothing selected; stepping terminates immediately
    Nothing,
    /// An initial-arrangement pass (shuffle, reverse, or no-op)
    Arrange(Arrangement),
    /// A full run of the given algorithm
    Sort(AlgorithmId),
}

/// The concrete sorting engine driven by the session controller.
pub struct Sorter {
    array: TrackedArray,
    size: usize,
    scratch: Vec<u16>,
    plan: Plan,
    script: Vec<Operation>,
    cursor: usize,
}

impl Sorter {
    pub fn new(size: usize) -> Self {
        Self {
            array: TrackedArray::new(size),
            size,
            scratch: Vec::with_capacity(size),
            plan: Plan::Nothing,
            script: vec![],
            cursor: 0,
        }
    }

    /// Advance one elementary operation; false once the script is spent.
    ///
    /// The script is recorded lazily on the first step after a plan change,
    /// so the scratch run happens here rather than at selection time.
    pub fn step_one(&mut self) -> bool {
        if self.script.is_empty() {
            self.record_script();
        }

        match self.script.get(self.cursor) {
            Some(operation) => {
                self.array.apply(operation);
                self.cursor += 1;
                true
            }
            None => false,
        }
    }

    /// Replay as many operations as fit in the wall-clock budget.
    ///
    /// Always makes at least one step of progress so a zero budget cannot
    /// stall the animation. Returns false once the script terminates.
    pub fn step_frame(&mut self, budget: Duration) -> bool {
        let deadline = Instant::now() + budget;

        loop {
            if !self.step_one() {
                return false;
            }

            if Instant::now() >= deadline {
                return true;
            }
        }
    }

    /// Replay the remainder of the script in one go
    pub fn flush(&mut self) {
        while self.step_one() {}
    }

    fn set_plan(&mut self, plan: Plan) {
        self.plan = plan;
        self.script.clear();
        self.cursor = 0;
        self.array.reset_counters();
    }

    fn record_script(&mut self) {
        self.scratch.extend_from_slice(self.array.values());

        match self.plan {
            Plan::Nothing | Plan::Arrange(Arrangement::Identity) => {}
            Plan::Arrange(Arrangement::Shuffled) => self.record_shuffle(),
            Plan::Arrange(Arrangement::Reversed) => self.record_reverse(),
            Plan::Sort(algorithm) => algorithm.record(self),
        }

        self.scratch.clear();
    }

    fn record_shuffle(&mut self) {
        let mut rng = rand::thread_rng();

        for i in 0..self.size.saturating_sub(1) {
            let j = rng.gen_range(0..self.size - 1);
            self.swap(i, j);
        }
    }

    fn record_reverse(&mut self) {
        for i in 0..self.size {
            self.write(i, (self.size - i) as u16);
        }
    }
}

/// Recording helpers used by the algorithm implementations. Each one acts
/// on the scratch buffer and appends the matching [`Operation`]s to the
/// script.
impl Sorter {
    pub(crate) fn read(&mut self, index: usize) -> u16 {
        self.script.push(Operation::Read(index));
        self.scratch[index]
    }

    pub(crate) fn write(&mut self, index: usize, value: u16) {
        self.script.push(Operation::Write(index, value));
        self.scratch[index] = value;
    }

    pub(crate) fn swap(&mut self, left: usize, right: usize) {
        let left_value = self.read(left);
        let right_value = self.read(right);

        self.write(left, right_value);
        self.write(right, left_value);

        self.script.push(Operation::Swap);
    }

    pub(crate) fn compare(&mut self, left: usize, right: usize) -> Ordering {
        let left_value = self.read(left);
        let right_value = self.read(right);

        self.script.push(Operation::Compare);
        left_value.cmp(&right_value)
    }

    pub(crate) fn greater(&mut self, left: usize, right: usize) -> bool {
        self.compare(left, right) == Ordering::Greater
    }
}

impl SortEngine for Sorter {
    fn rebuild(&mut self, size: usize) {
        self.array = TrackedArray::new(size);
        self.size = size;
        self.scratch = Vec::with_capacity(size);
        self.plan = Plan::Nothing;
        self.script.clear();
        self.cursor = 0;
    }

    fn arrange(&mut self, arrangement: Arrangement) {
        self.set_plan(Plan::Arrange(arrangement));
    }

    fn commit_arrangement(&mut self) {
        self.flush();
    }

    fn reset_counters(&mut self) {
        self.array.reset_counters();
    }

    fn select_algorithm(&mut self, algorithm: AlgorithmId) {
        self.set_plan(Plan::Sort(algorithm));
    }

    fn step_frame(&mut self, budget: Duration) -> bool {
        Sorter::step_frame(self, budget)
    }

    fn step_one(&mut self) -> bool {
        Sorter::step_one(self)
    }

    fn last_operation(&self) -> Option<Operation> {
        if self.cursor == 0 {
            return None;
        }

        self.script.get(self.cursor - 1).copied()
    }

    fn values(&self) -> &[u16] {
        self.array.values()
    }

    fn size(&self) -> usize {
        self.size
    }

    fn counters(&self) -> Counters {
        self.array.counters()
    }
}
