//! Session configuration and its persistence
//!
//! - [`Configuration`]: the immutable settings record (initial arrangement,
//!   array size, per-frame time budget, algorithm)
//! - [`store`]: the settings store that replaces the record wholesale on
//!   every accepted update
//! - [`codec`]: the percent-encoded JSON fragment encoding used for the
//!   shareable/persisted state
//! - [`fragment`]: state-file persistence of the fragment string
//!
//! The applicable value set for every setting category is statically
//! enumerated here; the UI's "select value" commands cycle through these
//! sets and can never name an unknown setting.

pub mod codec;
pub mod fragment;
pub mod store;

pub use store::SettingsStore;

use serde::{Deserialize, Serialize};

use crate::engine::{AlgorithmId, Arrangement};

/// Selectable array sizes
pub const SIZE_CHOICES: [usize; 7] = [64, 128, 256, 512, 1024, 2048, 4096];

/// Selectable per-frame time budgets, in milliseconds
pub const BUDGET_CHOICES_MS: [u64; 6] = [1, 2, 5, 10, 25, 50];

/// The persisted settings record.
///
/// Immutable per value: updates build a new record and replace the old one
/// wholesale, so observers holding the previous instance are never mutated
/// under their feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub initial: Arrangement,
    pub size: usize,
    pub step_time_budget_ms: u64,
    pub algorithm: AlgorithmId,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            initial: Arrangement::Shuffled,
            size: 512,
            step_time_budget_ms: 10,
            algorithm: AlgorithmId::Bubble,
        }
    }
}

impl Configuration {
    /// Hard cap on array size
    pub const MAX_SIZE: usize = 4096;

    /// Cap applied on constrained displays
    pub const MAX_SIZE_CONSTRAINED: usize = 1024;

    /// Clamp the record into the bounds the host can actually display.
    ///
    /// `max_size` is platform-specific: narrow terminals get a lower cap.
    pub fn sanitize(mut self, max_size: usize) -> Self {
        self.size = self.size.clamp(1, max_size);
        self.step_time_budget_ms = self.step_time_budget_ms.max(1);
        self
    }
}

/// One settings category exposed to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingCategory {
    Initial,
    Size,
    StepTimeBudget,
    Algorithm,
}

impl SettingCategory {
    /// The update that advances this category to the next value in its
    /// enumerated set, wrapping at the end.
    ///
    /// Sizes above `max_size` are not part of the cycle on the current
    /// host, the same way a constrained display never offers them.
    pub fn cycled(self, current: &Configuration, max_size: usize) -> SettingUpdate {
        match self {
            SettingCategory::Initial => {
                SettingUpdate::Initial(next_in(&Arrangement::ALL, &current.initial))
            }
            SettingCategory::Size => {
                let allowed: Vec<usize> = SIZE_CHOICES
                    .iter()
                    .copied()
                    .filter(|&size| size <= max_size)
                    .collect();
                SettingUpdate::Size(next_in(&allowed, &current.size))
            }
            SettingCategory::StepTimeBudget => SettingUpdate::StepTimeBudgetMs(next_in(
                &BUDGET_CHOICES_MS,
                &current.step_time_budget_ms,
            )),
            SettingCategory::Algorithm => {
                SettingUpdate::Algorithm(next_in(&AlgorithmId::ALL, &current.algorithm))
            }
        }
    }
}

fn next_in<T: Copy + PartialEq>(choices: &[T], current: &T) -> T {
    let next = choices
        .iter()
        .position(|choice| choice == current)
        .map(|index| (index + 1) % choices.len())
        .unwrap_or(0);

    choices[next]
}

/// A single-field settings update.
///
/// A tagged union rather than a string key: unknown settings are
/// unrepresentable, and each variant carries a value from its category's
/// enumerated set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingUpdate {
    Initial(Arrangement),
    Size(usize),
    StepTimeBudgetMs(u64),
    Algorithm(AlgorithmId),
}

impl SettingUpdate {
    /// Apply this update to a configuration, returning the replacement
    pub fn applied_to(self, config: Configuration) -> Configuration {
        let mut next = config;

        match self {
            SettingUpdate::Initial(initial) => next.initial = initial,
            SettingUpdate::Size(size) => next.size = size,
            SettingUpdate::StepTimeBudgetMs(budget) => next.step_time_budget_ms = budget,
            SettingUpdate::Algorithm(algorithm) => next.algorithm = algorithm,
        }

        next
    }
}
