//! The settings store

use crate::config::{Configuration, SettingUpdate};

/// Holds the current configuration.
///
/// The store itself only swaps records; the running-state rejection rule
/// lives in the session, which is the component that knows whether an
/// animation is in flight.
#[derive(Debug)]
pub struct SettingsStore {
    config: Configuration,
}

impl SettingsStore {
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    pub fn get(&self) -> Configuration {
        self.config
    }

    /// Replace the configuration wholesale, returning the previous record
    /// so observers can diff against it.
    pub fn apply(&mut self, update: SettingUpdate) -> Configuration {
        let previous = self.config;
        self.config = update.applied_to(previous);
        previous
    }
}
