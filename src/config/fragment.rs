//! State-file persistence of the fragment string
//!
//! The state file plays the role the location hash plays in a browser: it
//! is read once at startup and rewritten on every accepted settings change.
//! IO failures here are diagnostics, never user-facing errors.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::session::ports::FragmentSink;

/// Read the persisted fragment, if there is one.
pub fn load(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to read state file");
            None
        }
    }
}

/// Fragment sink that mirrors every accepted change into the state file.
pub struct FileFragmentSink {
    path: PathBuf,
}

impl FileFragmentSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl FragmentSink for FileFragmentSink {
    fn persist(&mut self, fragment: &str) {
        if let Err(err) = fs::write(&self.path, fragment) {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to persist fragment");
        }
    }
}
