//! Host-facing ports the session drives
//!
//! Keeping these behind traits keeps the controller free of filesystem and
//! clipboard concerns, and lets tests record what the session pushed out.

/// Receives the encoded fragment after every accepted settings change.
pub trait FragmentSink {
    fn persist(&mut self, fragment: &str);
}

/// Puts the shareable fragment wherever the host shares text from.
///
/// Failures are reported as a message for the diagnostics log; the session
/// never surfaces them to the user.
pub trait SharePort {
    fn copy_text(&mut self, text: &str) -> Result<(), String>;
}
