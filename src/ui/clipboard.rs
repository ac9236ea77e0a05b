//! System clipboard share port

use crate::session::ports::SharePort;

/// Copies share fragments to the OS clipboard via arboard.
///
/// The clipboard handle is created per copy: some platforms invalidate
/// long-lived handles when another program takes clipboard ownership.
pub struct SystemClipboard;

impl SharePort for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> Result<(), String> {
        let mut clipboard = arboard::Clipboard::new().map_err(|err| err.to_string())?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|err| err.to_string())
    }
}
