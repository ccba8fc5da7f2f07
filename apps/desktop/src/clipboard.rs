use anyhow::Context;
use converter_core::Clipboard;

/// System clipboard backed by `arboard`; a handle is opened per copy.
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> anyhow::Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
        clipboard
            .set_text(text.to_string())
            .context("failed to set clipboard text")
    }
}
