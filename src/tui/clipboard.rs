//! Clipboard access.
//!
//! The app copies through the [`Clipboard`] trait; [`SystemClipboard`] talks
//! to the OS clipboard via `arboard`, and tests use [`MemoryClipboard`].

use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::debug;

/// Clipboard failure.
#[derive(Debug, Error)]
#[error("クリップボードにコピーできませんでした: {0}")]
pub struct ClipboardError(String);

/// Destination for copied text.
pub trait Clipboard {
    /// Replaces the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError`] if the clipboard is unavailable.
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The operating-system clipboard.
///
/// The `arboard` handle is opened on first use so headless sessions only fail
/// when something is actually copied.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| ClipboardError(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err(ClipboardError("unavailable".to_string()));
        };
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError(e.to_string()))?;
        debug!(chars = text.chars().count(), "copied to clipboard");
        Ok(())
    }
}

/// In-memory clipboard recording every copy.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    copies: Arc<Mutex<Vec<String>>>,
}

impl MemoryClipboard {
    /// Creates an empty clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything copied so far, oldest first.
    #[must_use]
    pub fn copies(&self) -> Vec<String> {
        self.copies.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.copies
            .lock()
            .map_err(|e| ClipboardError(e.to_string()))?
            .push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_shares_copies_between_clones() {
        let clipboard = MemoryClipboard::new();
        let mut handle = clipboard.clone();
        assert!(handle.copy("一つ目").is_ok());
        assert!(handle.copy("二つ目").is_ok());
        assert_eq!(clipboard.copies(), vec!["一つ目", "二つ目"]);
    }
}
