//! Terminal setup and configuration utilities.
//!
//! Enables bracketed paste (multi-line paste arrives as one event) and the
//! keyboard enhancement protocol (Shift+Enter is distinguishable from Enter).

use std::io::stdout;

use ratatui::crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use ratatui::crossterm::execute;
use tracing::{debug, warn};

/// Guard that disables the terminal event modes it enabled on drop.
///
/// Dropping also runs during unwinding, so a panic does not leave the
/// terminal in paste or enhancement mode.
pub struct TerminalEventGuard {
    bracketed_paste_enabled: bool,
    keyboard_enhancement_enabled: bool,
}

impl TerminalEventGuard {
    #[must_use]
    pub fn new() -> Self {
        let mut guard = Self {
            bracketed_paste_enabled: false,
            keyboard_enhancement_enabled: false,
        };

        match execute!(stdout(), EnableBracketedPaste) {
            Ok(()) => guard.bracketed_paste_enabled = true,
            Err(e) => warn!(error = %e, "bracketed paste unavailable"),
        }

        match execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        ) {
            Ok(()) => guard.keyboard_enhancement_enabled = true,
            // Shift+Enter then reads as Enter; Alt+Enter still inserts a newline.
            Err(e) => debug!(error = %e, "keyboard enhancement unavailable"),
        }

        guard
    }
}

impl Default for TerminalEventGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalEventGuard {
    fn drop(&mut self) {
        if self.keyboard_enhancement_enabled {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        if self.bracketed_paste_enabled {
            let _ = execute!(stdout(), DisableBracketedPaste);
        }
    }
}
