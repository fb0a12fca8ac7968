//! TUI presentation layer.

pub mod clipboard;
pub mod setup;
pub mod theme;
pub mod widgets;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, SystemClipboard};
pub use setup::TerminalEventGuard;
pub use theme::Theme;
