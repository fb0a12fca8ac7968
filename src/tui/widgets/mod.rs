//! Custom TUI widgets.

pub mod field;
pub mod task_picker;
pub mod transcript;

pub use field::{FieldView, FileStatus};
pub use task_picker::{MAX_PICKER_ROWS, TaskPicker, TaskPickerState};
pub use transcript::{Transcript, TranscriptWidget};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wraps one line of text to `width` terminal cells.
///
/// Wide (CJK) characters count as two cells. Always returns at least one
/// (possibly empty) row.
#[must_use]
pub fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![String::new()];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let char_width = ch.width().unwrap_or(0);
        if current_width + char_width > width && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += char_width;
    }
    rows.push(current);
    rows
}

/// Pads `text` with spaces to `width` cells, plus one separating space when
/// it is already that wide.
#[must_use]
pub fn pad_to_width(text: &str, width: usize) -> String {
    let used = text.width();
    if used >= width {
        format!("{text} ")
    } else {
        format!("{text}{}", " ".repeat(width - used))
    }
}
