//! Layout calculation helpers for the TUI.
//!
//! Single source of truth for screen layouts, shared by `App::update_layout`
//! (scroll calculations in key handlers) and the render methods.

use ratatui::layout::{Constraint, Layout, Rect};

use crate::tui::widgets::TranscriptWidget;

/// Layout of the setup screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetupLayout {
    /// Header area (1 line).
    pub header: Rect,
    /// Selected task bar (bordered).
    pub task_bar: Rect,
    /// Validation or error banner (1 line).
    pub banner: Rect,
    /// Form fields.
    pub form: Rect,
    /// Footer area (key hints, 1 line).
    pub footer: Rect,
}

/// Layout constraints for the setup screen.
const SETUP_LAYOUT_CONSTRAINTS: [Constraint; 5] = [
    Constraint::Length(1), // Header
    Constraint::Length(3), // Task bar
    Constraint::Length(1), // Banner
    Constraint::Min(5),    // Form (grows)
    Constraint::Length(1), // Footer
];

/// Calculates the layout for the setup screen.
#[must_use]
pub fn calculate_setup_layout(area: Rect) -> SetupLayout {
    let chunks = Layout::vertical(SETUP_LAYOUT_CONSTRAINTS).split(area);
    SetupLayout {
        header: chunks[0],
        task_bar: chunks[1],
        banner: chunks[2],
        form: chunks[3],
        footer: chunks[4],
    }
}

/// Layout of the chat screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatLayout {
    /// Header area (1 line).
    pub header: Rect,
    /// Transcript area (scrollable, main content).
    pub transcript: Rect,
    /// Status line (1 line).
    pub status: Rect,
    /// Message composer.
    pub composer: Rect,
    /// Footer area (key hints, 1 line).
    pub footer: Rect,
    /// Visible height of the transcript (excluding borders).
    pub transcript_visible_height: usize,
    /// Content width of the transcript (excluding borders and scrollbar).
    pub transcript_content_width: usize,
}

/// Layout constraints for the chat screen.
const CHAT_LAYOUT_CONSTRAINTS: [Constraint; 5] = [
    Constraint::Length(1), // Header
    Constraint::Min(5),    // Transcript (grows)
    Constraint::Length(1), // Status
    Constraint::Length(5), // Composer
    Constraint::Length(1), // Footer
];

/// Calculates the layout for the chat screen.
#[must_use]
pub fn calculate_chat_layout(area: Rect) -> ChatLayout {
    let chunks = Layout::vertical(CHAT_LAYOUT_CONSTRAINTS).split(area);
    let transcript = chunks[1];
    ChatLayout {
        header: chunks[0],
        transcript,
        status: chunks[2],
        composer: chunks[3],
        footer: chunks[4],
        transcript_visible_height: TranscriptWidget::visible_height(transcript),
        transcript_content_width: TranscriptWidget::content_width(transcript),
    }
}

/// Returns the index of the first field to draw so that field `focus` fits
/// into `available` rows.
///
/// `heights` are the row counts of the fields in order. Fields before the
/// focused one are dropped from the top until it fits.
#[must_use]
pub fn form_window_start(heights: &[u16], focus: usize, available: u16) -> usize {
    let focus = focus.min(heights.len().saturating_sub(1));
    let mut start = 0;
    while start < focus {
        let used: u32 = heights[start..=focus].iter().map(|h| u32::from(*h)).sum();
        if used <= u32::from(available) {
            break;
        }
        start += 1;
    }
    start
}

/// Centers a `width` x `height` rectangle inside `area`, clamped to it.
#[must_use]
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}
