//! Application state structures.
//!
//! - **`FormUiState`**: focus and editor of the setup form
//! - **`ChatUiState`**: composer, message selection and transcript scrolling
//! - **`CommentState`**: the unhelpful-feedback comment box
//! - **`SettingsState`**: model preset selection
//! - **`LayoutState`**: layouts computed for the current frame
//!
//! Which screen is shown underneath the overlays follows the conversation
//! phase: the setup form until the first reply arrives, the chat afterwards.

use std::collections::HashMap;

use tui_textarea::TextArea;

use crate::core::{FileTicket, Model, TurnOutcome};
use crate::fs::Attachment;
use crate::tui::widgets::FileStatus;

use super::layout::{ChatLayout, SetupLayout};

/// Which overlay, if any, receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// The setup form or the chat, depending on the conversation phase.
    #[default]
    Main,
    /// Task picker overlay (Ctrl+T).
    TaskPicker,
    /// Settings overlay (Ctrl+S).
    Settings,
    /// Comment box for unhelpful feedback.
    Comment,
}

/// Results of background work, delivered through the app's channel.
#[derive(Debug)]
pub enum AppEvent {
    /// A file field finished reading.
    FileLoaded {
        /// Ticket handed out when the read started.
        ticket: FileTicket,
        /// The attachment, or a displayable error.
        result: Result<Attachment, String>,
    },
    /// A round trip to the model finished.
    TurnCompleted(TurnOutcome),
}

/// Creates an editor with the app's defaults.
pub(crate) fn new_editor(text: &str, placeholder: &str) -> TextArea<'static> {
    let lines: Vec<String> = if text.is_empty() {
        vec![String::new()]
    } else {
        text.split('\n').map(String::from).collect()
    };
    let mut editor = TextArea::new(lines);
    editor.set_placeholder_text(placeholder);
    editor.move_cursor(tui_textarea::CursorMove::Bottom);
    editor.move_cursor(tui_textarea::CursorMove::End);
    editor
}

/// Joins editor lines back into one string.
pub(crate) fn editor_text(editor: &TextArea<'_>) -> String {
    editor.lines().join("\n")
}

/// UI state of the setup form.
#[derive(Debug, Clone)]
pub struct FormUiState {
    /// Id of the focused field.
    pub focus: Option<&'static str>,
    /// Editor of the focused text, number or file-path field.
    pub editor: TextArea<'static>,
    /// Progress of file reads per field.
    pub file_status: HashMap<&'static str, FileStatus>,
    /// Validation message from the last submit attempt.
    pub banner: Option<String>,
}

impl Default for FormUiState {
    fn default() -> Self {
        Self {
            focus: None,
            editor: new_editor("", ""),
            file_status: HashMap::new(),
            banner: None,
        }
    }
}

/// Which chat pane receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatFocus {
    /// The message composer.
    #[default]
    Composer,
    /// The transcript, for copying, feedback and suggestions.
    Messages,
}

/// UI state of the chat screen.
#[derive(Debug, Clone)]
pub struct ChatUiState {
    /// Message composer.
    pub composer: TextArea<'static>,
    /// Focused pane.
    pub focus: ChatFocus,
    /// Selected message id while the transcript has focus.
    pub selected: Option<usize>,
    /// Transcript scroll position.
    pub scroll: ScrollState,
}

/// Placeholder of the chat composer.
pub(crate) const COMPOSER_PLACEHOLDER: &str = "追加の指示や質問を入力…";

impl Default for ChatUiState {
    fn default() -> Self {
        Self {
            composer: new_editor("", COMPOSER_PLACEHOLDER),
            focus: ChatFocus::default(),
            selected: None,
            scroll: ScrollState::new(),
        }
    }
}

/// Open comment box for unhelpful feedback.
#[derive(Debug, Clone)]
pub struct CommentState {
    /// Message the comment is about.
    pub message_id: usize,
    /// Comment editor.
    pub editor: TextArea<'static>,
}

impl CommentState {
    /// Opens an empty comment box for `message_id`.
    #[must_use]
    pub fn new(message_id: usize) -> Self {
        Self {
            message_id,
            editor: new_editor("", "改善が必要な点を入力してください（任意）"),
        }
    }
}

/// State of the settings overlay.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsState {
    /// Highlighted entry of [`Model::all`].
    pub selected_index: usize,
}

impl SettingsState {
    /// Opens the overlay with `model_id` highlighted, if it is a preset.
    #[must_use]
    pub fn open(model_id: &str) -> Self {
        let selected_index = Model::from_id(model_id)
            .and_then(|model| Model::all().iter().position(|m| *m == model))
            .unwrap_or(0);
        Self { selected_index }
    }

    /// The highlighted preset.
    #[must_use]
    pub fn selected_model(&self) -> Model {
        Model::all()
            .get(self.selected_index)
            .copied()
            .unwrap_or_default()
    }

    /// Moves the highlight up.
    pub fn select_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Moves the highlight down.
    pub fn select_down(&mut self) {
        let max_index = Model::all().len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }
}

/// Severity of a status line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Neutral information.
    Info,
    /// Something succeeded.
    Success,
    /// Something failed.
    Error,
}

/// One-line message shown in the status area until the next action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Message text.
    pub text: String,
    /// Severity.
    pub kind: StatusKind,
}

impl StatusMessage {
    /// Informational message.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    /// Success message.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Success,
        }
    }

    /// Error message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }
}

/// Layouts for the current frame.
///
/// Updated by `App::update_layout` before each render so key handlers can
/// scroll with the same dimensions the last frame was drawn with.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutState {
    /// Setup screen layout.
    pub setup: SetupLayout,
    /// Chat screen layout.
    pub chat: ChatLayout,
}

/// Scroll position of a scrollable view.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollState {
    /// Index of the first visible line.
    pub offset: usize,
    /// Whether to follow new content at the bottom.
    /// Cleared when the user scrolls up, set again at the bottom.
    pub auto_scroll: bool,
}

impl ScrollState {
    /// Creates a scroll state following the bottom.
    #[must_use]
    pub fn new() -> Self {
        Self {
            offset: 0,
            auto_scroll: true,
        }
    }

    /// Scrolls up by one line, disabling auto-scroll.
    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
        self.auto_scroll = false;
    }

    /// Scrolls down by one line, enabling auto-scroll if at the bottom.
    pub fn scroll_down(&mut self, content_len: usize, visible_height: usize) {
        let max_scroll = content_len.saturating_sub(visible_height);
        self.offset = (self.offset + 1).min(max_scroll);
        self.auto_scroll = self.offset >= max_scroll;
    }

    /// Scrolls up by a page, disabling auto-scroll.
    pub fn page_up(&mut self, page_size: usize) {
        self.offset = self.offset.saturating_sub(page_size);
        self.auto_scroll = false;
    }

    /// Scrolls down by a page, enabling auto-scroll if at the bottom.
    pub fn page_down(&mut self, content_len: usize, visible_height: usize, page_size: usize) {
        let max_scroll = content_len.saturating_sub(visible_height);
        self.offset = (self.offset + page_size).min(max_scroll);
        self.auto_scroll = self.offset >= max_scroll;
    }

    /// Scrolls to the top, disabling auto-scroll.
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_scroll = false;
    }

    /// Scrolls to the bottom, enabling auto-scroll.
    pub fn scroll_to_bottom(&mut self, content_len: usize, visible_height: usize) {
        self.offset = content_len.saturating_sub(visible_height);
        self.auto_scroll = true;
    }

    /// Brings `line` into view without moving more than needed.
    pub fn reveal(&mut self, line: usize, content_len: usize, visible_height: usize) {
        let max_scroll = content_len.saturating_sub(visible_height);
        if line < self.offset {
            self.offset = line;
        } else if visible_height > 0 && line >= self.offset + visible_height {
            self.offset = line + 1 - visible_height;
        }
        self.offset = self.offset.min(max_scroll);
        self.auto_scroll = self.offset >= max_scroll;
    }

    /// Auto-scrolls to the bottom if auto-scroll is enabled.
    pub fn auto_scroll_if_enabled(&mut self, content_len: usize, visible_height: usize) {
        if self.auto_scroll {
            self.offset = content_len.saturating_sub(visible_height);
        } else {
            self.offset = self.offset.min(content_len.saturating_sub(visible_height));
        }
    }
}


#[cfg(test)]
mod settings_state_tests {
    use super::*;

    #[test]
    fn open_highlights_current_preset() {
        let state = SettingsState::open(Model::GeminiPro.id());
        assert_eq!(state.selected_model(), Model::GeminiPro);
    }

    #[test]
    fn custom_model_falls_back_to_first_preset() {
        let state = SettingsState::open("my-tuned-model");
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn selection_is_clamped() {
        let mut state = SettingsState::default();
        state.select_up();
        assert_eq!(state.selected_index, 0);
        for _ in 0..10 {
            state.select_down();
        }
        assert_eq!(state.selected_index, Model::all().len() - 1);
    }
}
