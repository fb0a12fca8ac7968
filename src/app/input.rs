//! Text input handling for the App.
//!
//! Keys of the two base screens:
//! - the setup form, where each field kind edits differently
//! - the chat, split into the composer and the message list
//!
//! Editing itself is done by `tui-textarea`; this module decides which keys
//! reach an editor and what the rest do.

use std::path::PathBuf;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use super::App;
use super::state::{
    AppEvent, AppMode, COMPOSER_PLACEHOLDER, ChatFocus, StatusMessage, editor_text, new_editor,
};
use crate::catalog::{FieldDefinition, FieldKind};
use crate::core::{PendingTurn, Phase, code_blocks};
use crate::fs::read_attachment;
use crate::tui::widgets::FileStatus;

/// Scroll page size for navigation.
const SCROLL_PAGE_SIZE: usize = 10;

/// Keys sending the first, second and third suggestion.
const SUGGESTION_KEYS: [char; 3] = ['1', '2', '3'];

/// Returns true for keys that insert a line break instead of submitting.
fn is_newline_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => key
            .modifiers
            .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT),
        KeyCode::Char('j') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Returns true for the submit shortcuts shared by the form and composer.
fn is_submit_key(key: &KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    matches!(key.code, KeyCode::Char('d') | KeyCode::Enter if ctrl)
}

/// Normalizes pasted text: unix line endings, no control characters.
fn normalize_paste(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .collect()
}

/// Resolves a typed file path: surrounding quotes from drag-and-drop are
/// dropped and a leading `~/` is expanded.
fn resolve_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| {
            trimmed
                .strip_prefix(*q)
                .and_then(|rest| rest.strip_suffix(*q))
        })
        .unwrap_or(trimmed);
    if let Some(rest) = unquoted.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(unquoted)
}

/// Index of the next choice in `direction`, wrapping. Nothing selected
/// starts at the first choice going forward and the last going back.
fn cycle_choice(choices: &[&str], current: &str, forward: bool) -> Option<usize> {
    if choices.is_empty() {
        return None;
    }
    let len = choices.len();
    let next = match (choices.iter().position(|c| *c == current), forward) {
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
        (None, true) => 0,
        (None, false) => len - 1,
    };
    Some(next)
}

impl App {
    // =========================================================================
    // Setup Form
    // =========================================================================

    pub(crate) fn handle_setup_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if is_submit_key(&key) {
            self.submit_form();
            return;
        }
        match key.code {
            KeyCode::Char('t') if ctrl => {
                self.sync_editor_to_form();
                self.open_task_picker();
                return;
            }
            KeyCode::Tab => {
                self.sync_editor_to_form();
                self.focus_next();
                return;
            }
            KeyCode::BackTab => {
                self.sync_editor_to_form();
                self.focus_prev();
                return;
            }
            KeyCode::Esc => {
                self.form_ui.banner = None;
                self.conversation.dismiss_error();
                return;
            }
            _ => {}
        }

        let Some(field) = self.focused_field() else {
            return;
        };
        match field.kind {
            FieldKind::Choice => self.handle_choice_key(field, key),
            FieldKind::File => self.handle_file_key(field, key),
            FieldKind::Multiline => {
                if is_newline_key(&key) {
                    self.form_ui.editor.insert_newline();
                } else {
                    self.form_ui.editor.input(key);
                }
                self.sync_editor_to_form();
            }
            FieldKind::Text | FieldKind::Number => match key.code {
                KeyCode::Enter | KeyCode::Down => self.focus_next(),
                KeyCode::Up => self.focus_prev(),
                KeyCode::Char('j') if ctrl => {}
                KeyCode::Char(c)
                    if field.kind == FieldKind::Number
                        && !ctrl
                        && !(c.is_ascii_digit() || c == '.' || c == '-') => {}
                _ => {
                    self.form_ui.editor.input(key);
                    self.sync_editor_to_form();
                }
            },
        }
    }

    fn handle_choice_key(&mut self, field: &'static FieldDefinition, key: KeyEvent) {
        let forward = match key.code {
            KeyCode::Right | KeyCode::Char(' ' | 'l') => true,
            KeyCode::Left | KeyCode::Char('h') => false,
            KeyCode::Backspace | KeyCode::Delete => {
                self.form.set_field_value(field.id, "");
                return;
            }
            KeyCode::Enter | KeyCode::Down => return self.focus_next(),
            KeyCode::Up => return self.focus_prev(),
            _ => return,
        };
        let current = self.form.values().text(field.id).to_string();
        if let Some(index) = cycle_choice(field.choices, &current, forward) {
            self.form.set_field_value(field.id, field.choices[index]);
        }
    }

    fn handle_file_key(&mut self, field: &'static FieldDefinition, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let path = editor_text(&self.form_ui.editor);
                if path.trim().is_empty() {
                    self.focus_next();
                } else {
                    self.start_file_read(field, &path);
                }
            }
            KeyCode::Up => self.focus_prev(),
            KeyCode::Down => self.focus_next(),
            KeyCode::Backspace
                if editor_text(&self.form_ui.editor).is_empty()
                    && self.form.values().file_name(field.id).is_some() =>
            {
                self.form.set_field_value(field.id, "");
                self.form_ui.file_status.remove(field.id);
                self.focus_field(field);
            }
            _ => {
                self.form_ui.editor.input(key);
            }
        }
    }

    /// Reads `raw_path` in the background into file field `field`.
    pub(crate) fn start_file_read(&mut self, field: &'static FieldDefinition, raw_path: &str) {
        let Some(ticket) = self.form.begin_file_read(field.id) else {
            return;
        };
        let path = resolve_path(raw_path);
        let accept = field.accepted_extensions();
        info!(field = field.id, path = %path.display(), "reading attachment");

        self.form_ui
            .file_status
            .insert(field.id, FileStatus::Loading(path.display().to_string()));
        self.form_ui.editor = new_editor("", "");

        let tx = self.event_sender();
        Self::spawn(async move {
            let result = read_attachment(&path, accept)
                .await
                .map_err(|e| e.to_string());
            if tx
                .send(AppEvent::FileLoaded { ticket, result })
                .await
                .is_err()
            {
                debug!("app closed before attachment was read");
            }
        });
    }

    // =========================================================================
    // Chat
    // =========================================================================

    pub(crate) fn handle_chat_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let (len, height) = self.transcript_dimensions();

        match key.code {
            KeyCode::PageUp => return self.chat_ui.scroll.page_up(SCROLL_PAGE_SIZE),
            KeyCode::PageDown => {
                return self.chat_ui.scroll.page_down(len, height, SCROLL_PAGE_SIZE);
            }
            KeyCode::Home if ctrl => return self.chat_ui.scroll.scroll_to_top(),
            KeyCode::End if ctrl => return self.chat_ui.scroll.scroll_to_bottom(len, height),
            _ => {}
        }

        match self.chat_ui.focus {
            ChatFocus::Composer => self.handle_composer_key(key),
            ChatFocus::Messages => self.handle_message_key(key),
        }
    }

    fn transcript_dimensions(&self) -> (usize, usize) {
        (
            self.transcript().len(),
            self.layout.chat.transcript_visible_height,
        )
    }

    fn handle_composer_key(&mut self, key: KeyEvent) {
        if is_newline_key(&key) {
            self.chat_ui.composer.insert_newline();
            return;
        }
        if is_submit_key(&key) || (key.code == KeyCode::Enter && key.modifiers.is_empty()) {
            self.send_composer();
            return;
        }
        match key.code {
            KeyCode::Tab => self.focus_messages(),
            KeyCode::Up if editor_text(&self.chat_ui.composer).is_empty() => self.focus_messages(),
            _ => {
                self.chat_ui.composer.input(key);
            }
        }
    }

    /// Sends the composer text as the next user message.
    pub(crate) fn send_composer(&mut self) {
        if self.conversation.is_busy() {
            self.status = Some(StatusMessage::info("応答を待っています…"));
            return;
        }
        let text = editor_text(&self.chat_ui.composer);
        match self.conversation.send_message(&text) {
            Ok(turn) => {
                self.chat_ui.composer = new_editor("", COMPOSER_PLACEHOLDER);
                self.after_send(turn);
            }
            Err(e) => self.status = Some(StatusMessage::error(e.to_string())),
        }
    }

    fn after_send(&mut self, turn: PendingTurn) {
        self.chat_ui.focus = ChatFocus::Composer;
        self.chat_ui.selected = None;
        self.chat_ui.scroll.auto_scroll = true;
        self.dispatch_turn(turn);
        self.sync_chat_scroll();
    }

    fn focus_messages(&mut self) {
        let last = self.conversation.messages().len().checked_sub(1);
        if last.is_none() {
            return;
        }
        self.chat_ui.focus = ChatFocus::Messages;
        self.chat_ui.selected = last;
        self.reveal_selected();
    }

    fn focus_composer(&mut self) {
        self.chat_ui.focus = ChatFocus::Composer;
        self.chat_ui.selected = None;
    }

    fn reveal_selected(&mut self) {
        let Some(id) = self.chat_ui.selected else {
            return;
        };
        let transcript = self.transcript();
        if let Some(start) = transcript.message_start(id) {
            self.chat_ui.scroll.reveal(
                start,
                transcript.len(),
                self.layout.chat.transcript_visible_height,
            );
        }
    }

    fn handle_message_key(&mut self, key: KeyEvent) {
        let count = self.conversation.messages().len();
        let Some(selected) = self.chat_ui.selected.filter(|id| *id < count) else {
            self.focus_composer();
            return;
        };

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.chat_ui.selected = Some(selected.saturating_sub(1));
                self.reveal_selected();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.chat_ui.selected = Some((selected + 1).min(count - 1));
                self.reveal_selected();
            }
            KeyCode::Home => {
                self.chat_ui.selected = Some(0);
                self.reveal_selected();
            }
            KeyCode::End => {
                self.chat_ui.selected = Some(count - 1);
                self.reveal_selected();
            }
            KeyCode::Char('c') => self.copy_message(selected, false),
            KeyCode::Char('y') => self.copy_message(selected, true),
            KeyCode::Char('+' | '=') => self.give_positive_feedback(selected),
            KeyCode::Char('-') => self.open_comment(selected),
            KeyCode::Char(c @ '1'..='3') => {
                let index = SUGGESTION_KEYS.iter().position(|k| *k == c).unwrap_or(0);
                self.send_suggestion(selected, index);
            }
            KeyCode::Esc | KeyCode::Tab | KeyCode::Char('i') => self.focus_composer(),
            _ => {}
        }
    }

    /// Copies message `id` to the clipboard; with `code_only`, just its code
    /// blocks when it has any.
    pub(crate) fn copy_message(&mut self, id: usize, code_only: bool) {
        let Some(message) = self.conversation.message(id) else {
            return;
        };
        let blocks = if code_only {
            code_blocks(&message.text)
        } else {
            Vec::new()
        };
        let (text, label) = if blocks.is_empty() {
            (message.text.clone(), "コピーしました")
        } else {
            (blocks.join("\n\n"), "コードをコピーしました")
        };

        self.status = Some(match self.services.clipboard.copy(&text) {
            Ok(()) => StatusMessage::success(label),
            Err(e) => StatusMessage::error(e.to_string()),
        });
    }

    fn send_suggestion(&mut self, message_id: usize, index: usize) {
        if self.conversation.is_busy() {
            self.status = Some(StatusMessage::info("応答を待っています…"));
            return;
        }
        match self.conversation.select_suggestion(message_id, index) {
            Ok(turn) => self.after_send(turn),
            Err(e) => self.status = Some(StatusMessage::error(e.to_string())),
        }
    }

    // =========================================================================
    // Paste
    // =========================================================================

    /// Handles pasted text from bracketed paste mode.
    ///
    /// The text goes to whatever editor has focus: a form field, the chat
    /// composer, the comment box or the task picker query. Single-line
    /// fields get line breaks replaced by spaces. Paste into a file field is
    /// taken as the path to read.
    pub fn handle_paste(&mut self, text: &str) {
        let text = normalize_paste(text);
        if text.is_empty() {
            return;
        }

        match self.mode {
            AppMode::Settings => {}
            AppMode::TaskPicker => {
                let single = text.replace('\n', " ");
                self.picker.push_str(&self.catalog, &single);
            }
            AppMode::Comment => {
                if let Some(comment) = self.comment.as_mut() {
                    comment.editor.insert_str(&text);
                    let draft = editor_text(&comment.editor);
                    self.conversation.update_comment(comment.message_id, &draft);
                }
            }
            AppMode::Main => match self.conversation.phase() {
                Phase::Setup => self.paste_into_form(&text),
                Phase::Starting => {}
                Phase::Chatting => {
                    if self.chat_ui.focus == ChatFocus::Messages {
                        self.focus_composer();
                    }
                    self.chat_ui.composer.insert_str(&text);
                }
            },
        }
    }

    fn paste_into_form(&mut self, text: &str) {
        let Some(field) = self.focused_field() else {
            return;
        };
        match field.kind {
            FieldKind::Multiline => {
                self.form_ui.editor.insert_str(text);
                self.sync_editor_to_form();
            }
            FieldKind::Text | FieldKind::Number => {
                self.form_ui.editor.insert_str(text.replace('\n', " "));
                self.sync_editor_to_form();
            }
            FieldKind::File => {
                let path = text.lines().next().unwrap_or_default().to_string();
                self.start_file_read(field, &path);
            }
            FieldKind::Choice => {}
        }
    }
}
