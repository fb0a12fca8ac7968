//! Event handling logic for the App.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

use super::App;
use super::state::{AppEvent, AppMode, CommentState, SettingsState, StatusMessage, editor_text};
use crate::core::{FileTicket, Model, Phase};
use crate::fs::Attachment;
use crate::tui::widgets::{FileStatus, TaskPickerState};

impl App {
    /// Drains finished background work.
    ///
    /// Called on every tick of the UI loop.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                AppEvent::FileLoaded { ticket, result } => self.on_file_loaded(ticket, result),
                AppEvent::TurnCompleted(outcome) => {
                    let was_starting = self.conversation.phase() == Phase::Starting;
                    if !self.conversation.apply(outcome) {
                        continue;
                    }
                    if was_starting && self.conversation.phase() == Phase::Chatting {
                        self.chat_ui.scroll.scroll_to_bottom(0, 0);
                    }
                    self.sync_chat_scroll();
                }
            }
        }
    }

    fn on_file_loaded(&mut self, ticket: FileTicket, result: Result<Attachment, String>) {
        if !self.form.ticket_is_current(ticket) {
            debug!(field = ticket.field_id, "dropping stale file result");
            return;
        }
        match result {
            Ok(attachment) => {
                if self
                    .form
                    .complete_file_read(ticket, &attachment.name, &attachment.content)
                {
                    self.form_ui.file_status.remove(ticket.field_id);
                    if self.form_ui.focus == Some(ticket.field_id)
                        && let Some(field) = self.focused_field()
                    {
                        self.focus_field(field);
                    }
                }
            }
            Err(message) => {
                warn!(field = ticket.field_id, error = %message, "file read failed");
                self.form_ui
                    .file_status
                    .insert(ticket.field_id, FileStatus::Error(message));
            }
        }
    }

    /// Handles a key event.
    ///
    /// Overlays take every key while open. Otherwise keys go to the setup
    /// form or the chat, depending on the conversation phase.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match self.mode {
            AppMode::TaskPicker => return self.handle_picker_key(key),
            AppMode::Settings => return self.handle_settings_key(key),
            AppMode::Comment => return self.handle_comment_key(key),
            AppMode::Main => {}
        }

        // Global hotkeys on the base screens
        if ctrl {
            match key.code {
                KeyCode::Char('c') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('s') => {
                    self.open_settings();
                    return;
                }
                KeyCode::Char('r') => {
                    if self.conversation.phase() != Phase::Setup {
                        self.reset_conversation();
                    }
                    return;
                }
                _ => {}
            }
        }

        self.status = None;
        match self.conversation.phase() {
            Phase::Setup => self.handle_setup_key(key),
            Phase::Starting => {
                if key.code == KeyCode::Esc {
                    self.reset_conversation();
                    self.status = Some(StatusMessage::info("生成をキャンセルしました"));
                }
            }
            Phase::Chatting => self.handle_chat_key(key),
        }
    }

    // =========================================================================
    // Task Picker
    // =========================================================================

    /// Opens the task picker with the current task highlighted.
    pub(crate) fn open_task_picker(&mut self) {
        let current = self.form.task().map(|t| t.key);
        self.picker = TaskPickerState::open(&self.catalog, current);
        self.mode = AppMode::TaskPicker;
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.mode = AppMode::Main,
            KeyCode::Char('c') if ctrl => self.mode = AppMode::Main,
            KeyCode::Up => self.picker.select_up(),
            KeyCode::Char('p') if ctrl => self.picker.select_up(),
            KeyCode::Down => self.picker.select_down(),
            KeyCode::Char('n') if ctrl => self.picker.select_down(),
            KeyCode::Enter => {
                if let Some(task) = self.picker.selected_task() {
                    self.select_task(task.key);
                    self.mode = AppMode::Main;
                }
            }
            KeyCode::Backspace => self.picker.pop_char(&self.catalog),
            KeyCode::Char(c) if !ctrl => {
                self.picker.push_str(&self.catalog, c.encode_utf8(&mut [0; 4]));
            }
            _ => {}
        }
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Opens the settings panel.
    pub(crate) fn open_settings(&mut self) {
        self.settings_ui = SettingsState::open(&self.settings.model);
        self.mode = AppMode::Settings;
    }

    fn handle_settings_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.settings_ui.select_up(),
            KeyCode::Down | KeyCode::Char('j') => self.settings_ui.select_down(),
            KeyCode::Char('p') if ctrl => self.settings_ui.select_up(),
            KeyCode::Char('n') if ctrl => self.settings_ui.select_down(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let model = self.settings_ui.selected_model();
                self.apply_model(model);
                self.mode = AppMode::Main;
            }
            KeyCode::Char('c') if ctrl => self.mode = AppMode::Main,
            KeyCode::Char('q') | KeyCode::Esc => self.mode = AppMode::Main,
            _ => {}
        }
    }

    /// Switches to `model` and persists it.
    ///
    /// Only the model is written back; the file's other values (notably the
    /// API key, which may come from the environment) stay as they are.
    pub(crate) fn apply_model(&mut self, model: Model) {
        if self.settings.model == model.id() {
            return;
        }
        self.settings.model = model.id().to_string();

        let saved = self.paths.load_settings().and_then(|mut persisted| {
            persisted.model = model.id().to_string();
            self.paths.save_settings(&persisted)
        });
        self.status = Some(match saved {
            Ok(()) => StatusMessage::success(format!("モデルを {} に変更しました", model.name())),
            Err(e) => {
                warn!(error = %e, "failed to save settings");
                StatusMessage::error(format!(
                    "モデルを {} に変更しました（設定の保存に失敗: {e}）",
                    model.name()
                ))
            }
        });
    }

    // =========================================================================
    // Feedback Comment
    // =========================================================================

    /// Opens the comment box for unhelpful feedback on `message_id`.
    pub(crate) fn open_comment(&mut self, message_id: usize) {
        match self.conversation.open_negative(message_id) {
            Ok(()) => {
                self.comment = Some(CommentState::new(message_id));
                self.mode = AppMode::Comment;
            }
            Err(e) => self.status = Some(StatusMessage::error(e.to_string())),
        }
    }

    fn handle_comment_key(&mut self, key: KeyEvent) {
        let Some(comment) = self.comment.as_mut() else {
            self.mode = AppMode::Main;
            return;
        };
        let message_id = comment.message_id;
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let newline = key.modifiers.contains(KeyModifiers::SHIFT)
            || key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Esc => {
                self.conversation.cancel_feedback(message_id);
                self.close_comment();
            }
            KeyCode::Char('c') if ctrl => {
                self.conversation.cancel_feedback(message_id);
                self.close_comment();
            }
            KeyCode::Enter if newline => comment.editor.insert_newline(),
            KeyCode::Char('j') if ctrl => comment.editor.insert_newline(),
            KeyCode::Enter => self.submit_comment(),
            _ => {
                comment.editor.input(key);
                let text = editor_text(&comment.editor);
                self.conversation.update_comment(message_id, &text);
            }
        }
    }

    fn submit_comment(&mut self) {
        let Some(comment) = self.comment.take() else {
            return;
        };
        let text = editor_text(&comment.editor);
        match self.conversation.submit_negative(comment.message_id, &text) {
            Ok(event) => {
                self.log_event(event.kind, event.comment);
                self.status = Some(StatusMessage::success("フィードバックを送信しました"));
            }
            Err(e) => self.status = Some(StatusMessage::error(e.to_string())),
        }
        self.mode = AppMode::Main;
    }

    fn close_comment(&mut self) {
        self.comment = None;
        self.mode = AppMode::Main;
    }

    /// Sends helpful feedback for `message_id`.
    pub(crate) fn give_positive_feedback(&mut self, message_id: usize) {
        match self.conversation.give_positive(message_id) {
            Ok(event) => {
                self.log_event(event.kind, event.comment);
                self.status = Some(StatusMessage::success("フィードバックを送信しました"));
            }
            Err(e) => self.status = Some(StatusMessage::error(e.to_string())),
        }
    }
}
