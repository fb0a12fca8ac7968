//! Main application state and logic.
//!
//! This module contains the core App struct and its implementation,
//! organized into submodules:
//! - `events` - Key routing, overlays and background results
//! - `input` - Setup form and chat editing
//! - `layout` - Screen layouts
//! - `render` - UI rendering
//! - `state` - Application state structures
//!
//! ## Screens
//!
//! The screen underneath any overlay follows the conversation phase:
//!
//! - **Setup**: pick a task (Ctrl+T), fill its form, submit with Ctrl+D.
//!   While the first reply is generated the form stays visible and locked.
//! - **Chat**: the transcript with a composer. Tab moves focus into the
//!   transcript for copying, feedback and follow-up suggestions. Ctrl+R
//!   returns to setup.
//!
//! ## Overlays
//!
//! [`AppMode`] selects the overlay receiving keys: the task picker, the
//! settings panel (Ctrl+S, model presets) or the feedback comment box.

mod events;
mod input;
pub mod layout;
mod render;
pub mod state;

#[cfg(test)]
mod tests;

pub use layout::{ChatLayout, SetupLayout, calculate_chat_layout, calculate_setup_layout};
pub use state::{
    AppEvent, AppMode, ChatFocus, ChatUiState, CommentState, FormUiState, LayoutState,
    ScrollState, SettingsState, StatusKind, StatusMessage,
};

use std::future::Future;
use std::sync::Arc;

use ratatui::layout::Rect;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::catalog::{Catalog, FieldDefinition, FieldKind};
use crate::core::{
    AiGateway, Conversation, EventKind, FormTelemetry, GeminiGateway, NoopTelemetry, PendingTurn,
    Phase, SetupForm, TelemetryEvent, TelemetrySink, round_trip,
};
use crate::fs::{AppPaths, Settings};
use crate::tui::widgets::{TaskPickerState, Transcript};
use crate::tui::{Clipboard, SystemClipboard, Theme};

use self::state::{editor_text, new_editor};

/// Channel buffer size for background results.
const EVENT_CHANNEL_SIZE: usize = 1000;

/// External collaborators of the app.
pub struct Services {
    /// Model gateway.
    pub gateway: Arc<dyn AiGateway>,
    /// Usage telemetry.
    pub telemetry: Arc<dyn TelemetrySink>,
    /// Clipboard for copy actions.
    pub clipboard: Box<dyn Clipboard>,
}

impl Services {
    /// Builds the production services: Gemini, form telemetry when
    /// configured, and the system clipboard.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let telemetry: Arc<dyn TelemetrySink> = match settings.telemetry() {
            Some(config) => Arc::new(FormTelemetry::new(config.clone())),
            None => Arc::new(NoopTelemetry),
        };
        Self {
            gateway: Arc::new(GeminiGateway::from_settings(settings)),
            telemetry,
            clipboard: Box::new(SystemClipboard::default()),
        }
    }
}

/// Main application state.
///
/// Organized into component sub-structs:
/// - `form_ui`: focus and editor of the setup form
/// - `chat_ui`: composer, selection and scrolling of the chat
/// - `picker`, `settings_ui`, `comment`: overlay states
/// - `layout`: layout of the last frame
pub struct App {
    // =========================================================================
    // Shared State
    // =========================================================================
    /// Task catalog.
    pub(crate) catalog: Arc<Catalog>,
    /// Gateway, telemetry and clipboard.
    pub(crate) services: Services,
    /// Effective settings (file plus environment and flags).
    pub(crate) settings: Settings,
    /// Config and data paths.
    pub(crate) paths: AppPaths,
    /// Selected task and entered values.
    pub(crate) form: SetupForm,
    /// Messages and phase of the current conversation.
    pub(crate) conversation: Conversation,
    /// Theme for styling.
    pub(crate) theme: Theme,
    /// Overlay receiving keys.
    pub(crate) mode: AppMode,
    /// Should quit flag.
    should_quit: bool,

    // =========================================================================
    // Event Channel
    // =========================================================================
    /// Receiver for background results.
    event_rx: mpsc::Receiver<AppEvent>,
    /// Sender handed to spawned tasks.
    event_tx: mpsc::Sender<AppEvent>,

    // =========================================================================
    // Component States
    // =========================================================================
    /// Setup form UI state.
    pub(crate) form_ui: FormUiState,
    /// Chat UI state.
    pub(crate) chat_ui: ChatUiState,
    /// Task picker overlay state.
    pub(crate) picker: TaskPickerState,
    /// Settings overlay state.
    pub(crate) settings_ui: SettingsState,
    /// Open comment box, if any.
    pub(crate) comment: Option<CommentState>,
    /// Status line message.
    pub(crate) status: Option<StatusMessage>,
    /// Layout of the last frame.
    pub(crate) layout: LayoutState,
}

impl App {
    /// Creates the application with production services.
    #[must_use]
    pub fn new(settings: Settings, paths: AppPaths) -> Self {
        let services = Services::from_settings(&settings);
        Self::with_services(settings, paths, Arc::new(Catalog::builtin()), services)
    }

    /// Creates the application with explicit collaborators.
    #[must_use]
    pub fn with_services(
        settings: Settings,
        paths: AppPaths,
        catalog: Arc<Catalog>,
        services: Services,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
        let form = SetupForm::new(Arc::clone(&catalog));
        let conversation = Conversation::new(Arc::clone(&catalog));

        let mut app = Self {
            catalog,
            services,
            settings,
            paths,
            form,
            conversation,
            theme: Theme::default(),
            mode: AppMode::Main,
            should_quit: false,
            event_rx,
            event_tx,
            form_ui: FormUiState::default(),
            chat_ui: ChatUiState::default(),
            picker: TaskPickerState::default(),
            settings_ui: SettingsState::default(),
            comment: None,
            status: None,
            layout: LayoutState::default(),
        };
        app.reset_form_ui();
        info!(model = %app.settings.model, tasks = app.catalog.len(), "app initialized");
        app
    }

    /// Returns true if the application should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Current overlay mode.
    #[must_use]
    pub const fn mode(&self) -> AppMode {
        self.mode
    }

    /// Current conversation phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.conversation.phase()
    }

    /// Model id used for the next call.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Returns true while the setup form is the base screen.
    #[must_use]
    pub fn on_setup_screen(&self) -> bool {
        self.conversation.phase() != Phase::Chatting
    }

    /// Calculates and caches the layouts for `terminal_area`.
    ///
    /// Should be called once per frame before rendering.
    pub fn update_layout(&mut self, terminal_area: Rect) {
        self.layout.setup = calculate_setup_layout(terminal_area);
        self.layout.chat = calculate_chat_layout(terminal_area);
        self.sync_chat_scroll();
    }

    // =========================================================================
    // Setup Form Helpers
    // =========================================================================

    /// Fields currently shown for the selected task.
    pub(crate) fn visible_fields(&self) -> Vec<&'static FieldDefinition> {
        self.form.visible_fields()
    }

    /// The focused field, falling back to the first visible one.
    pub(crate) fn focused_field(&self) -> Option<&'static FieldDefinition> {
        let fields = self.visible_fields();
        self.form_ui
            .focus
            .and_then(|id| fields.iter().copied().find(|f| f.id == id))
            .or_else(|| fields.first().copied())
    }

    /// Index of the focused field among the visible ones.
    pub(crate) fn focused_index(&self) -> usize {
        let fields = self.visible_fields();
        self.focused_field()
            .and_then(|focused| fields.iter().position(|f| f.id == focused.id))
            .unwrap_or(0)
    }

    /// Moves focus to `field` and loads its editor.
    pub(crate) fn focus_field(&mut self, field: &'static FieldDefinition) {
        self.form_ui.focus = Some(field.id);
        let text = match field.kind {
            FieldKind::Text | FieldKind::Multiline | FieldKind::Number => {
                self.form.values().text(field.id).to_string()
            }
            FieldKind::Choice | FieldKind::File => String::new(),
        };
        let placeholder = match field.kind {
            FieldKind::File => match self.form.values().file_name(field.id) {
                Some(name) => format!("📎 {name}"),
                None => format!("ファイルパス（{}）", field.accepted_extensions()),
            },
            _ => field.placeholder.unwrap_or_default().to_string(),
        };
        self.form_ui.editor = new_editor(&text, &placeholder);
    }

    /// Moves focus to the next visible field, wrapping around.
    pub(crate) fn focus_next(&mut self) {
        let fields = self.visible_fields();
        if fields.is_empty() {
            return;
        }
        let next = (self.focused_index() + 1) % fields.len();
        self.focus_field(fields[next]);
    }

    /// Moves focus to the previous visible field, wrapping around.
    pub(crate) fn focus_prev(&mut self) {
        let fields = self.visible_fields();
        if fields.is_empty() {
            return;
        }
        let prev = (self.focused_index() + fields.len() - 1) % fields.len();
        self.focus_field(fields[prev]);
    }

    /// Resets focus, editors and banners after the task changed.
    pub(crate) fn reset_form_ui(&mut self) {
        self.form_ui = FormUiState::default();
        if let Some(first) = self.visible_fields().first().copied() {
            self.focus_field(first);
        }
    }

    /// Stores the focused editor's text into the form.
    pub(crate) fn sync_editor_to_form(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if matches!(
            field.kind,
            FieldKind::Text | FieldKind::Multiline | FieldKind::Number
        ) {
            let text = editor_text(&self.form_ui.editor);
            self.form.set_field_value(field.id, &text);
        }
    }

    /// Selects `key` as the task, clearing the form.
    pub(crate) fn select_task(&mut self, key: &str) {
        if self.form.task().is_some_and(|t| t.key == key) {
            return;
        }
        match self.form.select_task(key) {
            Ok(()) => {
                self.conversation.dismiss_error();
                self.reset_form_ui();
            }
            Err(e) => self.status = Some(StatusMessage::error(e.to_string())),
        }
    }

    // =========================================================================
    // Conversation
    // =========================================================================

    /// Validates the form and starts a conversation.
    pub(crate) fn submit_form(&mut self) {
        if self.conversation.phase() != Phase::Setup {
            return;
        }
        self.sync_editor_to_form();

        let submission = match self.form.submit() {
            Ok(submission) => submission,
            Err(e) => {
                debug!(error = ?e, "form rejected");
                self.form_ui.banner = Some(e.to_string());
                return;
            }
        };
        self.form_ui.banner = None;

        match self
            .conversation
            .start(submission.task.key, &submission.values)
        {
            Ok(turn) => {
                self.chat_ui = ChatUiState::default();
                self.status = None;
                self.log_event(EventKind::TaskStarted, None);
                self.dispatch_turn(turn);
            }
            Err(e) => self.form_ui.banner = Some(e.to_string()),
        }
    }

    /// Runs `turn` in the background and reports back as
    /// [`AppEvent::TurnCompleted`].
    pub(crate) fn dispatch_turn(&self, turn: PendingTurn) {
        let gateway = Arc::clone(&self.services.gateway);
        let model = self.settings.model.clone();
        let tx = self.event_tx.clone();
        Self::spawn(async move {
            let outcome = round_trip(gateway.as_ref(), &model, turn).await;
            if tx.send(AppEvent::TurnCompleted(outcome)).await.is_err() {
                debug!("app closed before turn completed");
            }
        });
    }

    /// Returns to the setup screen, keeping the entered values.
    pub(crate) fn reset_conversation(&mut self) {
        self.conversation.reset();
        self.chat_ui = ChatUiState::default();
        self.comment = None;
        self.mode = AppMode::Main;
        self.status = None;
        info!("conversation reset");
    }

    /// Emits a telemetry event for the running task and model.
    pub(crate) fn log_event(&self, kind: EventKind, feedback: Option<String>) {
        let task_name = self
            .conversation
            .task()
            .or_else(|| self.form.task())
            .map_or("", |t| t.display_name);
        self.services.telemetry.log_event(TelemetryEvent {
            task_name: task_name.to_string(),
            kind,
            feedback,
            model: self.settings.model.clone(),
        });
    }

    /// Lays out the transcript for the current chat width.
    pub(crate) fn transcript(&self) -> Transcript {
        let selected = match self.chat_ui.focus {
            ChatFocus::Messages => self.chat_ui.selected,
            ChatFocus::Composer => None,
        };
        Transcript::build(
            self.conversation.messages(),
            self.layout.chat.transcript_content_width,
            selected,
            self.conversation.is_busy(),
            &self.theme,
        )
    }

    /// Follows the bottom of the transcript when auto-scroll is on.
    pub(crate) fn sync_chat_scroll(&mut self) {
        let len = self.transcript().len();
        self.chat_ui
            .scroll
            .auto_scroll_if_enabled(len, self.layout.chat.transcript_visible_height);
    }

    // =========================================================================
    // Background Work
    // =========================================================================

    /// Spawns `task` on the current tokio runtime.
    fn spawn<F>(task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(task);
            }
            Err(e) => error!(error = %e, "no async runtime; background task dropped"),
        }
    }

    /// Returns the event sender for background tasks.
    #[must_use]
    pub fn event_sender(&self) -> mpsc::Sender<AppEvent> {
        self.event_tx.clone()
    }

    /// Gets the paths configuration for this app instance.
    #[must_use]
    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }
}
