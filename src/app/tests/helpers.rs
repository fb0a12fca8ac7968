//! Shared test utilities for the app module.
//!
//! This module provides helper functions and utilities for testing:
//! - `Harness` - an `App` wired to a scripted gateway, recording telemetry
//!   and an in-memory clipboard, with paths in a temporary directory
//! - Key event helpers (`char_key`, `enter_key`, `ctrl_key`, `key`)
//! - `wait_until` - drives background tasks until a condition holds
//! - `render_rows` - renders the app to a `TestBackend` and returns its text

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::{Terminal, backend::TestBackend};
use tempfile::TempDir;
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Services};
use crate::catalog::Catalog;
use crate::core::testing::{RecordingTelemetry, ScriptedGateway};
use crate::core::{AiGateway, Phase};
use crate::fs::{AppPaths, Settings};
use crate::tui::MemoryClipboard;

/// Terminal size used by tests unless they need something else.
pub const WIDTH: u16 = 100;
pub const HEIGHT: u16 = 32;

/// An app with observable collaborators.
pub struct Harness {
    pub app: App,
    pub gateway: Arc<ScriptedGateway>,
    pub telemetry: RecordingTelemetry,
    pub clipboard: MemoryClipboard,
    /// Holds the config directory for the lifetime of the test.
    pub dir: TempDir,
}

impl Harness {
    /// Creates a harness with default settings.
    pub fn new() -> Result<Self> {
        Self::with_settings(Settings::default())
    }

    /// Creates a harness with `settings` as the effective settings.
    pub fn with_settings(settings: Settings) -> Result<Self> {
        let dir = TempDir::new()?;
        let gateway = Arc::new(ScriptedGateway::new());
        let telemetry = RecordingTelemetry::new();
        let clipboard = MemoryClipboard::new();

        let services = Services {
            gateway: Arc::clone(&gateway) as Arc<dyn AiGateway>,
            telemetry: Arc::new(telemetry.clone()),
            clipboard: Box::new(clipboard.clone()),
        };
        let mut app = App::with_services(
            settings,
            AppPaths::new(dir.path()),
            Arc::new(Catalog::builtin()),
            services,
        );
        app.update_layout(Rect::new(0, 0, WIDTH, HEIGHT));

        Ok(Self {
            app,
            gateway,
            telemetry,
            clipboard,
            dir,
        })
    }

    /// Sends every character of `text` as a key press.
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.app.handle_key(char_key(c));
        }
    }

    /// Fills the proofreading form with the minimum required input.
    pub fn fill_proofread(&mut self) {
        self.app.handle_paste("お世話になっております。");
        self.app.handle_key(key(KeyCode::Tab, KeyModifiers::NONE));
        self.app.handle_key(key(KeyCode::Right, KeyModifiers::NONE));
    }

    /// Submits the proofreading form and waits for the first reply.
    pub async fn start_chat(&mut self, reply: &str) {
        self.gateway.push_reply(reply);
        self.fill_proofread();
        self.app.handle_key(ctrl_key('d'));
        assert_eq!(self.app.phase(), Phase::Starting);
        assert!(wait_until(&mut self.app, |app| app.phase() == Phase::Chatting).await);
    }
}

/// Creates a [`KeyEvent`] for a character key with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c), KeyModifiers::NONE)
}

/// Creates a [`KeyEvent`] for the Enter key with specified modifiers.
pub fn enter_key(modifiers: KeyModifiers) -> KeyEvent {
    key(KeyCode::Enter, modifiers)
}

/// Creates a [`KeyEvent`] for Ctrl plus a character.
pub fn ctrl_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Creates a key press event.
pub fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Lets background tasks run and drains their results until `done` holds.
///
/// Returns false if it never did.
pub async fn wait_until(app: &mut App, done: impl Fn(&App) -> bool) -> bool {
    for _ in 0..400 {
        app.process_events();
        if done(app) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    false
}

/// Renders the app like the main loop does and returns each row as text.
///
/// Wide characters occupy two cells; the trailing cell is skipped so rows
/// read naturally.
pub fn render_rows(app: &mut App, width: u16, height: u16) -> Result<Vec<String>> {
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    terminal.draw(|frame| {
        app.update_layout(frame.area());
        app.render(frame);
    })?;

    let buffer = terminal.backend().buffer();
    let mut rows = Vec::with_capacity(height as usize);
    for y in 0..height {
        let mut row = String::new();
        let mut x = 0;
        while x < width {
            let symbol = buffer[(x, y)].symbol();
            row.push_str(symbol);
            let cells = u16::try_from(symbol.width().max(1)).unwrap_or(1);
            x += cells;
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Returns true if any row contains `needle`.
pub fn screen_contains(rows: &[String], needle: &str) -> bool {
    rows.iter().any(|row| row.contains(needle))
}
