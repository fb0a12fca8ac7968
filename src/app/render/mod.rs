//! Rendering methods for the App.
//!
//! This module contains all UI rendering logic including:
//! - **Setup screen**: task bar, form fields and banners
//! - **Chat screen**: transcript, status line and composer
//! - **Overlays**: task picker, settings panel and feedback comment box

mod chat;
mod comment;
mod settings;
mod setup;

use ratatui::{
    Frame,
    style::Style,
    text::{Line, Span},
};

use super::{App, AppMode, StatusKind, StatusMessage};
use crate::tui::widgets::TaskPicker;

impl App {
    /// Renders the application UI.
    ///
    /// The base screen follows the conversation phase; the overlay selected
    /// by the mode is drawn on top of it.
    pub fn render(&self, frame: &mut Frame) {
        if self.on_setup_screen() {
            self.render_setup(frame);
        } else {
            self.render_chat(frame);
        }

        match self.mode {
            AppMode::Main => {}
            AppMode::TaskPicker => {
                let picker = TaskPicker::new(&self.picker, &self.theme);
                let area = picker.area(frame.area());
                frame.render_widget(picker, area);
            }
            AppMode::Settings => self.render_settings(frame),
            AppMode::Comment => self.render_comment(frame),
        }
    }

    /// Builds a footer line from `(key, label)` pairs.
    fn key_hints(&self, hints: &[(&'static str, &'static str)]) -> Line<'static> {
        let mut spans = Vec::with_capacity(hints.len() * 2);
        for (i, (key, label)) in hints.iter().enumerate() {
            let lead = if i == 0 { " [" } else { "[" };
            spans.push(Span::styled(
                format!("{lead}{key}] "),
                self.theme.highlight_style(),
            ));
            spans.push(Span::styled(format!("{label}  "), self.theme.muted_style()));
        }
        Line::from(spans)
    }

    /// Header line: app name and the active model.
    fn header_line(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled(" TaskPilot ", self.theme.header_style()),
            Span::styled("[", self.theme.muted_style()),
            Span::styled(self.settings.model.clone(), self.theme.normal_style()),
            Span::styled("]", self.theme.muted_style()),
        ])
    }

    /// Style for a status line message.
    fn status_style(&self, status: &StatusMessage) -> Style {
        match status.kind {
            StatusKind::Info => self.theme.normal_style(),
            StatusKind::Success => self.theme.success_style(),
            StatusKind::Error => self.theme.error_style(),
        }
    }
}
