//! Settings panel rendering.
//!
//! This module contains the rendering logic for the settings modal overlay.

use ratatui::{
    Frame,
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::App;
use crate::app::layout::centered;
use crate::core::Model;
use crate::tui::widgets::pad_to_width;

/// Width of the settings popup.
const POPUP_WIDTH: u16 = 60;
/// Display width of the info labels.
const LABEL_WIDTH: usize = 14;

impl App {
    /// Renders the settings panel as a centered overlay.
    pub(crate) fn render_settings(&self, frame: &mut Frame) {
        let mut content_lines = Vec::new();

        // Header
        content_lines.push(Line::from(Span::styled(
            "TaskPilot 設定",
            self.theme.header_style(),
        )));
        content_lines.push(Line::from(Span::styled(
            "使用する Gemini モデルを選択します。",
            self.theme.muted_style(),
        )));
        content_lines.push(Line::from(""));

        // Model presets
        for (i, model) in Model::all().iter().enumerate() {
            let is_selected = i == self.settings_ui.selected_index;
            let is_current = self.settings.model == model.id();
            let prefix = if is_selected { "› " } else { "  " };
            let marker = if is_current { "● " } else { "○ " };

            let line = if is_selected {
                Line::from(vec![
                    Span::styled(prefix, self.theme.highlight_style()),
                    Span::styled(marker, self.theme.highlight_style()),
                    Span::styled(format!("{:<20}", model.name()), self.theme.highlight_style()),
                    Span::styled(model.description(), self.theme.highlight_style()),
                ])
            } else {
                Line::from(vec![
                    Span::raw(prefix),
                    Span::styled(marker, self.theme.muted_style()),
                    Span::styled(format!("{:<20}", model.name()), self.theme.normal_style()),
                    Span::styled(model.description(), self.theme.muted_style()),
                ])
            };
            content_lines.push(line);
        }

        // A model id from the settings file or --model that is not a preset
        if Model::from_id(&self.settings.model).is_none() {
            content_lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("● ", self.theme.muted_style()),
                Span::styled(
                    format!("{} (カスタム)", self.settings.model),
                    self.theme.normal_style(),
                ),
            ]));
        }

        content_lines.push(Line::from(""));

        let (key_text, key_style) = if self.settings.api_key().is_some() {
            ("設定済み", self.theme.success_style())
        } else {
            ("未設定 (GEMINI_API_KEY)", self.theme.error_style())
        };
        content_lines.push(Line::from(vec![
            Span::styled(pad_to_width("API キー", LABEL_WIDTH), self.theme.normal_style()),
            Span::styled(key_text, key_style),
        ]));
        let telemetry = if self.settings.telemetry().is_some() {
            "有効"
        } else {
            "無効"
        };
        content_lines.push(Line::from(vec![
            Span::styled(pad_to_width("利用ログ", LABEL_WIDTH), self.theme.normal_style()),
            Span::styled(telemetry, self.theme.muted_style()),
        ]));
        content_lines.push(Line::from(vec![
            Span::styled(pad_to_width("設定ファイル", LABEL_WIDTH), self.theme.normal_style()),
            Span::styled(
                self.paths.settings_file().display().to_string(),
                self.theme.muted_style(),
            ),
        ]));

        // Spacing before footer
        content_lines.push(Line::from(""));

        // Footer hints
        content_lines.push(Line::from(vec![
            Span::styled("[↑/↓] ", self.theme.highlight_style()),
            Span::styled("移動  ", self.theme.muted_style()),
            Span::styled("[Enter] ", self.theme.highlight_style()),
            Span::styled("変更  ", self.theme.muted_style()),
            Span::styled("[Esc] ", self.theme.highlight_style()),
            Span::styled("閉じる", self.theme.muted_style()),
        ]));

        #[allow(clippy::cast_possible_truncation)] // A dozen lines plus borders.
        let popup_height = content_lines.len() as u16 + 2;
        let popup_area = centered(frame.area(), POPUP_WIDTH, popup_height);

        // Clear background
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" 設定 ")
            .title_style(self.theme.header_style())
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        let paragraph = Paragraph::new(content_lines)
            .block(block)
            .alignment(Alignment::Left);

        frame.render_widget(paragraph, popup_area);
    }
}
