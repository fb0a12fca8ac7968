//! One setup form field: a label line above a bordered input box.
//!
//! Editable fields get a text editor drawn over [`FieldView::input_area`] by
//! the app while focused; this widget draws the stored value otherwise.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::wrap_to_width;
use crate::catalog::{FieldDefinition, FieldKind, FieldValue};
use crate::tui::Theme;

/// Rows of a multi-line input box, borders included.
const MULTILINE_BOX_HEIGHT: u16 = 6;
/// Rows of a single-line input box, borders included.
const LINE_BOX_HEIGHT: u16 = 3;

/// Progress of a file read started from a file field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// Reading the given path.
    Loading(String),
    /// The last read failed.
    Error(String),
}

/// Widget rendering a single form field.
pub struct FieldView<'a> {
    field: &'static FieldDefinition,
    value: Option<&'a FieldValue>,
    status: Option<&'a FileStatus>,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FieldView<'a> {
    /// Creates a field view.
    #[must_use]
    pub const fn new(
        field: &'static FieldDefinition,
        value: Option<&'a FieldValue>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            field,
            value,
            status: None,
            focused: false,
            theme,
        }
    }

    /// Marks the field as focused.
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Attaches the status of a file read.
    #[must_use]
    pub const fn status(mut self, status: Option<&'a FileStatus>) -> Self {
        self.status = status;
        self
    }

    /// Total rows needed for a field of `kind`.
    #[must_use]
    pub const fn height(kind: FieldKind) -> u16 {
        1 + match kind {
            FieldKind::Multiline => MULTILINE_BOX_HEIGHT,
            _ => LINE_BOX_HEIGHT,
        }
    }

    /// Area inside the input box borders, where an editor is overlaid.
    #[must_use]
    pub fn input_area(area: Rect) -> Rect {
        let body = Rect {
            y: area.y.saturating_add(1),
            height: area.height.saturating_sub(1),
            ..area
        };
        Block::default().borders(Borders::ALL).inner(body)
    }

    fn label_line(&self) -> Line<'static> {
        let label_style = if self.focused {
            self.theme.highlight_style()
        } else {
            self.theme.normal_style()
        };
        let mut spans = vec![Span::styled(self.field.label, label_style)];
        if let Some(marker) = self.field.requirement_marker() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(marker, self.theme.error_style()));
        }
        if self.focused
            && let Some(hint) = self.key_hint()
        {
            spans.push(Span::styled(format!("  {hint}"), self.theme.muted_style()));
        }
        Line::from(spans)
    }

    const fn key_hint(&self) -> Option<&'static str> {
        match self.field.kind {
            FieldKind::Choice => Some("←/→ 選択  Backspace 解除"),
            FieldKind::File => Some("パスを入力して Enter で読み込み"),
            FieldKind::Multiline => Some("Enter 改行  Tab 次の項目"),
            FieldKind::Text | FieldKind::Number => None,
        }
    }

    fn body_lines(&self, width: usize) -> Vec<Line<'static>> {
        let placeholder =
            |text: &str| Line::from(Span::styled(text.to_string(), self.theme.placeholder_style()));

        match self.field.kind {
            FieldKind::Choice => match self.value {
                Some(value) => vec![Line::from(vec![
                    Span::styled("‹ ", self.theme.muted_style()),
                    Span::styled(value.as_text().to_string(), self.theme.normal_style()),
                    Span::styled(" ›", self.theme.muted_style()),
                ])],
                None => vec![placeholder("‹ 選択してください ›")],
            },
            FieldKind::File => {
                if let Some(FieldValue::File { name, .. }) = self.value {
                    return vec![Line::from(Span::styled(
                        format!("📎 {name}"),
                        self.theme.success_style(),
                    ))];
                }
                match self.status {
                    Some(FileStatus::Loading(path)) => vec![Line::from(Span::styled(
                        format!("読み込み中: {path}"),
                        self.theme.warning_style(),
                    ))],
                    Some(FileStatus::Error(message)) => vec![Line::from(Span::styled(
                        message.clone(),
                        self.theme.error_style(),
                    ))],
                    None => vec![placeholder(&format!(
                        "ファイルパス（{}）",
                        self.field.accepted_extensions()
                    ))],
                }
            }
            FieldKind::Text | FieldKind::Multiline | FieldKind::Number => match self.value {
                Some(value) if !value.as_text().is_empty() => value
                    .as_text()
                    .lines()
                    .flat_map(|line| wrap_to_width(line, width))
                    .map(|row| Line::from(Span::styled(row, self.theme.normal_style())))
                    .collect(),
                _ => vec![placeholder(self.field.placeholder.unwrap_or_default())],
            },
        }
    }
}

impl Widget for FieldView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        Paragraph::new(self.label_line()).render(Rect { height: 1, ..area }, buf);

        let body = Rect {
            y: area.y + 1,
            height: area.height.saturating_sub(1),
            ..area
        };
        let border_style = if self.focused {
            self.theme.focused_border_style()
        } else {
            self.theme.border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(body);
        block.render(body, buf);

        let lines = self.body_lines(inner.width as usize);
        Paragraph::new(lines).render(inner, buf);
    }
}
