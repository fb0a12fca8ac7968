//! Chat transcript.
//!
//! [`Transcript`] lays the conversation out as pre-wrapped lines and records
//! where each message starts, so the app can scroll a selected message into
//! view. [`TranscriptWidget`] draws a window of those lines with a scrollbar.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget,
        Widget,
    },
};

use super::wrap_to_width;
use crate::core::{ChatMessage, Role, Segment, split_segments};
use crate::tui::Theme;

const INDENT: &str = "  ";
const CODE_GUTTER: &str = "  │ ";

/// Key hints shown under the selected model message while feedback is open.
const MODEL_HINTS: &str = "[c]コピー [y]コードをコピー [+]役に立った [-]改善が必要 [1-3]提案を送信";
/// Key hints shown under a selected message otherwise.
const COPY_HINTS: &str = "[c]コピー [y]コードをコピー";

/// The conversation laid out as terminal lines.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<Line<'static>>,
    starts: Vec<usize>,
}

impl Transcript {
    /// Lays out `messages` for a content area `width` cells wide.
    ///
    /// `selected` marks a message and adds its key hints; `busy` appends a
    /// progress line.
    #[must_use]
    pub fn build(
        messages: &[ChatMessage],
        width: usize,
        selected: Option<usize>,
        busy: bool,
        theme: &Theme,
    ) -> Self {
        let mut layout = Self::default();
        let text_width = width.saturating_sub(INDENT.len()).max(1);

        for message in messages {
            let is_selected = selected == Some(message.id);
            layout.starts.push(layout.lines.len());
            layout.push_author(message, is_selected, theme);

            layout.push_body(&message.text, width, theme);

            if message.role == Role::Model {
                layout.push_suggestions(&message.suggestions, text_width, theme);
                let label = message.feedback.label();
                if !label.is_empty() {
                    layout.push_wrapped(label, text_width, theme.success_style());
                }
            }

            if is_selected {
                let hints = if message.role == Role::Model && message.feedback.is_open() {
                    MODEL_HINTS
                } else {
                    COPY_HINTS
                };
                layout.push_wrapped(hints, text_width, theme.muted_style());
            }
            layout.lines.push(Line::default());
        }

        if busy {
            layout.push_wrapped("AI が回答を生成しています…", text_width, theme.highlight_style());
        }
        layout
    }

    /// All laid-out lines.
    #[must_use]
    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    /// Number of laid-out lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if nothing was laid out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line index of the author line of message `id`.
    #[must_use]
    pub fn message_start(&self, id: usize) -> Option<usize> {
        self.starts.get(id).copied()
    }

    fn push_author(&mut self, message: &ChatMessage, selected: bool, theme: &Theme) {
        let (author, style) = match message.role {
            Role::User => ("あなた", theme.user_style()),
            Role::Model => ("AI", theme.model_style()),
        };
        let marker = if selected {
            Span::styled("▌ ", theme.highlight_style())
        } else {
            Span::raw(INDENT)
        };
        self.lines.push(Line::from(vec![
            marker,
            Span::styled(author, style),
            Span::styled(
                format!(" {}", message.created_at.format("%H:%M")),
                theme.muted_style(),
            ),
        ]));
    }

    fn push_body(&mut self, text: &str, width: usize, theme: &Theme) {
        let text_width = width.saturating_sub(INDENT.len()).max(1);
        let code_width = width.saturating_sub(CODE_GUTTER.chars().count()).max(1);

        for segment in split_segments(text) {
            match segment {
                Segment::Paragraph(prose) => {
                    for line in prose.lines() {
                        self.push_wrapped(line, text_width, theme.normal_style());
                    }
                }
                Segment::Code { lang, code } => {
                    self.lines.push(Line::from(Span::styled(
                        format!("  ┌ {}", lang.as_deref().unwrap_or("code")),
                        theme.muted_style(),
                    )));
                    for line in code.lines() {
                        for row in wrap_to_width(line, code_width) {
                            self.lines.push(Line::from(vec![
                                Span::styled(CODE_GUTTER, theme.muted_style()),
                                Span::styled(row, theme.code_style()),
                            ]));
                        }
                    }
                    self.lines
                        .push(Line::from(Span::styled("  └", theme.muted_style())));
                }
            }
        }
    }

    fn push_suggestions(&mut self, suggestions: &[String], width: usize, theme: &Theme) {
        if suggestions.is_empty() {
            return;
        }
        self.lines
            .push(Line::from(Span::styled("  提案:", theme.muted_style())));
        for (i, suggestion) in suggestions.iter().enumerate() {
            self.push_wrapped(
                &format!("[{}] {suggestion}", i + 1),
                width,
                theme.highlight_style(),
            );
        }
    }

    fn push_wrapped(&mut self, text: &str, width: usize, style: Style) {
        for row in wrap_to_width(text, width) {
            self.lines
                .push(Line::from(vec![Span::raw(INDENT), Span::styled(row, style)]));
        }
    }
}

/// Scrollable view over a [`Transcript`].
pub struct TranscriptWidget<'a> {
    transcript: &'a Transcript,
    scroll_offset: usize,
    title: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> TranscriptWidget<'a> {
    /// Creates a transcript view starting at `scroll_offset`.
    #[must_use]
    pub const fn new(
        transcript: &'a Transcript,
        scroll_offset: usize,
        title: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            transcript,
            scroll_offset,
            title,
            focused: false,
            theme,
        }
    }

    /// Highlights the border while the transcript has focus.
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Width available for transcript lines inside `area`, leaving a column
    /// for the scrollbar.
    #[must_use]
    pub fn content_width(area: Rect) -> usize {
        Self::block().inner(area).width.saturating_sub(1) as usize
    }

    /// Rows available for transcript lines inside `area`.
    #[must_use]
    pub fn visible_height(area: Rect) -> usize {
        Self::block().inner(area).height as usize
    }

    fn block() -> Block<'static> {
        Block::default().borders(Borders::ALL)
    }
}

impl Widget for TranscriptWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let total = self.transcript.len();
        let visible_height = Self::visible_height(area);
        let scroll_info = if total > visible_height {
            format!(
                " ({}-{}/{})",
                self.scroll_offset + 1,
                (self.scroll_offset + visible_height).min(total),
                total
            )
        } else {
            String::new()
        };
        let border_style = if self.focused {
            self.theme.focused_border_style()
        } else {
            self.theme.border_style()
        };

        let block = Self::block()
            .title(Line::from(Span::styled(
                format!(" {}{scroll_info} ", self.title),
                self.theme.header_style(),
            )))
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let visible: Vec<Line> = self
            .transcript
            .lines()
            .iter()
            .skip(self.scroll_offset)
            .take(visible_height)
            .cloned()
            .collect();
        Paragraph::new(visible).render(inner, buf);

        if total > visible_height {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"))
                .track_symbol(Some("│"))
                .thumb_symbol("█")
                .track_style(self.theme.scrollbar_track_style())
                .thumb_style(self.theme.scrollbar_thumb_style());
            let mut state = ScrollbarState::new(total)
                .position(self.scroll_offset)
                .viewport_content_length(visible_height);
            scrollbar.render(inner, buf, &mut state);
        }
    }
}
