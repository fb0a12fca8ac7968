//! Chat screen rendering.
//!
//! Header, transcript, status line, composer and footer.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tui_textarea::TextArea;

use crate::app::{App, ChatFocus};
use crate::tui::widgets::TranscriptWidget;

impl App {
    /// Renders the chat screen.
    ///
    /// Uses the cached layout from `self.layout.chat`, calculated once per
    /// frame in `update_layout()`.
    pub(crate) fn render_chat(&self, frame: &mut Frame) {
        let layout = self.layout.chat;

        frame.render_widget(Paragraph::new(self.header_line()), layout.header);
        self.render_transcript(frame, layout.transcript);
        self.render_chat_status(frame, layout.status);
        self.render_composer(frame, layout.composer);
        self.render_chat_footer(frame, layout.footer);
    }

    fn render_transcript(&self, frame: &mut Frame, area: Rect) {
        let transcript = self.transcript();
        let title = self.conversation.task().map_or("会話", |t| t.display_name);
        let widget = TranscriptWidget::new(
            &transcript,
            self.chat_ui.scroll.offset,
            title,
            &self.theme,
        )
        .focused(self.chat_ui.focus == ChatFocus::Messages);
        frame.render_widget(widget, area);
    }

    fn render_chat_status(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(status) = &self.status {
            Line::from(Span::styled(
                format!(" {}", status.text),
                self.status_style(status),
            ))
        } else if self.conversation.is_busy() {
            Line::from(Span::styled(" 生成中…", self.theme.warning_style()))
        } else {
            let count = self.conversation.messages().len();
            Line::from(Span::styled(
                format!(" {count} 件のメッセージ"),
                self.theme.muted_style(),
            ))
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_composer(&self, frame: &mut Frame, area: Rect) {
        let busy = self.conversation.is_busy();
        let title = if busy { " 応答待ち… " } else { " メッセージ " };
        let border_style = if !busy && self.chat_ui.focus == ChatFocus::Composer {
            self.theme.focused_border_style()
        } else {
            self.theme.border_style()
        };

        let block = Block::bordered()
            .title(title)
            .title_style(self.theme.header_style())
            .title_bottom(Line::from(vec![
                Span::styled(" Shift", self.theme.highlight_style()),
                Span::styled("+Enter で改行 ", self.theme.muted_style()),
            ]))
            .border_style(border_style);

        let mut textarea: TextArea<'_> = self.chat_ui.composer.clone();
        textarea.set_block(block);
        textarea.set_style(if busy {
            self.theme.muted_style()
        } else {
            self.theme.normal_style()
        });
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_style(self.theme.placeholder_style());
        frame.render_widget(&textarea, area);
    }

    fn render_chat_footer(&self, frame: &mut Frame, area: Rect) {
        let hints: &[(&str, &str)] = match self.chat_ui.focus {
            ChatFocus::Composer => &[
                ("Enter", "送信"),
                ("Tab", "メッセージ選択"),
                ("PgUp/PgDn", "スクロール"),
                ("Ctrl+R", "新しいタスク"),
                ("Ctrl+S", "設定"),
                ("Ctrl+C", "終了"),
            ],
            ChatFocus::Messages => &[
                ("↑/↓", "選択"),
                ("c", "コピー"),
                ("y", "コード"),
                ("+/-", "評価"),
                ("1-3", "提案"),
                ("Esc", "入力へ戻る"),
            ],
        };
        frame.render_widget(Paragraph::new(self.key_hints(hints)), area);
    }
}
