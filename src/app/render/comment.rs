//! Feedback comment box rendering.

use ratatui::{
    Frame,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear},
};

use crate::app::App;
use crate::app::layout::centered;

/// Size of the comment box.
const COMMENT_WIDTH: u16 = 64;
const COMMENT_HEIGHT: u16 = 8;

impl App {
    /// Renders the comment box for unhelpful feedback.
    pub(crate) fn render_comment(&self, frame: &mut Frame) {
        let Some(comment) = &self.comment else {
            return;
        };
        let area = centered(frame.area(), COMMENT_WIDTH, COMMENT_HEIGHT);
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" 改善が必要な点 ")
            .title_style(self.theme.header_style())
            .title_bottom(Line::from(vec![
                Span::styled(" [Enter] ", self.theme.highlight_style()),
                Span::styled("送信  ", self.theme.muted_style()),
                Span::styled("[Shift+Enter] ", self.theme.highlight_style()),
                Span::styled("改行  ", self.theme.muted_style()),
                Span::styled("[Esc] ", self.theme.highlight_style()),
                Span::styled("キャンセル ", self.theme.muted_style()),
            ]))
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style());

        let mut editor = comment.editor.clone();
        editor.set_block(block);
        editor.set_style(self.theme.normal_style());
        editor.set_cursor_line_style(Style::default());
        editor.set_placeholder_style(self.theme.placeholder_style());
        frame.render_widget(&editor, area);
    }
}
