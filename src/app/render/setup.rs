//! Setup screen rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::app::layout::form_window_start;
use crate::app::state::editor_text;
use crate::catalog::FieldKind;
use crate::core::Phase;
use crate::tui::widgets::{FieldView, FileStatus};

impl App {
    /// Renders the setup screen.
    ///
    /// Layout:
    /// - Header (1 line)
    /// - Selected task bar
    /// - Banner for validation errors, start failures and status
    /// - Form fields, windowed around the focused one
    /// - Footer with key hints
    pub(crate) fn render_setup(&self, frame: &mut Frame) {
        let layout = self.layout.setup;

        frame.render_widget(Paragraph::new(self.header_line()), layout.header);
        self.render_task_bar(frame, layout.task_bar);
        self.render_setup_banner(frame, layout.banner);
        self.render_form(frame, layout.form);
        self.render_setup_footer(frame, layout.footer);
    }

    fn render_task_bar(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" タスク ")
            .title_style(self.theme.header_style())
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        let line = match self.form.task() {
            Some(task) => Line::from(vec![
                Span::styled(task.category().name(), self.theme.category_style()),
                Span::styled(" › ", self.theme.muted_style()),
                Span::styled(task.display_name, self.theme.highlight_style()),
                Span::styled("  [Ctrl+T] 変更", self.theme.muted_style()),
            ]),
            None => Line::from(Span::styled(
                "[Ctrl+T] でタスクを選択してください",
                self.theme.muted_style(),
            )),
        };
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_setup_banner(&self, frame: &mut Frame, area: Rect) {
        let (text, style): (&str, Style) =
            if let Some(error) = self.conversation.error_banner() {
                (error, self.theme.error_style())
            } else if let Some(banner) = self.form_ui.banner.as_deref() {
                (banner, self.theme.error_style())
            } else if self.conversation.phase() == Phase::Starting {
                ("AI が回答を生成しています…", self.theme.warning_style())
            } else if let Some(status) = &self.status {
                (status.text.as_str(), self.status_style(status))
            } else {
                return;
            };
        frame.render_widget(Paragraph::new(Span::styled(format!(" {text}"), style)), area);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let fields = self.visible_fields();
        if fields.is_empty() {
            return;
        }
        let area = Rect {
            x: area.x + 1,
            width: area.width.saturating_sub(2),
            ..area
        };

        let locked = self.conversation.phase() != Phase::Setup;
        let focused = self.focused_index();
        let heights: Vec<u16> = fields.iter().map(|f| FieldView::height(f.kind)).collect();
        let start = form_window_start(&heights, focused, area.height);

        let bottom = area.y + area.height;
        let mut y = area.y;
        for (index, field) in fields.iter().enumerate().skip(start) {
            if y >= bottom {
                break;
            }
            let height = heights[index].min(bottom - y);
            let rect = Rect { y, height, ..area };
            y += height;

            let is_focused = !locked && index == focused;
            let status = self.form_ui.file_status.get(field.id);
            let view = FieldView::new(field, self.form.values().get(field.id), &self.theme)
                .focused(is_focused)
                .status(status);
            frame.render_widget(view, rect);

            if is_focused && self.shows_editor(field.kind, status) {
                let mut editor = self.form_ui.editor.clone();
                editor.set_style(self.theme.normal_style());
                editor.set_cursor_line_style(Style::default());
                editor.set_placeholder_style(self.theme.placeholder_style());
                frame.render_widget(&editor, FieldView::input_area(rect));
            }
        }
    }

    /// Whether the focused field's editor is drawn over the stored value.
    ///
    /// File fields keep their loading or error line until a new path is
    /// typed.
    fn shows_editor(&self, kind: FieldKind, status: Option<&FileStatus>) -> bool {
        match kind {
            FieldKind::Text | FieldKind::Multiline | FieldKind::Number => true,
            FieldKind::File => status.is_none() || !editor_text(&self.form_ui.editor).is_empty(),
            FieldKind::Choice => false,
        }
    }

    fn render_setup_footer(&self, frame: &mut Frame, area: Rect) {
        let hints: &[(&str, &str)] = if self.conversation.phase() == Phase::Starting {
            &[("Esc", "キャンセル"), ("Ctrl+C", "終了")]
        } else {
            &[
                ("Tab", "次の項目"),
                ("Ctrl+D", "実行"),
                ("Ctrl+T", "タスク"),
                ("Ctrl+S", "設定"),
                ("Ctrl+C", "終了"),
            ]
        };
        frame.render_widget(Paragraph::new(self.key_hints(hints)), area);
    }
}
