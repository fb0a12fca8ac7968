//! Task picker overlay.
//!
//! A filterable list of every task. With an empty query tasks are listed by
//! category; typing fuzzy-filters by name and key.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Widget},
};

use super::pad_to_width;
use crate::catalog::{Catalog, TaskDefinition};
use crate::tui::Theme;

/// Maximum number of visible task rows.
pub const MAX_PICKER_ROWS: usize = 14;

const PICKER_WIDTH: u16 = 76;
const CATEGORY_COLUMN: usize = 24;

/// Query, matches and selection of the picker.
#[derive(Debug, Clone, Default)]
pub struct TaskPickerState {
    query: String,
    matches: Vec<&'static TaskDefinition>,
    selected: usize,
}

impl TaskPickerState {
    /// Opens the picker with `current` preselected.
    #[must_use]
    pub fn open(catalog: &Catalog, current: Option<&str>) -> Self {
        let mut state = Self::default();
        state.refresh(catalog);
        if let Some(key) = current {
            state.selected = state
                .matches
                .iter()
                .position(|t| t.key == key)
                .unwrap_or(0);
        }
        state
    }

    /// Current filter text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Tasks matching the query, in display order.
    #[must_use]
    pub fn matches(&self) -> &[&'static TaskDefinition] {
        &self.matches
    }

    /// Index of the highlighted row.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    /// The highlighted task, if any matches.
    #[must_use]
    pub fn selected_task(&self) -> Option<&'static TaskDefinition> {
        self.matches.get(self.selected).copied()
    }

    /// Appends to the query and refilters.
    pub fn push_str(&mut self, catalog: &Catalog, text: &str) {
        self.query.push_str(text);
        self.refresh(catalog);
        self.selected = 0;
    }

    /// Removes the last query character and refilters.
    pub fn pop_char(&mut self, catalog: &Catalog) {
        if self.query.pop().is_some() {
            self.refresh(catalog);
            self.selected = 0;
        }
    }

    /// Moves the highlight up by one.
    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves the highlight down by one.
    pub fn select_down(&mut self) {
        self.selected = (self.selected + 1).min(self.matches.len().saturating_sub(1));
    }

    fn refresh(&mut self, catalog: &Catalog) {
        self.matches = if self.query.trim().is_empty() {
            catalog
                .grouped()
                .into_iter()
                .flat_map(|(_, tasks)| tasks)
                .collect()
        } else {
            catalog
                .search(&self.query)
                .into_iter()
                .map(|hit| hit.task)
                .collect()
        };
    }
}

/// Widget rendering the picker.
pub struct TaskPicker<'a> {
    state: &'a TaskPickerState,
    theme: &'a Theme,
}

impl<'a> TaskPicker<'a> {
    /// Creates a picker widget.
    #[must_use]
    pub const fn new(state: &'a TaskPickerState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    /// Returns (width, height) in terminal cells: query row, task rows and
    /// borders.
    #[must_use]
    pub fn preferred_size(&self) -> (u16, u16) {
        let rows = self.state.matches.len().clamp(1, MAX_PICKER_ROWS);
        #[allow(clippy::cast_possible_truncation)] // At most MAX_PICKER_ROWS + 3.
        let height = (rows + 3) as u16;
        (PICKER_WIDTH, height)
    }

    /// Centers the preferred size inside `screen`.
    #[must_use]
    pub fn area(&self, screen: Rect) -> Rect {
        let (width, height) = self.preferred_size();
        let width = width.min(screen.width);
        let height = height.min(screen.height);
        Rect::new(
            screen.x + screen.width.saturating_sub(width) / 2,
            screen.y + screen.height.saturating_sub(height) / 2,
            width,
            height,
        )
    }
}

impl Widget for TaskPicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(" タスクを選択 ")
            .title_style(self.theme.header_style())
            .title_bottom(Line::from(vec![
                Span::styled(" [↑/↓] ", self.theme.highlight_style()),
                Span::styled("移動 ", self.theme.muted_style()),
                Span::styled("[Enter] ", self.theme.highlight_style()),
                Span::styled("決定 ", self.theme.muted_style()),
                Span::styled("[Esc] ", self.theme.highlight_style()),
                Span::styled("閉じる ", self.theme.muted_style()),
            ]))
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        let query_line = Line::from(vec![
            Span::styled("検索: ", self.theme.muted_style()),
            Span::styled(self.state.query.as_str(), self.theme.normal_style()),
            Span::styled("▏", self.theme.highlight_style()),
        ]);
        Paragraph::new(query_line).render(Rect { height: 1, ..inner }, buf);

        let list_area = Rect {
            y: inner.y + 1,
            height: inner.height.saturating_sub(1),
            ..inner
        };
        let visible = list_area.height as usize;
        if self.state.matches.is_empty() {
            Paragraph::new(Span::styled(
                "  該当するタスクがありません",
                self.theme.muted_style(),
            ))
            .render(list_area, buf);
            return;
        }

        let first = (self.state.selected + 1).saturating_sub(visible);
        let items: Vec<ListItem> = self
            .state
            .matches
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .map(|(i, task)| {
                let is_selected = i == self.state.selected;
                let (prefix, style) = if is_selected {
                    ("› ", self.theme.highlight_style())
                } else {
                    ("  ", self.theme.normal_style())
                };
                ListItem::new(Line::from(vec![
                    Span::styled(prefix, style),
                    Span::styled(
                        pad_to_width(task.category().name(), CATEGORY_COLUMN),
                        self.theme.category_style(),
                    ),
                    Span::styled(task.display_name, style),
                ]))
            })
            .collect();
        Widget::render(List::new(items), list_area, buf);
    }
}
