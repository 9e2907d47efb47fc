//! Query bar widget — single-line text input at the bottom of the screen.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor.
//!
//! [`QueryBarState::handle`] reports whether the text changed so the app
//! shell knows when to (re)schedule a debounced search.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use lookup_core::notice::display_width;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct QueryBarState {
    pub query: String,
    /// Byte offset of the cursor within `query`.
    pub cursor: usize,
}

impl QueryBarState {
    /// Apply an editing event. Returns `true` when the query text changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.query.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(query = %self.query, cursor = self.cursor, "query: char inserted");
                true
            }
            AppEvent::Backspace if self.cursor > 0 => {
                let prev = self.prev_boundary();
                self.query.remove(prev);
                self.cursor = prev;
                tracing::debug!(query = %self.query, cursor = self.cursor, "query: backspace");
                true
            }
            AppEvent::Nav(Direction::Left) if self.cursor > 0 => {
                self.cursor = self.prev_boundary();
                false
            }
            AppEvent::Nav(Direction::Right) if self.cursor < self.query.len() => {
                self.cursor = self.query[self.cursor..]
                    .char_indices()
                    .nth(1)
                    .map(|(i, _)| self.cursor + i)
                    .unwrap_or(self.query.len());
                false
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    fn prev_boundary(&self) -> usize {
        self.query[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct QueryBar<'a> {
    state: &'a QueryBarState,
    focused: bool,
    theme: &'a Theme,
    title: &'a str,
    status: &'a str,
}

impl<'a> QueryBar<'a> {
    pub fn new(state: &'a QueryBarState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme, title: "Query", status: "" }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Short right-aligned hint, e.g. the pending-search indicator.
    pub fn status(mut self, status: &'a str) -> Self {
        self.status = status;
        self
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Wide (CJK) characters take two columns.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let col = display_width(&self.state.query[..self.state.cursor]) as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(1));
        (x, area.y + 1)
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let status_width = display_width(self.status) as u16;
        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(status_width)])
            .split(inner);

        let query_line = if self.state.query.is_empty() && !self.focused {
            Line::from(Span::styled(
                "press / to search",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.state.query.as_str())
        };
        Paragraph::new(query_line).render(chunks[0], buf);

        if !self.status.is_empty() {
            Paragraph::new(Line::from(Span::styled(self.status, self.theme.count)))
                .render(chunks[1], buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> QueryBarState {
        let mut s = QueryBarState::default();
        for c in text.chars() {
            s.handle(&AppEvent::Char(c));
        }
        s
    }

    #[test]
    fn typing_and_backspace_report_changes() {
        let mut s = typed("华为");
        assert_eq!(s.query, "华为");
        assert_eq!(s.cursor, "华为".len());
        assert!(s.handle(&AppEvent::Backspace));
        assert_eq!(s.query, "华");
    }

    #[test]
    fn cursor_moves_do_not_report_changes() {
        let mut s = typed("ab");
        assert!(!s.handle(&AppEvent::Nav(Direction::Left)));
        assert_eq!(s.cursor, 1);
        assert!(s.handle(&AppEvent::Char('x')));
        assert_eq!(s.query, "axb");
        assert!(!s.handle(&AppEvent::Nav(Direction::Right)));
        assert_eq!(s.cursor, 3);
    }

    #[test]
    fn backspace_at_start_is_a_no_op() {
        let mut s = QueryBarState::default();
        assert!(!s.handle(&AppEvent::Backspace));
    }

    #[test]
    fn cursor_column_counts_wide_chars() {
        let s = typed("TP路由");
        let theme = Theme::load_default();
        let bar = QueryBar::new(&s, true, &theme);
        let area = Rect::new(0, 10, 40, 3);
        assert_eq!(bar.cursor_position(area), (1 + 2 + 4, 11));
    }
}
