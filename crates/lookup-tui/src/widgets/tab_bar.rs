//! Tab bar widget — one tab per dataset at the top of the screen.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Tabs, Widget},
};

/// Load status shown next to a tab label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabStatus {
    Pending,
    Ready,
    Failed,
}

#[derive(Debug, Clone)]
pub struct TabLabel {
    pub text: String,
    pub status: TabStatus,
}

/// Renders the 1-line strip of dataset tabs.
///
/// A `…` suffix marks a dataset still loading and `✗` one that failed.
/// Keybinding hints (`q:quit  ?:help`) are right-aligned in the same row.
pub struct TabBar<'a> {
    tabs: &'a [TabLabel],
    active: usize,
    theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(tabs: &'a [TabLabel], active: usize, theme: &'a Theme) -> Self {
        Self { tabs, active, theme }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let labels: Vec<Line> = self
            .tabs
            .iter()
            .map(|tab| {
                let marker = match tab.status {
                    TabStatus::Pending => Span::styled(" …", self.theme.tab_pending),
                    TabStatus::Failed => Span::styled(" ✗", self.theme.tab_failed),
                    TabStatus::Ready => Span::raw(""),
                };
                Line::from(vec![Span::raw(format!(" {}", tab.text)), marker, Span::raw(" ")])
            })
            .collect();

        Tabs::new(labels)
            .select(self.active)
            .highlight_style(self.theme.tab_active)
            .divider("")
            .render(area, buf);

        let hint = " q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(hint_x, area.y, hint, Style::default().add_modifier(Modifier::DIM));
    }
}
