//! Results pane — the scrollable body of the credentials and roster tabs.
//!
//! Shows one of three views: a [`Notice`], grouped credential matches, or
//! roster matches. Replacing the view resets the scroll position.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k`, `↓` / `j` | Scroll one line |
//! | `PageUp` / `PageDown` | Scroll one page |
//! | `g` / `G` | Jump to top / end |

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use lookup_core::notice::{
    credential_detail, credential_summary, roster_duty_tag, roster_fields, Notice,
};
use lookup_core::query::RosterQuery;
use lookup_core::{CredentialOutcome, DatasetKind, RosterOutcome};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
        Wrap,
    },
};

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum ResultView {
    Notice(Notice),
    Credentials(CredentialOutcome),
    Roster(RosterOutcome),
}

impl ResultView {
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            ResultView::Notice(n) => Some(n),
            _ => None,
        }
    }

    fn lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        match self {
            ResultView::Notice(notice) => notice_lines(notice, theme),
            ResultView::Credentials(outcome) => credential_lines(outcome, theme),
            ResultView::Roster(outcome) => roster_lines(outcome, theme),
        }
    }
}

fn notice_lines(notice: &Notice, theme: &Theme) -> Vec<Line<'static>> {
    let title_style = match notice {
        Notice::LoadFailed { .. } => theme.notice_error,
        _ => theme.notice_title,
    };
    vec![
        Line::from(Span::styled(notice.title(), title_style)),
        Line::default(),
        Line::from(Span::styled(notice.body(), theme.notice_body)),
    ]
}

fn credential_lines(outcome: &CredentialOutcome, theme: &Theme) -> Vec<Line<'static>> {
    let results = &outcome.results;
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} result(s) for \"{}\"", results.total, outcome.query),
            theme.count,
        )),
        Line::default(),
    ];
    for group in &results.groups {
        let brand = group.brand.label().to_string();
        lines.push(Line::from(Span::styled(
            format!("{brand} ({})", group.entries.len()),
            theme.brand_style(&brand),
        )));
        for entry in &group.entries {
            lines.push(Line::from(Span::styled(
                format!("  {}", credential_summary(entry)),
                theme.summary,
            )));
            lines.push(Line::from(Span::styled(
                format!("    {}", credential_detail(entry)),
                theme.detail,
            )));
        }
        lines.push(Line::default());
    }
    lines
}

fn roster_lines(outcome: &RosterOutcome, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    match &outcome.query {
        RosterQuery::Name(_) => {
            for entry in &outcome.matches {
                for (label, value) in roster_fields(entry) {
                    lines.push(Line::from(vec![
                        Span::styled(format!("{label}: "), theme.label),
                        Span::styled(value.to_string(), theme.summary),
                    ]));
                }
                lines.push(Line::default());
            }
        }
        RosterQuery::Weekday(day) => {
            lines.push(Line::from(Span::styled(
                format!("{day}值日学生 ({})", outcome.matches.len()),
                theme.group_header,
            )));
            lines.push(Line::default());
            for entry in &outcome.matches {
                lines.push(Line::from(Span::styled(
                    format!("  {}", roster_duty_tag(entry)),
                    theme.summary,
                )));
            }
        }
    }
    lines
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ResultsState {
    view: ResultView,
    /// First visible line.
    pub scroll: usize,
    /// Cached from the last render so `handle()` can clamp.
    last_height: Cell<usize>,
    last_total: Cell<usize>,
}

impl ResultsState {
    pub fn new(dataset: DatasetKind) -> Self {
        Self {
            view: ResultView::Notice(Notice::Welcome(dataset)),
            scroll: 0,
            last_height: Cell::new(20),
            last_total: Cell::new(0),
        }
    }

    pub fn view(&self) -> &ResultView {
        &self.view
    }

    pub fn show(&mut self, view: ResultView) {
        self.view = view;
        self.scroll = 0;
    }

    fn max_scroll(&self) -> usize {
        self.last_total.get().saturating_sub(self.last_height.get().max(1))
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let max = self.max_scroll();
        self.scroll = match event {
            AppEvent::Nav(Direction::Up) => self.scroll.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => (self.scroll + 1).min(max),
            AppEvent::ScrollUp => self.scroll.saturating_sub(PAGE_STEP),
            AppEvent::ScrollDown => (self.scroll + PAGE_STEP).min(max),
            AppEvent::ScrollToTop => 0,
            AppEvent::ScrollToEnd => max,
            _ => return,
        };
        tracing::debug!(scroll = self.scroll, "results: scrolled");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultsPane<'a> {
    state: &'a ResultsState,
    focused: bool,
    theme: &'a Theme,
    title: &'a str,
}

impl<'a> ResultsPane<'a> {
    pub fn new(state: &'a ResultsState, focused: bool, theme: &'a Theme, title: &'a str) -> Self {
        Self { state, focused, theme, title }
    }
}

impl Widget for ResultsPane<'_> {
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

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect { x: inner.right().saturating_sub(1), width: 1, ..inner };

        // Scroll range counts rows after wrapping, not logical lines.
        let paragraph = Paragraph::new(self.state.view.lines(self.theme)).wrap(Wrap { trim: false });
        let total = paragraph.line_count(text_area.width);
        let height = inner.height as usize;
        self.state.last_height.set(height);
        self.state.last_total.set(total);

        let scroll = self.state.scroll.min(u16::MAX as usize) as u16;
        paragraph.scroll((scroll, 0)).render(text_area, buf);

        if total > height {
            let mut sb_state = ScrollbarState::new(total)
                .position(self.state.scroll)
                .viewport_content_length(height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}
