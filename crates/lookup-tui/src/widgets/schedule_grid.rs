//! Schedule tab — the 8 × 5 timetable for the selected week parity.
//!
//! The grid is rebuilt from the session on every draw; when the dataset is
//! not ready, or the grid is hidden, a notice takes its place.

use crate::theme::Theme;
use lookup_core::notice::Notice;
use lookup_core::schedule::{ScheduleGrid, EMPTY_CELL};
use lookup_core::{Parity, Weekday};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, Table, Widget, Wrap},
};

/// What the schedule tab body shows.
pub enum ScheduleBody {
    Grid(ScheduleGrid),
    Hidden,
    Notice(Notice),
}

pub struct ScheduleView<'a> {
    body: &'a ScheduleBody,
    theme: &'a Theme,
}

impl<'a> ScheduleView<'a> {
    pub fn new(body: &'a ScheduleBody, theme: &'a Theme) -> Self {
        Self { body, theme }
    }
}

impl Widget for ScheduleView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.body {
            ScheduleBody::Grid(grid) => format!(" 课程表 · {} ", grid.parity()),
            _ => " 课程表 ".to_string(),
        };
        let block = Block::bordered()
            .title(title)
            .border_style(self.theme.border_unfocused);

        match self.body {
            ScheduleBody::Grid(grid) => grid_table(grid, self.theme).block(block).render(area, buf),
            ScheduleBody::Hidden => {
                Paragraph::new(Line::from(Span::styled(
                    "Timetable hidden. Press s to show it.",
                    self.theme.notice_body,
                )))
                .block(block)
                .render(area, buf);
            }
            ScheduleBody::Notice(notice) => {
                let title_style = match notice {
                    Notice::LoadFailed { .. } => self.theme.notice_error,
                    _ => self.theme.notice_title,
                };
                Paragraph::new(vec![
                    Line::from(Span::styled(notice.title(), title_style)),
                    Line::default(),
                    Line::from(Span::styled(notice.body(), self.theme.notice_body)),
                ])
                .wrap(Wrap { trim: false })
                .block(block)
                .render(area, buf);
            }
        }
    }
}

fn grid_table<'a>(grid: &'a ScheduleGrid, theme: &Theme) -> Table<'a> {
    let header = Row::new(
        std::iter::once(Cell::from("节次"))
            .chain(Weekday::SCHOOL_DAYS.iter().map(|d| Cell::from(d.label()))),
    )
    .style(theme.grid_header);

    let rows = grid.rows().map(|(period, cells)| {
        let mut row = vec![Cell::from(Span::styled(period.label(), theme.grid_period))];
        row.extend(cells.into_iter().map(|course| {
            let style = if course == EMPTY_CELL { theme.grid_empty } else { theme.grid_course };
            Cell::from(Span::styled(course, style))
        }));
        Row::new(row)
    });

    let mut widths = vec![Constraint::Length(8)];
    widths.extend([Constraint::Fill(1); 5]);

    Table::new(rows, widths).header(header).column_spacing(1)
}

/// Bottom bar of the schedule tab: current parity and the keys that change it.
pub struct ParityBar<'a> {
    parity: Parity,
    theme: &'a Theme,
}

impl<'a> ParityBar<'a> {
    pub fn new(parity: Parity, theme: &'a Theme) -> Self {
        Self { parity, theme }
    }
}

impl Widget for ParityBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Week ")
            .border_style(self.theme.border_unfocused);
        let line = Line::from(vec![
            Span::styled(self.parity.label(), self.theme.label),
            Span::styled("   [ 单周   ] 双周   p toggle   s show/hide", self.theme.count),
        ]);
        Paragraph::new(line).block(block).render(area, buf);
    }
}
