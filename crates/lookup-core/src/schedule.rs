//! Timetable grid: a direct (weekday, period) lookup for one week parity.

use crate::types::{Parity, Period, ScheduleEntry, Weekday};
use serde::Serialize;

/// Shown for a slot with no course.
pub const EMPTY_CELL: &str = "-";

const DAYS: usize = Weekday::SCHOOL_DAYS.len();

/// Fixed 8 periods × 5 school days of course names for one parity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleGrid {
    parity: Parity,
    /// Row-major: `cells[period][day]`.
    cells: Vec<[Option<String>; DAYS]>,
}

impl ScheduleGrid {
    /// Build the grid from records of the given parity. When two records claim
    /// the same slot, the first one in collection order wins. Records with an
    /// unrecognised weekday, period, or parity are skipped.
    pub fn build(records: &[ScheduleEntry], parity: Parity) -> Self {
        let mut cells: Vec<[Option<String>; DAYS]> = vec![Default::default(); Period::ALL.len()];
        for entry in records.iter().filter(|e| e.week_parity == Some(parity)) {
            let (Some(day), Some(period)) =
                (Weekday::from_label(&entry.weekday), Period::from_label(&entry.period))
            else {
                continue;
            };
            let Some(col) = day_column(day) else {
                continue;
            };
            let slot = &mut cells[period.index()][col];
            if slot.is_none() {
                *slot = Some(entry.course.clone());
            }
        }
        Self { parity, cells }
    }

    pub fn parity(&self) -> Parity {
        self.parity
    }

    /// Course in the slot, or `None` for an empty slot or a weekend day.
    pub fn cell(&self, day: Weekday, period: Period) -> Option<&str> {
        let col = day_column(day)?;
        self.cells[period.index()][col].as_deref()
    }

    /// Course in the slot, or [`EMPTY_CELL`].
    pub fn cell_or_placeholder(&self, day: Weekday, period: Period) -> &str {
        self.cell(day, period).unwrap_or(EMPTY_CELL)
    }

    /// Rows in period order, each holding the five school-day cells.
    pub fn rows(&self) -> impl Iterator<Item = (Period, [&str; DAYS])> + '_ {
        Period::ALL.into_iter().map(move |period| {
            let row = Weekday::SCHOOL_DAYS.map(|day| self.cell_or_placeholder(day, period));
            (period, row)
        })
    }

    /// Number of filled slots.
    pub fn filled(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }
}

fn day_column(day: Weekday) -> Option<usize> {
    Weekday::SCHOOL_DAYS.iter().position(|d| *d == day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lesson(weekday: &str, period: &str, course: &str, parity: Parity) -> ScheduleEntry {
        ScheduleEntry {
            weekday: weekday.into(),
            period: period.into(),
            course: course.into(),
            week_parity: Some(parity),
        }
    }

    #[test]
    fn lookup_respects_parity() {
        let records = vec![
            lesson("星期一", "第一节", "语文", Parity::Odd),
            lesson("星期一", "第一节", "数学", Parity::Even),
        ];
        let odd = ScheduleGrid::build(&records, Parity::Odd);
        let even = ScheduleGrid::build(&records, Parity::Even);
        assert_eq!(odd.cell(Weekday::Monday, Period::First), Some("语文"));
        assert_eq!(even.cell(Weekday::Monday, Period::First), Some("数学"));
    }

    #[test]
    fn absent_cells_render_placeholder() {
        let grid = ScheduleGrid::build(&[], Parity::Odd);
        assert_eq!(grid.cell_or_placeholder(Weekday::Friday, Period::Eighth), EMPTY_CELL);
        assert_eq!(grid.filled(), 0);
        assert_eq!(grid.rows().count(), 8);
    }

    #[test]
    fn first_record_wins_a_slot() {
        let records = vec![
            lesson("星期三", "第二节", "物理", Parity::Odd),
            lesson("星期三", "第二节", "化学", Parity::Odd),
        ];
        let grid = ScheduleGrid::build(&records, Parity::Odd);
        assert_eq!(grid.cell(Weekday::Wednesday, Period::Second), Some("物理"));
        assert_eq!(grid.filled(), 1);
    }

    #[test]
    fn weekend_and_unknown_labels_are_skipped() {
        let records = vec![
            lesson("星期六", "第一节", "补课", Parity::Odd),
            lesson("周一", "第一节", "英语", Parity::Odd),
            lesson("星期一", "第九节", "自习", Parity::Odd),
            ScheduleEntry { week_parity: None, ..lesson("星期一", "第一节", "体育", Parity::Odd) },
        ];
        let grid = ScheduleGrid::build(&records, Parity::Odd);
        assert_eq!(grid.filled(), 0);
        assert_eq!(grid.cell(Weekday::Saturday, Period::First), None);
    }

    #[test]
    fn rows_are_in_period_then_weekday_order() {
        let records = vec![lesson("星期五", "第八节", "班会", Parity::Even)];
        let grid = ScheduleGrid::build(&records, Parity::Even);
        let (period, row) = grid.rows().last().unwrap();
        assert_eq!(period, Period::Eighth);
        assert_eq!(row, ["-", "-", "-", "-", "班会"]);
    }
}
