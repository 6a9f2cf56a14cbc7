//! Month grid construction, and the projection of a task collection onto visible days

use chrono::{Datelike, NaiveDate};

use crate::range::SegmentRole;
use crate::task::Task;

/// How many tasks a day cell displays before truncating to a "+n more" count.
/// This is a presentation limit, not a data limit.
pub const MAX_VISIBLE_TASKS: usize = 3;

/// One (year, month) page of the calendar.
///
/// The grid is laid out week-aligned: leading blank cells up to the weekday of day 1
/// (weeks start on Sunday), then one cell per day of the month, no trailing padding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    /// 1-based, like on a wall calendar
    month: u32,
}

impl MonthGrid {
    /// Create a grid, or `None` in case `month` is not in `1..=12`
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The grid of the month containing `day`
    pub fn containing(day: NaiveDate) -> Self {
        Self { year: day.year(), month: day.month() }
    }

    pub fn year(&self) -> i32   { self.year  }
    pub fn month(&self) -> u32  { self.month }

    fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap(/* the month was validated at construction */)
    }

    /// Number of leading blank cells, i.e. the weekday index of day 1 (0 = Sunday)
    pub fn leading_blanks(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    /// 28 to 31, depending on the month and leap-year rules
    pub fn days_in_month(&self) -> u32 {
        let first_of_next = self.succ().first_day();
        first_of_next.pred_opt().unwrap(/* the day before the first of a month always exists */).day()
    }

    /// The cells of the grid: `None` for each leading blank, then `Some(day)` for every
    /// day of the month
    pub fn cells(&self) -> Vec<Option<u32>> {
        let mut cells = Vec::with_capacity((self.leading_blanks() + self.days_in_month()) as usize);
        for _ in 0..self.leading_blanks() {
            cells.push(None);
        }
        for day in 1..=self.days_in_month() {
            cells.push(Some(day));
        }
        cells
    }

    /// The calendar date of the given day number, or `None` for a day outside this month
    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// The next month, wrapping the year at the December boundary
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    /// The previous month, wrapping the year at the January boundary
    pub fn pred(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }
}

/// The tasks occupying `day`: every task whose date range contains it, in input order.
/// A single-day task occupies exactly one day.
pub fn tasks_for_day<'a>(tasks: &'a [Task], day: NaiveDate) -> Vec<&'a Task> {
    tasks.iter().filter(|task| task.range().contains(day)).collect()
}

/// The role `task` plays on `day` for rendering multi-day bars, or `None` when the day is
/// outside the task's range
pub fn segment_role(task: &Task, day: NaiveDate) -> Option<SegmentRole> {
    task.range().role_on(day)
}

/// What one day cell displays: at most [`MAX_VISIBLE_TASKS`] occupying tasks, plus a count
/// of the hidden remainder
#[derive(Debug)]
pub struct DayCell<'a> {
    pub visible: Vec<&'a Task>,
    pub hidden: usize,
}

/// Project the task collection onto one day cell, applying the truncation policy
pub fn day_cell<'a>(tasks: &'a [Task], day: NaiveDate) -> DayCell<'a> {
    let mut occupying = tasks_for_day(tasks, day);
    let hidden = occupying.len().saturating_sub(MAX_VISIBLE_TASKS);
    occupying.truncate(MAX_VISIBLE_TASKS);
    DayCell { visible: occupying, hidden }
}
