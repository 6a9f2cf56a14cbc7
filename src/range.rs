//! Inclusive calendar date ranges, and the policy that keeps them consistent while one of
//! their edges is being dragged

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;

/// One endpoint of a task's date range. This is the unit of resize interaction: a resize
/// gesture always drags exactly one edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

impl Display for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Edge::Start => write!(f, "start"),
            Edge::End => write!(f, "end"),
        }
    }
}

/// A day's classification within a task's visual span.
///
/// Within a task's range every day gets exactly one role; days outside the range get none.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentRole {
    /// The task covers this single day only
    Single,
    /// First day of a multi-day task
    Start,
    /// Strictly between the first and the last day
    Middle,
    /// Last day of a multi-day task
    End,
}

/// An inclusive `[start, end]` range of calendar days.
///
/// `start <= end` holds for every instance: the constructor refuses inverted input, and
/// [`resize`](DateRange::resize) repairs an edge move that crosses the opposite edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, or `None` in case `start` is after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// A range covering a single day
    pub fn single(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    pub fn start(&self) -> NaiveDate { self.start }
    pub fn end(&self) -> NaiveDate   { self.end   }

    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    /// Whether `day` falls within the range (both bounds included)
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Number of days this range spans. A single-day range spans 1.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Move one edge of the range to `new_date` and return the repaired result.
    ///
    /// The dragged edge always wins: when it crosses the opposite edge, the range
    /// collapses to a single day at `new_date` (the other edge snaps to follow it).
    /// This is a pure function: applying it twice with the same arguments gives the
    /// same result as applying it once.
    pub fn resize(&self, edge: Edge, new_date: NaiveDate) -> Self {
        match edge {
            Edge::Start if new_date > self.end => Self::single(new_date),
            Edge::Start => Self { start: new_date, end: self.end },
            Edge::End if new_date < self.start => Self::single(new_date),
            Edge::End => Self { start: self.start, end: new_date },
        }
    }

    /// The role `day` plays within this range, or `None` for a day outside it
    pub fn role_on(&self, day: NaiveDate) -> Option<SegmentRole> {
        if self.contains(day) == false {
            return None;
        }
        let role = if self.is_single_day() {
            SegmentRole::Single
        } else if day == self.start {
            SegmentRole::Start
        } else if day == self.end {
            SegmentRole::End
        } else {
            SegmentRole::Middle
        };
        Some(role)
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_inverted_ranges() {
        assert!(DateRange::new(day(2024, 1, 17), day(2024, 1, 15)).is_none());
        assert!(DateRange::new(day(2024, 1, 15), day(2024, 1, 15)).is_some());
    }

    #[test]
    fn resize_keeps_the_far_edge_when_no_inversion_happens() {
        let range = DateRange::new(day(2024, 1, 15), day(2024, 1, 17)).unwrap();

        let moved = range.resize(Edge::Start, day(2024, 1, 10));
        assert_eq!(moved.start(), day(2024, 1, 10));
        assert_eq!(moved.end(), day(2024, 1, 17));

        let moved = range.resize(Edge::End, day(2024, 1, 20));
        assert_eq!(moved.start(), day(2024, 1, 15));
        assert_eq!(moved.end(), day(2024, 1, 20));
    }

    #[test]
    fn resize_collapses_to_the_dragged_edge_on_inversion() {
        let range = DateRange::new(day(2024, 1, 15), day(2024, 1, 17)).unwrap();

        let collapsed = range.resize(Edge::Start, day(2024, 1, 20));
        assert_eq!(collapsed, DateRange::single(day(2024, 1, 20)));

        // Dragging the end edge of [2024-01-15, 2024-01-17] back to 2024-01-14
        let collapsed = range.resize(Edge::End, day(2024, 1, 14));
        assert_eq!(collapsed, DateRange::single(day(2024, 1, 14)));
    }

    #[test]
    fn resize_is_idempotent() {
        let range = DateRange::new(day(2024, 1, 15), day(2024, 1, 17)).unwrap();
        for &edge in &[Edge::Start, Edge::End] {
            for &target in &[day(2024, 1, 10), day(2024, 1, 16), day(2024, 1, 25)] {
                let once = range.resize(edge, target);
                assert_eq!(once.resize(edge, target), once);
            }
        }
    }

    #[test]
    fn resize_never_leaves_an_inverted_range() {
        let range = DateRange::new(day(2024, 2, 10), day(2024, 2, 20)).unwrap();
        for &edge in &[Edge::Start, Edge::End] {
            for offset in 0..40 {
                let target = day(2024, 2, 1) + chrono::Duration::days(offset);
                let resized = range.resize(edge, target);
                assert!(resized.start() <= resized.end());
            }
        }
    }

    #[test]
    fn every_day_in_range_gets_exactly_one_role() {
        let range = DateRange::new(day(2024, 1, 15), day(2024, 1, 18)).unwrap();
        assert_eq!(range.role_on(day(2024, 1, 15)), Some(SegmentRole::Start));
        assert_eq!(range.role_on(day(2024, 1, 16)), Some(SegmentRole::Middle));
        assert_eq!(range.role_on(day(2024, 1, 17)), Some(SegmentRole::Middle));
        assert_eq!(range.role_on(day(2024, 1, 18)), Some(SegmentRole::End));
        assert_eq!(range.role_on(day(2024, 1, 14)), None);
        assert_eq!(range.role_on(day(2024, 1, 19)), None);
    }

    #[test]
    fn single_day_ranges_only_ever_report_the_single_role() {
        let range = DateRange::single(day(2024, 1, 15));
        assert_eq!(range.role_on(day(2024, 1, 15)), Some(SegmentRole::Single));
        assert_eq!(range.role_on(day(2024, 1, 16)), None);
        assert_eq!(range.days(), 1);
    }

    #[test]
    fn day_count_includes_both_bounds() {
        let range = DateRange::new(day(2024, 1, 15), day(2024, 1, 17)).unwrap();
        assert_eq!(range.days(), 3);
    }
}
