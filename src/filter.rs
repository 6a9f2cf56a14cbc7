//! Task filtering: a conjunction of predicates over category, priority, completion and time.
//!
//! The criteria mirror what the `/tasks` resource understands as query parameters, with one
//! exception: completion filtering is a client-side concern and never reaches the wire.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::task::{Category, Priority, Task};

/// Coarse hour buckets over a task's `time` field (the `timeRange` query parameter)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeRange {
    /// 06:00 to 12:00
    Morning,
    /// 12:00 to 18:00
    Afternoon,
    /// 18:00 to 22:00
    Evening,
    /// 22:00 to 06:00, wrapping around midnight
    Night,
}

impl TimeRange {
    pub fn contains_hour(self, hour: u32) -> bool {
        match self {
            TimeRange::Morning => hour >= 6 && hour < 12,
            TimeRange::Afternoon => hour >= 12 && hour < 18,
            TimeRange::Evening => hour >= 18 && hour < 22,
            TimeRange::Night => hour >= 22 || hour < 6,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Morning => "morning",
            TimeRange::Afternoon => "afternoon",
            TimeRange::Evening => "evening",
            TimeRange::Night => "night",
        }
    }
}

/// Finer hour buckets over a task's `time` field (the `timeOfDay` query parameter)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeOfDay {
    /// 06:00 to 09:00
    Early,
    /// 09:00 to 12:00
    Morning,
    /// 12:00 to 14:00
    Lunch,
    /// 14:00 to 17:00
    Afternoon,
    /// 17:00 to 20:00
    Evening,
    /// 20:00 to 23:00
    Night,
}

impl TimeOfDay {
    pub fn contains_hour(self, hour: u32) -> bool {
        match self {
            TimeOfDay::Early => hour >= 6 && hour < 9,
            TimeOfDay::Morning => hour >= 9 && hour < 12,
            TimeOfDay::Lunch => hour >= 12 && hour < 14,
            TimeOfDay::Afternoon => hour >= 14 && hour < 17,
            TimeOfDay::Evening => hour >= 17 && hour < 20,
            TimeOfDay::Night => hour >= 20 && hour < 23,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Early => "early",
            TimeOfDay::Morning => "morning",
            TimeOfDay::Lunch => "lunch",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}

type Predicate<'a> = Box<dyn Fn(&Task) -> bool + 'a>;

/// The filter criteria a client holds. Every set criterion must match (logical AND).
///
/// `completed` is special: the storage collaborator knows nothing about it, so
/// [`to_query`](TaskFilter::to_query) omits it and callers apply
/// [`matches_completion`](TaskFilter::matches_completion) on the fetched list instead.
#[derive(Clone, Debug, Default)]
pub struct TaskFilter {
    /// Matches the task's primary date (the range start)
    pub date: Option<NaiveDate>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    pub time_range: Option<TimeRange>,
    pub time_of_day: Option<TimeOfDay>,
    /// Inclusive lower `HH:MM` bound on the task's time
    pub start_time: Option<NaiveTime>,
    /// Inclusive upper `HH:MM` bound on the task's time
    pub end_time: Option<NaiveTime>,
}

impl TaskFilter {
    /// A filter with no criteria: everything matches
    pub fn new() -> Self {
        Self::default()
    }

    /// One closure per active query criterion. Tasks without a time never match a time
    /// criterion.
    fn query_predicates(&self) -> Vec<Predicate<'_>> {
        let mut predicates: Vec<Predicate<'_>> = Vec::new();
        if let Some(date) = self.date {
            predicates.push(Box::new(move |task| task.date() == date));
        }
        if let Some(category) = &self.category {
            predicates.push(Box::new(move |task| task.category() == category));
        }
        if let Some(priority) = self.priority {
            predicates.push(Box::new(move |task| task.priority() == priority));
        }
        if let Some(time_range) = self.time_range {
            predicates.push(Box::new(move |task| {
                match task.time() {
                    Some(time) => time_range.contains_hour(time.hour()),
                    None => false,
                }
            }));
        }
        if let Some(time_of_day) = self.time_of_day {
            predicates.push(Box::new(move |task| {
                match task.time() {
                    Some(time) => time_of_day.contains_hour(time.hour()),
                    None => false,
                }
            }));
        }
        if self.start_time.is_some() || self.end_time.is_some() {
            let (start_time, end_time) = (self.start_time, self.end_time);
            predicates.push(Box::new(move |task| {
                let time = match task.time() {
                    Some(time) => time,
                    None => return false,
                };
                start_time.map_or(true, |bound| time >= bound)
                    && end_time.map_or(true, |bound| time <= bound)
            }));
        }
        predicates
    }

    /// Whether `task` matches every criterion the wire protocol carries
    /// (everything except `completed`)
    pub fn matches_query(&self, task: &Task) -> bool {
        self.query_predicates().iter().all(|matches| matches(task))
    }

    /// Whether `task` matches the client-side completion criterion
    pub fn matches_completion(&self, task: &Task) -> bool {
        self.completed.map_or(true, |completed| task.completed() == completed)
    }

    /// Whether `task` matches the whole conjunction
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_query(task) && self.matches_completion(task)
    }

    /// The query-string pairs for `GET /tasks`. Completion filtering stays client-side
    /// and is never part of the query.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(date) = self.date {
            pairs.push(("date", date.to_string()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.as_str().to_string()));
        }
        if let Some(time_range) = self.time_range {
            pairs.push(("timeRange", time_range.as_str().to_string()));
        }
        if let Some(time_of_day) = self.time_of_day {
            pairs.push(("timeOfDay", time_of_day.as_str().to_string()));
        }
        if let Some(start_time) = self.start_time {
            pairs.push(("startTime", start_time.format("%H:%M").to_string()));
        }
        if let Some(end_time) = self.end_time {
            pairs.push(("endTime", end_time.format("%H:%M").to_string()));
        }
        pairs
    }
}
