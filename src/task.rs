//! Date-ranged to-do tasks, and the JSON shapes the `/tasks` resource speaks

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;
use crate::range::DateRange;

/// Opaque unique identifier of a task, assigned by the storage collaborator at creation
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId {
    content: String,
}

impl TaskId {
    /// Generate a random TaskId
    pub fn random() -> Self {
        Self { content: uuid::Uuid::new_v4().to_hyphenated().to_string() }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<String> for TaskId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for TaskId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}
impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}

/// Task priority
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// Task category.
///
/// The categories the planner knows about get their own variant; anything else the
/// storage collaborator hands us is kept verbatim in `Other`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Category {
    General,
    Work,
    Meeting,
    Personal,
    Urgent,
    Other(String),
}

impl Default for Category {
    fn default() -> Self {
        Category::General
    }
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::General => "general",
            Category::Work => "work",
            Category::Meeting => "meeting",
            Category::Personal => "personal",
            Category::Urgent => "urgent",
            Category::Other(other) => other,
        }
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        match name {
            "general" => Category::General,
            "work" => Category::Work,
            "meeting" => Category::Meeting,
            "personal" => Category::Personal,
            "urgent" => Category::Urgent,
            other => Category::Other(other.to_string()),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

/// Used to support serde
impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Category, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Category::from(name.as_str()))
    }
}

/// (De)serialize an optional `HH:MM` time string
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(time) => serializer.serialize_str(&time.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(text) => NaiveTime::parse_from_str(&text, "%H:%M")
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("invalid HH:MM time: {:?}", text))),
        }
    }
}

/// A user-created schedulable item with a date range, time, priority, and category.
///
/// The date range is the canonical representation: the legacy "primary date" of the wire
/// format survives only as the [`date`](Task::date) accessor, which always equals the
/// range start. `start <= end` holds after every mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TaskWire", into = "TaskWire")]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    range: DateRange,
    time: Option<NaiveTime>,
    priority: Priority,
    category: Category,
    completed: bool,
    /// The time this task was created. Assigned by the storage collaborator, immutable.
    created_at: DateTime<Utc>,
}

impl Task {
    /// Create a brand new task from a draft, filling defaults for the missing optional
    /// fields. This picks a new (random) task ID and the current creation date.
    pub fn create(draft: TaskDraft) -> Result<Self, Error> {
        if draft.title.trim().is_empty() {
            return Err(Error::InvalidRequest("title must not be empty".to_string()));
        }
        let start = draft.start_date.unwrap_or(draft.date);
        let end = draft.end_date.unwrap_or(draft.date);
        let range = DateRange::new(start, end)
            .ok_or_else(|| Error::InvalidRequest(format!("startDate {} is after endDate {}", start, end)))?;
        let time = draft.time.unwrap_or_else(|| *crate::config::DEFAULT_TASK_TIME.lock().unwrap());

        Ok(Self {
            id: TaskId::random(),
            title: draft.title,
            description: draft.description,
            range,
            time: Some(time),
            priority: draft.priority.unwrap_or_default(),
            category: draft.category.unwrap_or_default(),
            completed: false,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> &TaskId          { &self.id          }
    pub fn title(&self) -> &str          { &self.title       }
    pub fn description(&self) -> &str    { &self.description }
    pub fn range(&self) -> DateRange     { self.range        }
    pub fn time(&self) -> Option<NaiveTime>      { self.time        }
    pub fn priority(&self) -> Priority           { self.priority    }
    pub fn category(&self) -> &Category          { &self.category   }
    pub fn completed(&self) -> bool              { self.completed   }
    pub fn created_at(&self) -> &DateTime<Utc>   { &self.created_at }

    /// The legacy "primary date" of this task. Always equal to the range start.
    pub fn date(&self) -> NaiveDate {
        self.range.start()
    }

    /// Merge a partial update onto this task.
    ///
    /// The merge is atomic: in case any field is invalid (empty title, a date combination
    /// that would leave `start > end`), an error is returned and the task is untouched.
    pub fn apply(&mut self, patch: &TaskPatch) -> Result<(), Error> {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(Error::InvalidRequest("title must not be empty".to_string()));
            }
        }
        // `date` is only a fallback for the start edge, like in the legacy wire format
        let start = patch.start_date.or(patch.date).unwrap_or_else(|| self.range.start());
        let end = patch.end_date.unwrap_or_else(|| self.range.end());
        let range = DateRange::new(start, end)
            .ok_or_else(|| Error::InvalidRequest(format!("startDate {} is after endDate {}", start, end)))?;

        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        self.range = range;
        if let Some(time) = patch.time {
            self.time = Some(time);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        Ok(())
    }
}

/// Payload for creating a task (`POST /tasks`). Only `title` and `date` are required;
/// the storage collaborator fills defaults for everything else.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// The legacy primary date, used as the fallback for both range edges
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, with = "hhmm", skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl TaskDraft {
    /// A draft with only the required fields set
    pub fn new(title: String, date: NaiveDate) -> Self {
        Self {
            title,
            description: String::new(),
            date,
            start_date: None,
            end_date: None,
            time: None,
            priority: None,
            category: None,
        }
    }
}

/// A partial update (`PUT /tasks`): every `Some` field is merged onto the stored task
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub id: TaskId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, with = "hhmm", skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// An empty patch for the given task
    pub fn new(id: TaskId) -> Self {
        Self {
            id,
            title: None,
            description: None,
            date: None,
            start_date: None,
            end_date: None,
            time: None,
            priority: None,
            category: None,
            completed: None,
        }
    }

    /// The patch a whole-task drag commits: the task collapses to a single day at the
    /// drop target
    pub fn move_to(id: TaskId, day: NaiveDate) -> Self {
        let mut patch = Self::new(id);
        patch.date = Some(day);
        patch.start_date = Some(day);
        patch.end_date = Some(day);
        patch
    }

    /// The patch an edge resize commits. The legacy `date` field is kept equal to the
    /// new range start.
    pub fn resize_to(id: TaskId, range: DateRange) -> Self {
        let mut patch = Self::new(id);
        patch.date = Some(range.start());
        patch.start_date = Some(range.start());
        patch.end_date = Some(range.end());
        patch
    }

    /// The patch that (un)completes a task
    pub fn completion(id: TaskId, completed: bool) -> Self {
        let mut patch = Self::new(id);
        patch.completed = Some(completed);
        patch
    }
}

/// The JSON shape of a stored task, as the REST resource speaks it.
///
/// This still carries the legacy `date` field next to `startDate`/`endDate`: on output it
/// always equals `startDate`, on input it is the fallback for missing range edges.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskWire {
    id: TaskId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    #[serde(default, with = "hhmm")]
    time: Option<NaiveTime>,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    category: Category,
    #[serde(default)]
    completed: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<TaskWire> for Task {
    type Error = String;

    fn try_from(wire: TaskWire) -> Result<Self, String> {
        if wire.title.trim().is_empty() {
            return Err("task title must not be empty".to_string());
        }
        let start = wire.start_date.or(wire.date)
            .ok_or_else(|| "task has neither a startDate nor a date".to_string())?;
        let end = wire.end_date.or(wire.date).unwrap_or(start);
        let range = DateRange::new(start, end)
            .ok_or_else(|| format!("startDate {} is after endDate {}", start, end))?;

        Ok(Self {
            id: wire.id,
            title: wire.title,
            description: wire.description,
            range,
            time: wire.time,
            priority: wire.priority,
            category: wire.category,
            completed: wire.completed,
            created_at: wire.created_at,
        })
    }
}

impl From<Task> for TaskWire {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            date: Some(task.range.start()),
            start_date: Some(task.range.start()),
            end_date: Some(task.range.end()),
            time: task.time,
            priority: task.priority,
            category: task.category,
            completed: task.completed,
            created_at: task.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn legacy_single_date_payloads_become_single_day_ranges() {
        let json = r#"{
            "id": "1",
            "title": "Team Meeting",
            "date": "2024-01-16",
            "time": "10:30",
            "priority": "medium",
            "category": "meeting",
            "completed": false,
            "createdAt": "2024-01-10T08:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.range(), DateRange::single(day(2024, 1, 16)));
        assert_eq!(task.date(), day(2024, 1, 16));
        assert_eq!(task.time(), Some(NaiveTime::from_hms_opt(10, 30, 0).unwrap()));
        assert_eq!(task.category(), &Category::Meeting);
    }

    #[test]
    fn serialized_tasks_keep_the_legacy_date_in_sync_with_the_range_start() {
        let json = r#"{
            "id": "2",
            "title": "Project Planning",
            "startDate": "2024-01-15",
            "endDate": "2024-01-17",
            "createdAt": "2024-01-10T08:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        let value: serde_json::Value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["date"], "2024-01-15");
        assert_eq!(value["startDate"], "2024-01-15");
        assert_eq!(value["endDate"], "2024-01-17");
    }

    #[test]
    fn inverted_wire_ranges_are_rejected() {
        let json = r#"{
            "id": "3",
            "title": "Broken",
            "startDate": "2024-01-17",
            "endDate": "2024-01-15",
            "createdAt": "2024-01-10T08:00:00Z"
        }"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn unknown_categories_are_kept_verbatim() {
        let category = Category::from("gardening");
        assert_eq!(category, Category::Other("gardening".to_string()));
        assert_eq!(category.as_str(), "gardening");
    }

    #[test]
    fn apply_merges_fields_and_preserves_the_rest() {
        let mut task = Task::create(TaskDraft::new("Code Review".to_string(), day(2024, 1, 17))).unwrap();
        let mut patch = TaskPatch::new(task.id().clone());
        patch.end_date = Some(day(2024, 1, 19));
        patch.completed = Some(true);
        task.apply(&patch).unwrap();

        assert_eq!(task.range(), DateRange::new(day(2024, 1, 17), day(2024, 1, 19)).unwrap());
        assert_eq!(task.title(), "Code Review");
        assert!(task.completed());
    }

    #[test]
    fn apply_rejects_a_merge_that_would_invert_the_range() {
        let mut task = Task::create(TaskDraft::new("Planning".to_string(), day(2024, 1, 15))).unwrap();
        let before = task.clone();

        let mut patch = TaskPatch::new(task.id().clone());
        patch.start_date = Some(day(2024, 1, 20));
        patch.completed = Some(true);

        assert!(task.apply(&patch).is_err());
        // the failed merge must not have been partially applied
        assert_eq!(task, before);
    }
}
