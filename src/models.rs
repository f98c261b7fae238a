// Data models for the task dashboard

use chrono::{DateTime, NaiveDate, Utc};
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// A single trackable work item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default = "new_task_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    pub status: TaskStatus,
    /// ISO date string, kept exactly as supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Task {
    /// Create a task with the required fields; everything else starts empty
    pub fn new(id: impl Into<String>, title: impl Into<String>, priority: Priority, status: TaskStatus) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            priority,
            status,
            due_date: None,
            assignee: None,
            tags: Vec::new(),
        }
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Parsed due instant, or None when the date is missing or malformed
    pub fn due(&self) -> Option<DateTime<Utc>> {
        let raw = self.due_date.as_deref()?;
        let parsed = parse_instant(raw);
        if parsed.is_none() {
            debug!(id = %self.id, due_date = raw, "Unparsable due date, ignoring");
        }
        parsed
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Due strictly before `now` and not yet completed
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed() && self.due().is_some_and(|due| due < now)
    }

    /// Due on the same calendar day as `now`
    pub fn is_due_on(&self, now: DateTime<Utc>) -> bool {
        self.due().is_some_and(|due| due.date_naive() == now.date_naive())
    }
}

/// Parse a date-only string as midnight UTC, or a full RFC 3339 timestamp
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.with_timezone(&Utc))
}

fn new_task_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Sort rank, higher is more urgent
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(eyre!("Unknown priority: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Human-readable form, e.g. "in progress"
    pub fn label(&self) -> String {
        self.as_str().replace('-', " ")
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in-progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(eyre!("Unknown status: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(raw: &str) -> DateTime<Utc> {
        parse_instant(raw).unwrap()
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");

        let status: TaskStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, TaskStatus::Completed);
    }

    #[test]
    fn test_status_label() {
        assert_eq!(TaskStatus::InProgress.label(), "in progress");
        assert_eq!(TaskStatus::Todo.label(), "todo");
    }

    #[test]
    fn test_priority_rank() {
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_task_deserialize_camel_case() {
        let json = r#"{"id":"1","title":"Design","priority":"high","status":"in-progress","dueDate":"2025-07-08","tags":["design"]}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "1");
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.due_date.as_deref(), Some("2025-07-08"));
        assert!(task.assignee.is_none());
    }

    #[test]
    fn test_task_without_id_gets_generated_one() {
        let json = r#"{"title":"No id","priority":"low","status":"todo"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(uuid::Uuid::parse_str(&task.id).is_ok());
        assert!(task.tags.is_empty());
    }

    #[test]
    fn test_parse_instant_formats() {
        assert_eq!(at("2025-07-09").to_rfc3339(), "2025-07-09T00:00:00+00:00");
        assert_eq!(at("2025-07-09T12:30:00+02:00").to_rfc3339(), "2025-07-09T10:30:00+00:00");
        assert!(parse_instant("").is_none());
        assert!(parse_instant("next tuesday").is_none());
    }

    #[test]
    fn test_overdue_and_due_today() {
        let now = at("2025-07-09T10:00:00Z");

        let late = Task::new("1", "Late", Priority::Low, TaskStatus::Todo).with_due_date("2025-07-08");
        assert!(late.is_overdue(now));

        let done = Task::new("2", "Done", Priority::Low, TaskStatus::Completed).with_due_date("2025-07-08");
        assert!(!done.is_overdue(now));

        // Midnight today is before 10:00, so it counts as overdue and due today
        let today = Task::new("3", "Today", Priority::Low, TaskStatus::Todo).with_due_date("2025-07-09");
        assert!(today.is_overdue(now));
        assert!(today.is_due_on(now));

        let undated = Task::new("4", "Undated", Priority::Low, TaskStatus::Todo);
        assert!(!undated.is_overdue(now));
        assert!(!undated.is_due_on(now));

        let garbage = Task::new("5", "Garbage", Priority::Low, TaskStatus::Todo).with_due_date("soon");
        assert!(!garbage.is_overdue(now));
    }
}
