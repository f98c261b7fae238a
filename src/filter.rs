// Filtering and sorting over a task sequence

use crate::models::{Priority, Task, TaskStatus};
use chrono::{DateTime, Utc};
use eyre::{Result, eyre};
use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::str::FromStr;
use tracing::{debug, warn};

/// Status selector, including the date-based quick filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Todo,
    InProgress,
    Completed,
    Today,
    Overdue,
    /// A status no task can have; matches nothing
    Other,
}

impl StatusFilter {
    /// Shortcuts shown with counts on the dashboard, in display order
    pub const QUICK: [StatusFilter; 5] = [
        StatusFilter::All,
        StatusFilter::Today,
        StatusFilter::Overdue,
        StatusFilter::Completed,
        StatusFilter::InProgress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Todo => "todo",
            StatusFilter::InProgress => "in-progress",
            StatusFilter::Completed => "completed",
            StatusFilter::Today => "today",
            StatusFilter::Overdue => "overdue",
            StatusFilter::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All Tasks",
            StatusFilter::Todo => "To Do",
            StatusFilter::InProgress => "In Progress",
            StatusFilter::Completed => "Completed",
            StatusFilter::Today => "Due Today",
            StatusFilter::Overdue => "Overdue",
            StatusFilter::Other => "Other",
        }
    }

    pub fn matches(&self, task: &Task, now: DateTime<Utc>) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Today => task.is_due_on(now),
            StatusFilter::Overdue => task.is_overdue(now),
            StatusFilter::Todo => task.status == TaskStatus::Todo,
            StatusFilter::InProgress => task.status == TaskStatus::InProgress,
            StatusFilter::Completed => task.status == TaskStatus::Completed,
            StatusFilter::Other => false,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(StatusFilter::All),
            "todo" => Ok(StatusFilter::Todo),
            "in-progress" => Ok(StatusFilter::InProgress),
            "completed" => Ok(StatusFilter::Completed),
            "today" => Ok(StatusFilter::Today),
            "overdue" => Ok(StatusFilter::Overdue),
            other => Err(eyre!("Unknown status filter: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
    /// A priority no task can have; matches nothing
    Other,
}

impl PriorityFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityFilter::All => "all",
            PriorityFilter::Only(priority) => priority.as_str(),
            PriorityFilter::Other => "other",
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => task.priority == *priority,
            PriorityFilter::Other => false,
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(PriorityFilter::All),
            other => other.parse().map(PriorityFilter::Only),
        }
    }
}

/// Sort keys; `Created` keeps store order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    DueDate,
    Priority,
    Title,
    Created,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::DueDate => "dueDate",
            SortBy::Priority => "priority",
            SortBy::Title => "title",
            SortBy::Created => "created",
        }
    }
}

impl FromStr for SortBy {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dueDate" | "due-date" | "due" => Ok(SortBy::DueDate),
            "priority" => Ok(SortBy::Priority),
            "title" => Ok(SortBy::Title),
            "created" => Ok(SortBy::Created),
            other => Err(eyre!("Unknown sort key: {}", other)),
        }
    }
}

/// Due date range selector. Recorded on the config and displayed, but not
/// applied when filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueDateRange {
    All,
    Today,
    Tomorrow,
    Week,
    Month,
}

impl DueDateRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            DueDateRange::All => "all",
            DueDateRange::Today => "today",
            DueDateRange::Tomorrow => "tomorrow",
            DueDateRange::Week => "week",
            DueDateRange::Month => "month",
        }
    }
}

impl FromStr for DueDateRange {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(DueDateRange::All),
            "today" => Ok(DueDateRange::Today),
            "tomorrow" => Ok(DueDateRange::Tomorrow),
            "week" => Ok(DueDateRange::Week),
            "month" => Ok(DueDateRange::Month),
            other => Err(eyre!("Unknown due date range: {}", other)),
        }
    }
}

/// Currently selected filter and sort criteria
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterConfig {
    pub status: StatusFilter,
    pub priority: PriorityFilter,
    pub sort_by: Option<SortBy>,
    pub due_date: Option<DueDateRange>,
}

impl FilterConfig {
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: PriorityFilter) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_sort(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    /// Filter then sort a copy of `tasks`; the input is never touched
    pub fn apply(&self, tasks: &[Task], now: DateTime<Utc>) -> Vec<Task> {
        let mut filtered: Vec<Task> = tasks
            .iter()
            .filter(|task| self.status.matches(task, now) && self.priority.matches(task))
            .cloned()
            .collect();

        if let Some(sort_by) = self.sort_by {
            sort_tasks(&mut filtered, sort_by);
        }

        debug!(
            status = self.status.as_str(),
            priority = self.priority.as_str(),
            sort_by = ?self.sort_by,
            input = tasks.len(),
            output = filtered.len(),
            "Applied filter"
        );

        filtered
    }
}

/// Raw filter-change request as it arrives from the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRequest {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub sort_by: Option<String>,
    pub due_date: Option<String>,
}

impl FilterRequest {
    /// Build a fresh config from this request.
    ///
    /// An unrecognized status or priority still filters, and matches no
    /// task. An unrecognized sort key or date range is dropped.
    pub fn into_config(self) -> FilterConfig {
        FilterConfig {
            status: self
                .status
                .map_or(StatusFilter::All, |raw| parse_logged("status", &raw).unwrap_or(StatusFilter::Other)),
            priority: self
                .priority
                .map_or(PriorityFilter::All, |raw| parse_logged("priority", &raw).unwrap_or(PriorityFilter::Other)),
            sort_by: self.sort_by.and_then(|raw| parse_logged("sortBy", &raw)),
            due_date: self.due_date.and_then(|raw| parse_logged("dueDate", &raw)),
        }
    }
}

fn parse_logged<T>(field: &str, raw: &str) -> Option<T>
where
    T: FromStr<Err = eyre::Report>,
{
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(field, value = raw, error = %e, "Unrecognized filter value");
            None
        }
    }
}

/// Stable sort, so ties keep store order
fn sort_tasks(tasks: &mut [Task], sort_by: SortBy) {
    match sort_by {
        // Each due date is parsed once; missing or malformed dates go last
        SortBy::DueDate => tasks.sort_by_cached_key(|task| {
            let due = task.due();
            (due.is_none(), due)
        }),
        SortBy::Priority => tasks.sort_by_key(|task| Reverse(task.priority.rank())),
        SortBy::Title => {
            let collator = TitleCollator::new();
            tasks.sort_by(|a, b| collator.compare(&a.title, &b.title));
        }
        SortBy::Created => {}
    }
}

/// Locale-aware title ordering using the CLDR root collation.
///
/// Accented letters sort next to their base letter and, for titles that
/// differ only by case, lowercase comes first. If the collation data can't
/// be loaded this degrades to a case-insensitive comparison.
pub struct TitleCollator {
    collator: Option<CollatorBorrowed<'static>>,
}

impl TitleCollator {
    pub fn new() -> Self {
        let collator = match Collator::try_new(Default::default(), CollatorOptions::default()) {
            Ok(collator) => Some(collator),
            Err(e) => {
                warn!(error = %e, "Collation data unavailable, sorting titles case-insensitively");
                None
            }
        };
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| b.cmp(a)),
        }
    }
}

impl Default for TitleCollator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_instant;

    fn now() -> DateTime<Utc> {
        parse_instant("2025-07-09T00:00:00Z").unwrap()
    }

    fn sample() -> Vec<Task> {
        vec![
            Task::new("1", "Banana", Priority::Medium, TaskStatus::Todo).with_due_date("2025-07-12"),
            Task::new("2", "Apple", Priority::High, TaskStatus::Completed).with_due_date("2025-07-01"),
            Task::new("3", "cherry", Priority::Low, TaskStatus::InProgress).with_due_date("2025-07-08"),
            Task::new("4", "Date", Priority::High, TaskStatus::Todo),
            Task::new("5", "Elder", Priority::Low, TaskStatus::Todo).with_due_date("2025-07-09T15:00:00Z"),
        ]
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_all_filter_keeps_everything_in_order() {
        let tasks = sample();
        let result = FilterConfig::default().apply(&tasks, now());
        assert_eq!(result, tasks);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let tasks = sample();
        let before = tasks.clone();
        let _ = FilterConfig::default().with_sort(SortBy::Title).apply(&tasks, now());
        assert_eq!(tasks, before);
    }

    #[test]
    fn test_overdue_filter() {
        let tasks = sample();
        let result = FilterConfig::default().with_status(StatusFilter::Overdue).apply(&tasks, now());

        // Task 2 is past due but completed, task 4 has no date
        assert_eq!(ids(&result), vec!["3"]);
        assert!(result.iter().all(|t| t.is_overdue(now()) && !t.is_completed()));
    }

    #[test]
    fn test_today_filter_compares_calendar_day() {
        let tasks = sample();
        let result = FilterConfig::default().with_status(StatusFilter::Today).apply(&tasks, now());
        assert_eq!(ids(&result), vec!["5"]);
    }

    #[test]
    fn test_exact_status_and_priority() {
        let tasks = sample();

        let todo = FilterConfig::default().with_status(StatusFilter::Todo).apply(&tasks, now());
        assert_eq!(ids(&todo), vec!["1", "4", "5"]);

        let high_todo = FilterConfig::default()
            .with_status(StatusFilter::Todo)
            .with_priority(PriorityFilter::Only(Priority::High))
            .apply(&tasks, now());
        assert_eq!(ids(&high_todo), vec!["4"]);
    }

    #[test]
    fn test_sort_by_title() {
        let tasks = vec![
            Task::new("a", "Banana", Priority::Low, TaskStatus::Todo),
            Task::new("b", "Apple", Priority::Low, TaskStatus::Todo),
            Task::new("c", "cherry", Priority::Low, TaskStatus::Todo),
        ];
        let result = FilterConfig::default().with_sort(SortBy::Title).apply(&tasks, now());
        let titles: Vec<&str> = result.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple", "Banana", "cherry"]);
    }

    #[test]
    fn test_title_collation_lowercase_first_on_case_tie() {
        let collator = TitleCollator::new();
        assert_eq!(collator.compare("apple", "Apple"), Ordering::Less);
        assert_eq!(collator.compare("Apple", "apple"), Ordering::Greater);
        assert_eq!(collator.compare("apple", "apple"), Ordering::Equal);
    }

    #[test]
    fn test_sort_by_title_accented() {
        let tasks = vec![
            Task::new("a", "Zebra", Priority::Low, TaskStatus::Todo),
            Task::new("b", "Éclair", Priority::Low, TaskStatus::Todo),
            Task::new("c", "apple", Priority::Low, TaskStatus::Todo),
            Task::new("d", "eagle", Priority::Low, TaskStatus::Todo),
        ];
        let result = FilterConfig::default().with_sort(SortBy::Title).apply(&tasks, now());
        let titles: Vec<&str> = result.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["apple", "eagle", "Éclair", "Zebra"]);
    }

    #[test]
    fn test_sort_by_priority_is_stable() {
        let tasks = sample();
        let result = FilterConfig::default().with_sort(SortBy::Priority).apply(&tasks, now());
        assert_eq!(ids(&result), vec!["2", "4", "1", "3", "5"]);
    }

    #[test]
    fn test_sort_by_due_date_puts_missing_last() {
        let mut tasks = sample();
        tasks.push(Task::new("6", "Broken", Priority::Low, TaskStatus::Todo).with_due_date("not a date"));

        let result = FilterConfig::default().with_sort(SortBy::DueDate).apply(&tasks, now());
        assert_eq!(ids(&result), vec!["2", "3", "5", "1", "4", "6"]);
    }

    #[test]
    fn test_sort_by_due_date_ties_keep_order() {
        let tasks = vec![
            Task::new("1", "A", Priority::Low, TaskStatus::Todo).with_due_date("2025-07-10"),
            Task::new("2", "B", Priority::Low, TaskStatus::Todo),
            Task::new("3", "C", Priority::Low, TaskStatus::Todo).with_due_date("2025-07-01"),
            Task::new("4", "D", Priority::Low, TaskStatus::Todo).with_due_date("2025-07-10"),
            Task::new("5", "E", Priority::Low, TaskStatus::Todo).with_due_date("garbage"),
        ];
        let result = FilterConfig::default().with_sort(SortBy::DueDate).apply(&tasks, now());
        assert_eq!(ids(&result), vec!["3", "1", "4", "2", "5"]);
    }

    #[test]
    fn test_created_sort_keeps_order() {
        let tasks = sample();
        let result = FilterConfig::default().with_sort(SortBy::Created).apply(&tasks, now());
        assert_eq!(result, tasks);
    }

    #[test]
    fn test_idempotent() {
        let tasks = sample();
        let config = FilterConfig::default()
            .with_status(StatusFilter::Todo)
            .with_sort(SortBy::DueDate);
        assert_eq!(config.apply(&tasks, now()), config.apply(&tasks, now()));
    }

    #[test]
    fn test_request_drops_unknown_sort() {
        let request = FilterRequest {
            status: Some("overdue".to_string()),
            sort_by: Some("colour".to_string()),
            due_date: Some("week".to_string()),
            ..Default::default()
        };
        let config = request.into_config();
        assert_eq!(config.status, StatusFilter::Overdue);
        assert_eq!(config.priority, PriorityFilter::All);
        assert_eq!(config.sort_by, None);
        assert_eq!(config.due_date, Some(DueDateRange::Week));
    }

    #[test]
    fn test_unknown_status_matches_nothing() {
        let tasks = sample();
        let config = FilterRequest {
            status: Some("blocked".to_string()),
            ..Default::default()
        }
        .into_config();

        assert_eq!(config.status, StatusFilter::Other);
        assert!(config.apply(&tasks, now()).is_empty());
    }

    #[test]
    fn test_unknown_priority_matches_nothing() {
        let tasks = sample();
        let config = FilterRequest {
            priority: Some("urgent".to_string()),
            ..Default::default()
        }
        .into_config();

        assert_eq!(config.priority, PriorityFilter::Other);
        assert!(config.apply(&tasks, now()).is_empty());
    }

    #[test]
    fn test_request_replaces_rather_than_merges() {
        let first = FilterRequest {
            status: Some("todo".to_string()),
            ..Default::default()
        }
        .into_config();
        assert_eq!(first.status, StatusFilter::Todo);

        let second = FilterRequest {
            priority: Some("high".to_string()),
            ..Default::default()
        }
        .into_config();
        assert_eq!(second.status, StatusFilter::All);
        assert_eq!(second.priority, PriorityFilter::Only(Priority::High));
    }

    #[test]
    fn test_parse_sort_aliases() {
        assert_eq!("dueDate".parse::<SortBy>().unwrap(), SortBy::DueDate);
        assert_eq!("due".parse::<SortBy>().unwrap(), SortBy::DueDate);
        assert!("size".parse::<SortBy>().is_err());
    }
}
