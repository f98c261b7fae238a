// Terminal rendering of the dashboard

use crate::filter::{FilterConfig, StatusFilter};
use crate::models::{Priority, Task, TaskStatus};
use crate::stats::Stats;
use colored::{ColoredString, Colorize};
use std::fmt::Write;

pub fn banner(user_name: Option<&str>, stats: &Stats) -> String {
    let greeting = match user_name {
        Some(name) => format!("Welcome back, {}!", name),
        None => "Welcome back!".to_string(),
    };
    format!(
        "{}\nYou have {} pending tasks and {} overdue tasks.\n",
        greeting.bold(),
        stats.pending,
        stats.overdue
    )
}

pub fn stat_tiles(stats: &Stats) -> String {
    format!(
        "{} {}  {} {}  {} {}  {} {}  ({}% complete)\n",
        "Total Tasks".blue(),
        stats.total,
        "Completed".green(),
        stats.completed,
        "Pending".yellow(),
        stats.pending,
        "Overdue".red(),
        stats.overdue,
        stats.completion_rate()
    )
}

pub fn quick_filters(counts: &[(StatusFilter, usize)]) -> String {
    let mut out = format!("{}\n", "Quick Filters".bold());
    for (filter, count) in counts {
        let _ = writeln!(out, "  {:<12} {:>3}  ({})", filter.label(), count, filter.as_str());
    }
    out
}

pub fn filter_summary(config: &FilterConfig) -> String {
    let mut parts = vec![
        format!("status={}", config.status.as_str()),
        format!("priority={}", config.priority.as_str()),
    ];
    if let Some(sort_by) = config.sort_by {
        parts.push(format!("sortBy={}", sort_by.as_str()));
    }
    if let Some(range) = config.due_date {
        parts.push(format!("dueDate={}", range.as_str()));
    }
    parts.join(" ")
}

pub fn task_list(tasks: &[Task]) -> String {
    let mut out = format!("{}\n", format!("Your Tasks ({})", tasks.len()).bold());
    if tasks.is_empty() {
        out.push_str("  No tasks found\n");
        return out;
    }
    for task in tasks {
        out.push_str(&task_card(task));
    }
    out
}

pub fn task_card(task: &Task) -> String {
    let check = if task.is_completed() { "[x]" } else { "[ ]" };
    let title = if task.is_completed() {
        task.title.dimmed().strikethrough()
    } else {
        task.title.normal()
    };

    let mut out = format!("  {} {} {}\n", check, title, format!("#{}", task.id).dimmed());
    if let Some(description) = &task.description {
        let _ = writeln!(out, "      {}", description);
    }

    let mut badges = vec![priority_badge(task.priority).to_string(), status_badge(task.status).to_string()];
    badges.extend(task.tags.iter().map(|tag| format!("#{}", tag)));
    let _ = writeln!(out, "      {}", badges.join(" "));

    let mut meta = Vec::new();
    if let Some(raw) = &task.due_date {
        let shown = task
            .due()
            .map(|due| due.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|| raw.clone());
        meta.push(format!("due {}", shown));
    }
    if let Some(assignee) = &task.assignee {
        meta.push(format!("@{}", assignee));
    }
    if !meta.is_empty() {
        let _ = writeln!(out, "      {}", meta.join("  "));
    }
    out
}

fn priority_badge(priority: Priority) -> ColoredString {
    let text = format!("[{}]", priority);
    match priority {
        Priority::Low => text.green(),
        Priority::Medium => text.yellow(),
        Priority::High => text.red(),
    }
}

fn status_badge(status: TaskStatus) -> ColoredString {
    let text = format!("[{}]", status.label());
    match status {
        TaskStatus::Todo => text.white(),
        TaskStatus::InProgress => text.blue(),
        TaskStatus::Completed => text.green(),
    }
}
