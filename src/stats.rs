// Derived counts over the task sequence

use crate::filter::{FilterConfig, StatusFilter};
use crate::models::Task;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counts shown on the dashboard stat tiles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
}

impl Stats {
    pub fn compute(tasks: &[Task], now: DateTime<Utc>) -> Self {
        tasks.iter().fold(Stats::default(), |mut stats, task| {
            stats.total += 1;
            if task.is_completed() {
                stats.completed += 1;
            } else {
                stats.pending += 1;
            }
            if task.is_overdue(now) {
                stats.overdue += 1;
            }
            stats
        })
    }

    /// Completed share as a rounded percentage; 0 for an empty list
    pub fn completion_rate(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.completed as f64 / self.total as f64 * 100.0).round() as u32
    }
}

/// Number of tasks each quick filter would show
pub fn quick_filter_counts(tasks: &[Task], now: DateTime<Utc>) -> Vec<(StatusFilter, usize)> {
    StatusFilter::QUICK
        .iter()
        .map(|&status| {
            let count = FilterConfig::default().with_status(status).apply(tasks, now).len();
            (status, count)
        })
        .collect()
}
