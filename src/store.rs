// In-memory task store owned by the application controller

use crate::models::{Task, TaskStatus};
use tracing::{debug, info};

/// Ordered task sequence held for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct Store {
    tasks: Vec<Task>,
}

impl Store {
    /// Create a store seeded with `tasks`, keeping their order
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        info!(count = tasks.len(), "Seeded task store");
        Self { tasks }
    }

    /// Borrow the current sequence
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Owned copy of the current sequence
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Replace the status of the task with `id`.
    ///
    /// Returns false when no task matches; the store is left untouched.
    pub fn set_status(&mut self, id: &str, status: TaskStatus) -> bool {
        if self.get(id).is_none() {
            debug!(id, "set_status: no task with this id");
            return false;
        }
        self.tasks = with_status(&self.tasks, id, status);
        info!(id, status = status.as_str(), "Task status changed to {}", status.label());
        true
    }

    /// Flip between completed and todo, returning the new status
    pub fn toggle_complete(&mut self, id: &str) -> Option<TaskStatus> {
        let next = match self.get(id)?.status {
            TaskStatus::Completed => TaskStatus::Todo,
            _ => TaskStatus::Completed,
        };
        self.set_status(id, next);
        Some(next)
    }
}

/// Copy of `tasks` with the status of `id` replaced
pub fn with_status(tasks: &[Task], id: &str, status: TaskStatus) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            if task.id == id {
                Task {
                    status,
                    ..task.clone()
                }
            } else {
                task.clone()
            }
        })
        .collect()
}
