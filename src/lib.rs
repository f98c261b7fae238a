// Taskboard - in-memory task dashboard: filtering, sorting, stats and status changes

pub mod app;
pub mod config;
pub mod filter;
pub mod jsonl;
pub mod models;
pub mod render;
pub mod seed;
pub mod stats;
pub mod store;

// Re-export main types for convenience
pub use app::{App, Clock, Command, Outcome};
pub use config::Config;
pub use filter::{DueDateRange, FilterConfig, FilterRequest, PriorityFilter, SortBy, StatusFilter};
pub use models::{Priority, Task, TaskStatus};
pub use stats::Stats;
pub use store::Store;
