// Application controller: owns the store and the current filter, and turns
// user commands into store mutations or re-filtering

use crate::config::Config;
use crate::filter::{FilterConfig, FilterRequest, SortBy};
use crate::models::{Task, TaskStatus, parse_instant};
use crate::render;
use crate::stats::{Stats, quick_filter_counts};
use crate::store::Store;
use chrono::{DateTime, Utc};
use eyre::{Context, Result, eyre};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, warn};

/// Source of "now" for date-based filters and stats
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }
}

impl FromStr for Clock {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        parse_instant(s)
            .map(Clock::Fixed)
            .ok_or_else(|| eyre!("Invalid time: {} (expected YYYY-MM-DD or RFC 3339)", s))
    }
}

/// One user action from the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dashboard,
    List,
    Filter(FilterRequest),
    SetStatus { id: String, status: String },
    Toggle { id: String },
    Show { id: String },
    Stats,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = eyre::Report;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or_else(|| eyre!("Empty command"))?;
        let args: Vec<&str> = words.collect();

        match (name, args.as_slice()) {
            ("dashboard" | "d", []) => Ok(Command::Dashboard),
            ("list" | "ls", []) => Ok(Command::List),
            ("filter" | "f", pairs) => parse_filter(pairs).map(Command::Filter),
            ("status", [id, status]) => Ok(Command::SetStatus {
                id: id.to_string(),
                status: status.to_string(),
            }),
            ("toggle" | "t", [id]) => Ok(Command::Toggle { id: id.to_string() }),
            ("show", [id]) => Ok(Command::Show { id: id.to_string() }),
            ("stats", []) => Ok(Command::Stats),
            ("help" | "?", []) => Ok(Command::Help),
            ("quit" | "exit" | "q", []) => Ok(Command::Quit),
            _ => Err(eyre!("Unknown command: {} (try 'help')", line.trim())),
        }
    }
}

fn parse_filter(pairs: &[&str]) -> Result<FilterRequest> {
    let mut request = FilterRequest::default();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| eyre!("Expected key=value, got: {}", pair))?;
        let value = Some(value.to_string());
        match key {
            "status" => request.status = value,
            "priority" => request.priority = value,
            "sortBy" | "sort" => request.sort_by = value,
            "dueDate" | "due" => request.due_date = value,
            other => warn!(key = other, "Ignoring unknown filter key"),
        }
    }
    Ok(request)
}

pub const HELP: &str = "\
Commands:
  dashboard                 banner, stats, quick filters and tasks
  list                      tasks matching the current filter
  filter [key=value ...]    replace the filter (status, priority, sortBy, dueDate)
  status <id> <status>      set status: todo | in-progress | completed
  toggle <id>               flip between completed and todo
  show <id>                 show a single task
  stats                     task counts
  help                      this text
  quit                      leave
";

/// Result of handling a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

pub struct App {
    store: Store,
    filter: FilterConfig,
    clock: Clock,
    default_sort: Option<SortBy>,
    user_name: Option<String>,
}

impl App {
    pub fn new(store: Store, clock: Clock) -> Self {
        Self {
            store,
            filter: FilterConfig::default(),
            clock,
            default_sort: None,
            user_name: None,
        }
    }

    /// Apply the display and sorting preferences from `config`
    pub fn with_config(mut self, config: &Config) -> Self {
        self.user_name = config.user_name.clone();
        self.default_sort = config.default_sort;
        self.filter.sort_by = self.filter.sort_by.or(self.default_sort);
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Replace the current filter with one built from `request`
    pub fn set_filter(&mut self, request: FilterRequest) {
        let mut config = request.into_config();
        if config.sort_by.is_none() {
            config.sort_by = self.default_sort;
        }
        debug!(filter = %render::filter_summary(&config), "Filter changed");
        self.filter = config;
    }

    /// Tasks matching the current filter, in display order
    pub fn visible_tasks(&self) -> Vec<Task> {
        self.filter.apply(self.store.tasks(), self.now())
    }

    pub fn stats(&self) -> Stats {
        Stats::compute(self.store.tasks(), self.now())
    }

    pub fn render_dashboard(&self) -> String {
        self.render_dashboard_at(self.now())
    }

    /// Render every section against the same instant
    pub fn render_dashboard_at(&self, now: DateTime<Utc>) -> String {
        let tasks = self.store.tasks();
        let stats = Stats::compute(tasks, now);
        let mut out = render::banner(self.user_name.as_deref(), &stats);
        out.push('\n');
        out.push_str(&render::stat_tiles(&stats));
        out.push('\n');
        out.push_str(&render::quick_filters(&quick_filter_counts(tasks, now)));
        out.push('\n');
        out.push_str(&render::task_list(&self.filter.apply(tasks, now)));
        out
    }

    pub fn handle(&mut self, command: Command) -> Outcome {
        let text = match command {
            Command::Dashboard => self.render_dashboard(),
            Command::List => format!(
                "{}\n{}",
                render::filter_summary(&self.filter),
                render::task_list(&self.visible_tasks())
            ),
            Command::Filter(request) => {
                self.set_filter(request);
                format!(
                    "Filter: {}\n{}",
                    render::filter_summary(&self.filter),
                    render::task_list(&self.visible_tasks())
                )
            }
            Command::SetStatus { id, status } => match status.parse::<TaskStatus>() {
                Ok(status) => {
                    if self.store.set_status(&id, status) {
                        format!("Task status changed to {}\n", status.label())
                    } else {
                        format!("No task with id {}\n", id)
                    }
                }
                Err(e) => {
                    warn!(id = %id, error = %e, "Ignoring status change");
                    format!("{}\n", e)
                }
            },
            Command::Toggle { id } => match self.store.toggle_complete(&id) {
                Some(status) => format!("Task status changed to {}\n", status.label()),
                None => format!("No task with id {}\n", id),
            },
            Command::Show { id } => match self.store.get(&id) {
                Some(task) => render::task_card(task),
                None => format!("No task with id {}\n", id),
            },
            Command::Stats => render::stat_tiles(&self.stats()),
            Command::Help => HELP.to_string(),
            Command::Quit => return Outcome::Quit,
        };
        Outcome::Continue(text)
    }

    /// Read commands line by line until `quit` or end of input
    pub fn run_shell<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        write!(output, "{}", self.render_dashboard()).context("Failed to write output")?;

        for line in input.lines() {
            let line = line.context("Failed to read input")?;
            if line.trim().is_empty() {
                continue;
            }

            let text = match line.parse::<Command>() {
                Ok(command) => match self.handle(command) {
                    Outcome::Continue(text) => text,
                    Outcome::Quit => break,
                },
                Err(e) => format!("{}\n", e),
            };
            write!(output, "{}", text).context("Failed to write output")?;
            output.flush()?;
        }

        Ok(())
    }
}
