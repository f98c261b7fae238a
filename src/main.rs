use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result};
use std::io;
use std::path::PathBuf;
use taskboard::{App, Clock, Config, FilterRequest, Store, jsonl, seed};
use tracing::Level;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Taskboard - in-memory task dashboard with filtering, sorting and stats")]
#[command(version)]
struct Cli {
    /// Seed tasks from a JSONL file instead of the built-in demo tasks
    #[arg(short, long, global = true)]
    tasks: Option<PathBuf>,

    /// Pin "now" (YYYY-MM-DD or RFC 3339) for due-today and overdue checks
    #[arg(long, global = true)]
    now: Option<String>,

    /// Config file (default: <config dir>/taskboard/taskboard.yml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Banner, stats, quick filters and the task list
    Dashboard,

    /// List tasks matching a filter
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print tasks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show task counts
    Stats {
        /// Print stats as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive shell reading commands from stdin
    Shell,
}

#[derive(Args)]
struct FilterArgs {
    /// all | todo | in-progress | completed | today | overdue
    #[arg(long)]
    status: Option<String>,

    /// all | low | medium | high
    #[arg(long)]
    priority: Option<String>,

    /// dueDate | priority | title | created
    #[arg(long)]
    sort_by: Option<String>,

    /// all | today | tomorrow | week | month
    #[arg(long)]
    due: Option<String>,
}

impl From<FilterArgs> for FilterRequest {
    fn from(args: FilterArgs) -> Self {
        FilterRequest {
            status: args.status,
            priority: args.priority,
            sort_by: args.sort_by,
            due_date: args.due,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref())?;
    if cli.no_color || !config.color {
        colored::control::set_override(false);
    }

    let clock = match &cli.now {
        Some(raw) => raw.parse::<Clock>().wrap_err("Invalid --now")?,
        None => Clock::System,
    };

    let tasks = match cli.tasks.as_ref().or(config.tasks_file.as_ref()) {
        Some(path) => jsonl::load_tasks(path)?,
        None => seed::demo_tasks(),
    };

    let mut app = App::new(Store::with_tasks(tasks), clock).with_config(&config);

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => {
            print!("{}", app.render_dashboard());
        }
        Commands::List { filter, json } => {
            app.set_filter(filter.into());
            let tasks = app.visible_tasks();
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                print!("{}", taskboard::render::task_list(&tasks));
            }
        }
        Commands::Stats { json } => {
            let stats = app.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", taskboard::render::stat_tiles(&stats));
            }
        }
        Commands::Shell => {
            let stdin = io::stdin();
            app.run_shell(stdin.lock(), io::stdout())?;
        }
    }

    Ok(())
}
