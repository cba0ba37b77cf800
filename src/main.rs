mod cmd;
mod ui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use leavecal::data;
use leavecal::data::LeaveStatus;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "leavecal.log";

#[derive(Parser)]
#[command(name = "leavecal", about = "leave calendar and chargeable-day calculator")]
struct Cli {
    /// Path to the data directory containing config and data files (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write sample config, leave and event files
    Init,
    /// List the public holidays of a year
    Holidays {
        /// Calendar year (default: current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Count the chargeable leave days of a date range
    Count {
        /// First day, YYYY-MM-DD
        start: String,
        /// Last day, YYYY-MM-DD
        end: String,
        /// Only the afternoon of the first day is taken
        #[arg(long)]
        start_half: bool,
        /// Only the morning of the last day is taken
        #[arg(long)]
        end_half: bool,
        /// Override the employee's work days, e.g. mon,tue,wed
        #[arg(short, long)]
        work_days: Option<String>,
    },
    /// Print a Monday-first month grid
    Month {
        #[arg(short, long)]
        year: Option<i32>,
        #[arg(short, long)]
        month: Option<u32>,
    },
    /// List leave requests and the remaining balance
    Leave {
        #[command(subcommand)]
        action: Option<LeaveAction>,
    },
    /// List events between two dates, one line per day
    Events {
        /// First day, YYYY-MM-DD (default: today)
        #[arg(long)]
        from: Option<String>,
        /// Last day, YYYY-MM-DD (default: 30 days after --from)
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Subcommand)]
enum LeaveAction {
    /// Approve a request, locking its days
    Approve { id: u32 },
    /// Reject a request
    Reject { id: u32 },
    /// Cancel a request
    Cancel { id: u32 },
}

impl LeaveAction {
    fn status_change(&self) -> (u32, LeaveStatus) {
        match *self {
            LeaveAction::Approve { id } => (id, LeaveStatus::Approved),
            LeaveAction::Reject { id } => (id, LeaveStatus::Rejected),
            LeaveAction::Cancel { id } => (id, LeaveStatus::Cancelled),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Resolve data_dir to an absolute path so file I/O works regardless of
    // later directory changes within the process.
    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    data::persistence::set_data_dir(data_dir.clone());

    init_logging(cli.command.is_none(), &data_dir)?;

    // Auto-init when the data directory is missing or empty and the user did not
    // explicitly invoke the `init` subcommand.
    let is_init_command = matches!(cli.command, Some(Commands::Init));
    if !is_init_command && dir_needs_init(&data_dir) {
        eprintln!(
            "Data directory '{}' is missing or empty; running init...",
            data_dir.display()
        );
        cmd::init::run()?;
    }

    match cli.command {
        None => cmd::root::run(),
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Holidays { year }) => cmd::holidays::run(year),
        Some(Commands::Count {
            start,
            end,
            start_half,
            end_half,
            work_days,
        }) => cmd::count::run(&start, &end, start_half, end_half, work_days.as_deref()),
        Some(Commands::Month { year, month }) => cmd::month::run(year, month),
        Some(Commands::Leave { action }) => {
            cmd::leave::run(action.as_ref().map(LeaveAction::status_change))
        }
        Some(Commands::Events { from, to }) => cmd::events::run(from.as_deref(), to.as_deref()),
    }
}

/// Installs the tracing subscriber. The terminal calendar owns stdout/stderr,
/// so in that mode log lines go to a file inside the data directory instead.
fn init_logging(to_file: bool, data_dir: &Path) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if to_file {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create dir {}", data_dir.display()))?;
        let path = data_dir.join(LOG_FILE);
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder.with_writer(Mutex::new(file)).with_ansi(false).init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
    Ok(())
}

/// Returns true when `dir` does not exist or holds no data files. The log
/// file alone does not count.
fn dir_needs_init(dir: &Path) -> bool {
    if !dir.exists() {
        return true;
    }
    dir.read_dir()
        .map(|entries| {
            !entries
                .filter_map(Result::ok)
                .any(|e| e.file_name() != LOG_FILE)
        })
        .unwrap_or(false)
}
