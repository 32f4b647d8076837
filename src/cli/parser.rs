use crate::models::job::DEFAULT_JOB_ID;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rpaylog
/// CLI application to log work blocks per job and compute pay with SQLite
#[derive(Parser)]
#[command(
    name = "rpaylog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple time and pay logging CLI: track work blocks per job, weekly overtime and monthly pay",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, edit or set pay settings)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,

        #[arg(
            long = "set",
            value_name = "KEY=VALUE",
            help = "Set a value, e.g. overtime_threshold_hours=38"
        )]
        set: Vec<String>,
    },

    /// Manage jobs and their hourly rates
    Job {
        #[arg(long = "list", help = "List all jobs")]
        list: bool,

        #[arg(long = "add", value_name = "NAME", help = "Create a job with this name")]
        add: Option<String>,

        #[arg(
            long = "rate",
            requires = "add",
            help = "Hourly rate for --add (default: configured default_rate)"
        )]
        rate: Option<f64>,

        #[arg(long = "id", requires = "add", help = "Explicit job id for --add")]
        id: Option<String>,

        #[arg(long = "del", value_name = "ID", help = "Delete a job by id")]
        del: Option<String>,
    },

    /// Save a day of work
    Add {
        /// Date of the work day (YYYY-MM-DD)
        date: String,

        #[arg(long = "job", default_value = DEFAULT_JOB_ID, help = "Job id")]
        job: String,

        #[arg(
            long = "block",
            short = 'b',
            value_name = "HH:MM-HH:MM",
            help = "Work block; repeat for several blocks. Either side may be empty"
        )]
        blocks: Vec<String>,

        #[arg(long = "notes", help = "Free-text notes")]
        notes: Option<String>,
    },

    /// Delete an entry by id
    Del {
        id: i64,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List entries with hours and pay
    List {
        #[arg(
            long,
            short,
            help = "Filter by year/month/day, a custom range (START:END) or 'all'"
        )]
        period: Option<String>,

        #[arg(long = "job", help = "Only show entries for this job id")]
        job: Option<String>,

        #[arg(long = "weeks", help = "Also show the weekly overtime breakdown")]
        weeks: bool,
    },

    /// Show month totals and the month-end projection
    Summary {
        #[arg(long = "month", value_name = "YYYY-MM", help = "Month to summarise")]
        month: Option<String>,

        #[arg(
            long = "at",
            value_name = "YYYY-MM-DD",
            help = "Reference day for the projection (default: today)"
        )]
        at: Option<String>,
    },

    /// Write the whole state (jobs, entries, settings) to a JSON document
    Snapshot {
        #[arg(long, value_name = "FILE")]
        out: String,
    },

    /// Replace the whole state from a JSON document
    Restore {
        file: String,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing file")]
        force: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
