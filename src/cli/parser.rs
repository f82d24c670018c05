use crate::export::ExportFormat;
use crate::models::SelectionMode;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for jcrtracker
/// CLI application to keep a Job Card Register in SQLite
#[derive(Parser)]
#[command(
    name = "jcr",
    version = env!("CARGO_PKG_VERSION"),
    about = "Job Card Register: create, update, view and summarize job cards stored in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Workflow session to act on; each session keeps its own flow state
    #[arg(global = true, long = "session", default_value = "default")]
    pub session: String,

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

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use")]
        editor: Option<String>,
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

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Add new entries: start → mode → submit
    Create {
        #[command(subcommand)]
        action: CreateCmd,
    },

    /// Update existing entries: start → mode → choose → submit
    Update {
        #[command(subcommand)]
        action: UpdateCmd,
    },

    /// Inspect or abandon the current workflow session
    Session {
        #[command(subcommand)]
        action: SessionCmd,
    },

    /// View entries, optionally filtered, with per-column analysis
    View {
        #[arg(
            long = "filter",
            value_name = "COLUMN=VALUE",
            help = "Case-insensitive substring filter (repeatable)"
        )]
        filter: Vec<String>,

        #[arg(long = "column", help = "Show the value distribution of a column")]
        column: Option<String>,

        #[arg(
            long = "refresh",
            help = "Re-read the register before rendering (each run already starts from a fresh read)"
        )]
        refresh: bool,
    },

    /// Project, status, workload and timeline summaries
    Insights,

    /// Export entries to CSV or JSON
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "filter", value_name = "COLUMN=VALUE")]
        filter: Vec<String>,

        #[arg(long, short = 'f', help = "Overwrite an existing file")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum CreateCmd {
    /// Enter the create flow (resets it to the Select step)
    Start {
        #[arg(long, value_enum, help = "Also confirm the selection mode")]
        mode: Option<SelectionMode>,
    },

    /// Confirm Team or Individual and move to the form
    Mode {
        #[arg(value_enum)]
        mode: SelectionMode,
    },

    /// List known teams, employees and projects
    Options,

    /// Submit the form; one entry per member in Team mode
    Submit(CreateArgs),

    /// Return to the previous step
    Back,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Job date (DD/MM/YYYY or YYYY-MM-DD), default tomorrow
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub team: String,

    /// Team member (repeatable, Team mode)
    #[arg(long = "member", conflicts_with = "employee")]
    pub members: Vec<String>,

    /// Employee (Individual mode)
    #[arg(long)]
    pub employee: Option<String>,

    /// Y = present, N = absent
    #[arg(long, default_value = "Y")]
    pub presence: String,

    #[arg(long)]
    pub project: String,

    #[arg(long = "phase-space", default_value = "")]
    pub phase_space: String,

    #[arg(long, default_value = "")]
    pub product: String,

    #[arg(long = "part-number", default_value = "")]
    pub part_number: String,

    #[arg(long = "part-name", default_value = "")]
    pub part_name: String,

    #[arg(long, default_value = "")]
    pub task: String,

    /// Task quantity (0-100)
    #[arg(long = "qty", default_value_t = 0)]
    pub task_quantity: u8,

    /// Start time (HH:MM), default from configuration
    #[arg(long)]
    pub start: Option<String>,

    /// Finish time (HH:MM), default from configuration
    #[arg(long)]
    pub finish: Option<String>,

    /// TBS, WIP, DONE or HOLD
    #[arg(long, default_value = "TBS")]
    pub status: String,

    #[arg(long, default_value = "")]
    pub remarks: String,
}

#[derive(Subcommand)]
pub enum UpdateCmd {
    /// Enter the update flow (resets it to the Select step)
    Start {
        #[arg(long, value_enum, help = "Also confirm the selection mode")]
        mode: Option<SelectionMode>,
    },

    /// Confirm Team or Individual and move to entry selection
    Mode {
        #[arg(value_enum)]
        mode: SelectionMode,
    },

    /// List what can be chosen, narrowed by the given values
    Candidates {
        #[arg(long)]
        team: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(long, conflicts_with_all = ["team", "date"])]
        employee: Option<String>,
    },

    /// Choose the entries to update
    Choose {
        #[arg(long, requires = "date", conflicts_with = "uid")]
        team: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(long = "member")]
        members: Vec<String>,

        /// Entry UID (Individual mode)
        #[arg(long)]
        uid: Option<String>,
    },

    /// Write Finish_Time, Status and Remarks to the chosen entries
    Submit {
        /// New finish time (HH:MM), default from configuration
        #[arg(long)]
        finish: Option<String>,

        #[arg(long, default_value = "TBS")]
        status: String,

        #[arg(long, default_value = "")]
        remarks: String,
    },

    /// Return to the previous step
    Back,
}

#[derive(Subcommand)]
pub enum SessionCmd {
    /// Show flow, step and captured selection
    Show,
    /// Abandon the session
    Cancel,
    /// List stored sessions
    List,
}
