use crate::core::logic::ViewMode;
use crate::export::ExportFormat;
use clap::{ArgGroup, Parser, Subcommand};

/// Command-line interface definition for rScorelog
/// CLI application to track season scores with SQLite
#[derive(Parser)]
#[command(
    name = "rscorelog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple score tracking CLI: record wins and losses per season and analyze streaks using SQLite",
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

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Run configuration file migrations if needed")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
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

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create, list, select, rename or delete seasons
    Season {
        #[command(subcommand)]
        action: SeasonAction,
    },

    /// Record a score event in a season
    #[command(group(
        ArgGroup::new("change")
            .required(true)
            .args(["win", "lose", "delta", "score"])
    ))]
    Add {
        #[arg(long, help = "Season id (default: current season)")]
        season: Option<String>,

        #[arg(long, help = "Record a win (streak-based delta)")]
        win: bool,

        #[arg(long, help = "Record a loss (-10)")]
        lose: bool,

        #[arg(
            long,
            allow_hyphen_values = true,
            help = "Add an explicit delta to the last score (quick: 10, 13, 16, 19, 22, -10)"
        )]
        delta: Option<i64>,

        #[arg(long, help = "Set an absolute score (0-10000)")]
        score: Option<i64>,

        #[arg(
            long,
            help = "Event time (YYYY-MM-DD HH:MM, default: now); only --score may predate the latest event"
        )]
        time: Option<String>,
    },

    /// Change the score of a recorded event
    Edit {
        /// Event id
        id: String,

        #[arg(long, help = "New score (0-10000)")]
        score: i64,

        #[arg(long, help = "Season id (default: current season)")]
        season: Option<String>,
    },

    /// Delete a recorded event by id
    Del {
        /// Event id
        id: String,

        #[arg(long, help = "Season id (default: current season)")]
        season: Option<String>,
    },

    /// List the events of a season
    List {
        #[arg(long, help = "Season id (default: current season)")]
        season: Option<String>,

        #[arg(long, value_enum, help = "View: streak, hourly or chart")]
        view: Option<ViewMode>,

        #[arg(
            long,
            help = "Chart time window: 0=1d 1=3d 2=7d 3=15d 4=30d 5=60d 6=100d 7=all"
        )]
        window: Option<usize>,
    },

    /// Show the suggested score change for the next win or loss
    Suggest {
        #[arg(long, help = "Season id (default: current season)")]
        season: Option<String>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export seasons, a single season or one of its views
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Export only this season")]
        season: Option<String>,

        #[arg(long, value_enum, help = "Export a view of the season instead of its records")]
        view: Option<ViewMode>,

        #[arg(long, help = "Chart time window index (with --view chart)")]
        window: Option<usize>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Import a CSV produced by `export`
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Target season for single-season files (default: current season)")]
        season: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum SeasonAction {
    /// Create a new season
    Add {
        name: String,

        #[arg(long, default_value_t = 0, help = "Initial score (0-10000)")]
        initial: i64,
    },

    /// List all seasons
    List,

    /// Make a season the current one
    Use { id: String },

    /// Rename a season
    Rename { id: String, name: String },

    /// Delete a season and all its events
    Del { id: String },
}
