mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tally", about = "Personal task tracker", version)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a tally workspace in the current directory
    Init,

    /// Add a task to the top of the list
    Add {
        /// Task description
        text: String,

        /// Priority (high, medium, low)
        #[arg(short, long)]
        priority: Option<String>,

        /// Due date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Category label (defaults to "General")
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List tasks
    List {
        /// Case-insensitive match on text or category
        #[arg(short, long, default_value = "")]
        search: String,

        /// Filter mode (all, today, overdue, completed)
        #[arg(short, long, default_value = "all")]
        filter: String,

        /// Sort mode (manual, date, priority)
        #[arg(long, default_value = "manual")]
        sort: String,
    },

    /// Mark a task done, or reopen it
    Toggle {
        /// Task ID (full or unique prefix)
        id: String,
    },

    /// Delete a task
    Rm {
        /// Task ID (full or unique prefix)
        id: String,
    },

    /// Edit a task's fields
    Edit {
        /// Task ID (full or unique prefix)
        id: String,

        /// New description
        #[arg(short, long)]
        text: Option<String>,

        /// New priority (high, medium, low)
        #[arg(short, long)]
        priority: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// New category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show completion statistics
    Stats,

    /// Show or set the display theme
    Theme {
        /// "dark" or "light"; omit to show the current theme
        mode: Option<String>,
    },
}

/// Log to stderr so stdout stays parseable. Filter via `TALLY_LOG`.
fn init_logging() {
    let filter = EnvFilter::try_from_env("TALLY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Add {
            text,
            priority,
            date,
            category,
        } => commands::add::run(text, priority, date, category, cli.json),
        Commands::List {
            search,
            filter,
            sort,
        } => commands::list::run(search, filter, sort, cli.json),
        Commands::Toggle { id } => commands::toggle::run(id, cli.json),
        Commands::Rm { id } => commands::rm::run(id, cli.json),
        Commands::Edit {
            id,
            text,
            priority,
            date,
            category,
        } => commands::edit::run(id, text, priority, date, category, cli.json),
        Commands::Stats => commands::stats::run(cli.json),
        Commands::Theme { mode } => commands::theme::run(mode, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
