use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use budget::cli::{handle_report_command, ReportCommands};
use budget::config::{paths::BudgetPaths, settings::Settings};
use budget::storage::ReportStore;

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Period budget reports from CSV transaction files",
    long_about = "budget summarizes incomes and expenses recorded in CSV report \
                  files: totals, net income, spending per category, and per-payer \
                  breakdowns for shared budgets. Reports of the same kind can be \
                  combined into one."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Report(ReportCommands),

    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

/// Initialize logging to stderr, honoring RUST_LOG
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "budget=debug" } else { "budget=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let reports_dir = settings.reports_dir(&paths);
    let paths = paths.with_reports_dir(reports_dir);
    let store = ReportStore::new(paths.clone());

    match cli.command {
        Some(Commands::Report(cmd)) => {
            handle_report_command(&store, &settings, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing budget at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!("Reports saved by name go to: {}", store.reports_dir().display());
        }
        Some(Commands::Config) => {
            println!("Budget Configuration");
            println!("====================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!("Reports directory: {}", store.reports_dir().display());
            println!("Initialized:       {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
        }
        None => {
            println!("budget - period budget reports");
            println!();
            println!("Run 'budget --help' for usage information.");
        }
    }

    Ok(())
}
