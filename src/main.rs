//! FlightFinder - terminal flight search
//!
//! Without a subcommand the interactive TUI starts. Subcommands run headless
//! for scripting and tests.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use flightfinder::cli::{CliError, ConfigArgs, SearchArgs, ThemeArgs};
use flightfinder::config::Config;
use flightfinder::constants::{APP_BINARY_NAME, APP_NAME};
use flightfinder::logging::{self, LogTarget};
use flightfinder::tui;

/// FlightFinder - search flights from the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search flights and print the results
    Search(SearchArgs),
    /// Show or change the light/dark preference
    Theme(ThemeArgs),
    /// Show or edit the configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return run_interactive(cli.verbose);
    };

    if let Err(e) = logging::init(LogTarget::Stderr, cli.verbose) {
        eprintln!("Warning: {e:#}");
    }

    let result: Result<(), CliError> = match command {
        Commands::Search(args) => args.execute(),
        Commands::Theme(args) => args.execute(),
        Commands::Config(args) => args.execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e.message);
        std::process::exit(e.exit_code.code());
    }

    Ok(())
}

fn run_interactive(verbose: bool) -> Result<()> {
    if let Err(e) = logging::init(LogTarget::File, verbose) {
        eprintln!("Warning: logging disabled: {e:#}");
    }
    info!("{} v{} starting", APP_NAME, env!("CARGO_PKG_VERSION"));

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Failed to load config, using defaults: {e:#}");
            eprintln!("Check it with: {APP_BINARY_NAME} config show");
            error!("Failed to load config: {e:#}");
            Config::default()
        }
    };

    let mut app_state = tui::AppState::from_config(config)?;

    // Initialize TUI
    let mut terminal = tui::setup_terminal()?;

    // Run main TUI loop
    let result = tui::run_tui(&mut app_state, &mut terminal);

    // Restore terminal
    tui::restore_terminal(terminal)?;

    info!("{APP_NAME} exiting");
    result
}
