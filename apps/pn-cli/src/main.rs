use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use pn_app::{AppConfig, AppResult, PipelineNetwork};
use pn_store::{ActivityLog, DataFile};

mod display;
mod prompt;
mod session;

use prompt::Prompter;
use session::Session;

#[derive(Parser)]
#[command(name = "pn-cli")]
#[command(about = "PipeNet - pipeline asset and network management", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./pipenet.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Activity log file, overriding the configured one
    #[arg(long, global = true)]
    log: Option<PathBuf>,
    /// Data file to load at start-up
    #[arg(long, global = true)]
    load: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Shell,
    /// Parse a data file and print a summary
    Check {
        /// Path to the data file
        data_file: PathBuf,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::discover(cli.config.as_deref())?;
    if let Some(log) = cli.log {
        config.log_file = log;
    }

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => cmd_shell(config, cli.load.as_deref()),
        Commands::Check { data_file } => cmd_check(&data_file),
    }
}

fn cmd_shell(config: AppConfig, load: Option<&Path>) -> AppResult<()> {
    let mut network = PipelineNetwork::new(config.allocator()?);
    if let Some(path) = load {
        network.load(&DataFile::new(path))?;
        let registry = network.registry();
        println!(
            "Loaded {} pipes, {} stations from {}",
            registry.pipes().len(),
            registry.stations().len(),
            path.display()
        );
    }

    let log = match ActivityLog::open(&config.log_file) {
        Ok(log) => Some(log),
        Err(err) => {
            tracing::warn!(%err, "activity log disabled");
            None
        }
    };

    let stdin = io::stdin();
    let io = Prompter::new(stdin.lock(), io::stdout());
    let mut session = Session::new(config, network, log, io);
    session.run()
}

fn cmd_check(data_file: &Path) -> AppResult<()> {
    println!("Checking data file: {}", data_file.display());
    let registry = DataFile::new(data_file).load()?;
    let in_repair = registry.pipes().iter().filter(|p| p.under_repair).count();
    println!("✓ Data file is valid");
    println!("  Pipes: {} ({} under repair)", registry.pipes().len(), in_repair);
    println!("  Stations: {}", registry.stations().len());
    Ok(())
}
