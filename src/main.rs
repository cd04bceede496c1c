use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use cryptodash::cli::Panel;
use cryptodash::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for cryptodash::AppCommand {
    fn from(cmd: Commands) -> cryptodash::AppCommand {
        match cmd {
            Commands::Mayer => cryptodash::AppCommand::Panel(Panel::Mayer),
            Commands::FearGreed => cryptodash::AppCommand::Panel(Panel::FearGreed),
            Commands::Altseason => cryptodash::AppCommand::Panel(Panel::Altseason),
            Commands::Ticker => cryptodash::AppCommand::Panel(Panel::Ticker),
            Commands::Market => cryptodash::AppCommand::Panel(Panel::MarketCap),
            Commands::News => cryptodash::AppCommand::Panel(Panel::News),
            Commands::Dashboard => cryptodash::AppCommand::Dashboard,
            Commands::Watch => cryptodash::AppCommand::Watch,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the Mayer Multiple and its trend chart
    Mayer,
    /// Display the Fear & Greed index
    FearGreed,
    /// Display the altseason index
    Altseason,
    /// Display prices of the top assets
    Ticker,
    /// Display the global market capitalisation
    Market,
    /// Display crypto and macro news
    News,
    /// Display every panel once
    Dashboard,
    /// Keep every panel refreshed on its own interval
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => cryptodash::cli::setup::setup(),
        Some(cmd) => cryptodash::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
