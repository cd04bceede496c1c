pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::{Panel, Services};
use crate::core::config::AppConfig;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    Panel(Panel),
    Dashboard,
    Watch,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("cryptodash starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let services = Services::from_config(&config.providers);

    match command {
        AppCommand::Panel(panel) => {
            let output = cli::render_panel(panel, &services, &config).await?;
            println!("{output}");
            Ok(())
        }
        AppCommand::Dashboard => cli::dashboard::run(&services, &config).await,
        AppCommand::Watch => cli::watch::run(Arc::new(services), Arc::new(config)).await,
    }
}
