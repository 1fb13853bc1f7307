pub mod cli;
pub mod core;

use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::{debug, info};

/// A resolved command, ready to run against the optional config file.
pub enum AppCommand {
    Plan(cli::plan::PlanOptions),
    Goal(cli::goal::GoalOptions),
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Contribution planner starting...");

    // An explicit path must load; the default location is optional and the
    // commands fall back to interactive entry without it.
    let config = match config_path {
        Some(path) => Some(AppConfig::load_from_path(path)?),
        None => AppConfig::load_if_present()?,
    };
    debug!("Loaded config: {config:#?}");

    let mut prompter = cli::prompt::stdio();

    match command {
        AppCommand::Plan(options) => cli::plan::run(config.as_ref(), &options, &mut prompter),
        AppCommand::Goal(options) => cli::goal::run(config.as_ref(), &options, &mut prompter),
    }
}
