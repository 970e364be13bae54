//! CLI module for site-insights.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version display
//! - Subcommand handlers
//!
//! # Usage
//!
//! ```ignore
//! use site_insights::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! runtime.block_on(run_cli_command(command, &config))?;
//! ```

pub mod args;
pub mod commands;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use commands::{
    handle_accounts_command, handle_insights_command, handle_logout_command,
    handle_prompt_command, handle_prompts_command,
};
pub use version::{handle_version_command, VERSION};

use color_eyre::Result;

use crate::config::AppConfig;

/// Run a parsed command.
///
/// # Note
///
/// The `Version` command never returns as it calls `std::process::exit(0)`.
pub async fn run_cli_command(command: CliCommand, config: &AppConfig) -> Result<()> {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliCommand::Insights { force } => handle_insights_command(config, force).await,
        CliCommand::Prompt => handle_prompt_command(config).await,
        CliCommand::Prompts => handle_prompts_command(config).await,
        CliCommand::Accounts => handle_accounts_command(config).await,
        CliCommand::Logout => handle_logout_command(config).await,
    }
}
