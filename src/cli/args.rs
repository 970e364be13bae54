//! Command-line argument parsing for site-insights.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Fetch and print the insights table (default)
    Insights {
        /// Skip the refresh throttle
        force: bool,
    },
    /// Print today's blogging prompt card
    Prompt,
    /// Print the recent prompts list
    Prompts,
    /// Log the account and blog tree
    Accounts,
    /// Sign the default account out
    Logout,
}

/// Parse command-line arguments and return the appropriate command.
///
/// The first subcommand wins; `--version` and `--help` win anywhere.
/// Unknown arguments are ignored.
///
/// # Examples
///
/// ```
/// use site_insights::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["site-insights".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut command = None;
    let mut force = false;

    // Skip the program name
    for arg in args.skip(1) {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--force" | "-f" => force = true,
            "insights" | "prompt" | "prompts" | "accounts" | "logout" if command.is_none() => {
                command = Some(arg.clone());
            }
            _ => {}
        }
    }

    match command.as_deref() {
        Some("prompt") => CliCommand::Prompt,
        Some("prompts") => CliCommand::Prompts,
        Some("accounts") => CliCommand::Accounts,
        Some("logout") => CliCommand::Logout,
        _ => CliCommand::Insights { force },
    }
}

pub const USAGE: &str = "\
Usage: site-insights [COMMAND] [OPTIONS]

Commands:
  insights    Fetch and print the insights table (default)
  prompt      Print today's blogging prompt
  prompts     Print recent blogging prompts
  accounts    Log the accounts and blogs on this device
  logout      Sign out of the default WordPress.com account

Options:
  -f, --force     Refresh even if the last refresh was recent
  -V, --version   Print version
  -h, --help      Print this help";
