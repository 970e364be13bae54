use color_eyre::Result;
use site_insights::cli::{parse_args, run_cli_command, CliCommand};
use site_insights::cli_output::print_error;
use site_insights::config::AppConfig;
use tracing_subscriber::EnvFilter;

/// Variable holding the log filter, e.g. `site_insights=debug`
const LOG_ENV: &str = "SITE_INSIGHTS_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let command = parse_args(std::env::args());
    // Handle --version before any initialization
    if command == CliCommand::Version {
        site_insights::cli::handle_version_command();
    }

    color_eyre::install()?;
    init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            print_error(&err.to_string(), &err.user_message());
            std::process::exit(2);
        }
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_cli_command(command, &config))
}
