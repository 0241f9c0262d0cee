//! CLI module graph and command dispatch.

pub mod audit;
pub mod categories;
pub mod command;
pub mod config;
pub mod diagnostic;
pub mod format;
pub mod output;
pub mod scan;

use crate::error::Result;
use crate::infrastructure::config::logging::LoggingConfig;
use crate::infrastructure::config::settings::Config;

use command::{Cli, Commands};

/// Run one parsed command line.
///
/// `config` commands work on the file itself, so they run before it is
/// loaded and log with default settings.
///
/// # Errors
///
/// Returns whatever the selected handler fails with.
pub async fn run(cli: Cli) -> Result<()> {
    if let Commands::Config(command) = &cli.command {
        LoggingConfig::default().init(cli.verbose);
        return config::execute(command, &cli.config);
    }

    let settings = Config::load_or_default(&cli.config)?;
    settings.logging.init(cli.verbose);

    match &cli.command {
        Commands::Scan(args) => scan::execute(&settings, args).await,
        Commands::Audit(args) => audit::execute(&settings, args).await,
        Commands::Categories(args) => categories::execute(&settings, args).await,
        Commands::Config(command) => config::execute(command, &cli.config),
    }
}
