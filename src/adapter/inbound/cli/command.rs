//! Command-line interface definitions.
//!
//! Defines the CLI structure for the mispriced scanner using `clap`.
//! Every scan-driven command shares the same filter flags; the config file
//! path is global so `mispriced -c other.toml scan` and
//! `mispriced scan -c other.toml` behave the same.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::domain::scan::ScanConfig;
use crate::error::Result;
use crate::infrastructure::config::scanner::ScannerConfig;

/// Scan Polymarket for high-probability outcomes you can actually fill
#[derive(Parser, Debug)]
#[command(name = "mispriced")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the mispriced CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan open markets and rank the ones worth a look
    Scan(ScanArgs),

    /// Scan, pick a result, and have it red-teamed by an LLM
    Audit(AuditArgs),

    /// List known category labels, including ones found by a fresh scan
    Categories(FilterArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `mispriced config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate a configuration file for correctness.
    Validate,
}

/// Filters shared by every command that runs a scan.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Bet size in USD (500 to 50000) [default: from config]
    #[arg(long)]
    pub capital: Option<Decimal>,

    /// Extra category terms to exclude, comma separated
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Do not apply the configured default exclusions
    #[arg(long)]
    pub no_default_excludes: bool,
}

impl FilterArgs {
    /// Combine these flags with the configured defaults.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the capital is out of range.
    pub fn scan_config(&self, defaults: &ScannerConfig) -> Result<ScanConfig> {
        let capital = self.capital.unwrap_or(defaults.default_capital);
        let defaults = if self.no_default_excludes {
            &[][..]
        } else {
            defaults.default_excludes.as_slice()
        };
        let terms = defaults.iter().chain(self.exclude.iter());
        Ok(ScanConfig::try_new(capital, terms)?)
    }
}

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Maximum events to pull from the catalog [default: from config]
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Arguments for the `audit` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct AuditArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Audit the result at this 1-based rank instead of choosing interactively
    #[arg(long)]
    pub rank: Option<usize>,
}

/// Arguments for the `config init` subcommand.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}
