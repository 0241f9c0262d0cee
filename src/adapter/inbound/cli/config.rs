//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use super::command::ConfigCommand;
use super::format;
use super::output;
use crate::adapter::outbound::llm::openai::API_KEY_ENV;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Dispatch a `config` subcommand.
pub fn execute(command: &ConfigCommand, path: &Path) -> Result<()> {
    match command {
        ConfigCommand::Init(args) => execute_init(path, args.force),
        ConfigCommand::Show => execute_show(path),
        ConfigCommand::Validate => execute_validate(path),
    }
}

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} to taste", path.display()));
    output::note(&format!("2. Set {API_KEY_ENV} to enable audits"));
    output::note(&format!(
        "3. Run: mispriced scan -c {}",
        path.display()
    ));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load_or_default(path)?;
    let key_set = std::env::var(API_KEY_ENV).is_ok_and(|key| !key.trim().is_empty());

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "from_file": path.exists(),
            "api_key_set": key_set,
            "config": serde_json::to_value(&config)?,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    if path.exists() {
        output::field("Source", path.display());
    } else {
        output::field("Source", "built-in defaults");
    }

    let scanner = &config.scanner;
    output::section("Scanner");
    output::field("Event limit", scanner.event_limit);
    output::field(
        "Window",
        format!("{} to {} days", scanner.min_days, scanner.max_days),
    );
    output::field(
        "Price band",
        format!(
            "{} to {}",
            format::cents(scanner.min_price),
            format::cents(scanner.max_price)
        ),
    );
    output::field("Min fill", format::fraction_pct(scanner.min_fill));
    output::field("Max slippage", format::fraction_pct(scanner.max_slippage));
    output::field("Capital", format::usd(scanner.default_capital));
    output::field("Cache TTL", format!("{}s", scanner.cache_ttl_secs));
    if scanner.default_excludes.is_empty() {
        output::field("Excludes", "(none)");
    } else {
        output::field("Excludes", scanner.default_excludes.join(", "));
    }

    output::section("Polymarket");
    output::field("Gamma API", &config.polymarket.gamma_url);
    output::field("CLOB API", &config.polymarket.clob_url);
    output::field("Page size", config.polymarket.page_size);
    output::field("Book batch", config.polymarket.book_batch_size);
    output::field(
        "Retries",
        format!(
            "{} attempts, {}ms backoff",
            config.polymarket.http.retry_max_attempts, config.polymarket.http.retry_backoff_ms
        ),
    );

    output::section("Auditor");
    output::field("Model", &config.llm.model);
    output::field("Temperature", config.llm.temperature);
    if key_set {
        output::success(&format!("API key loaded from {API_KEY_ENV}"));
    } else {
        output::warning(&format!("{API_KEY_ENV} not set, audits are unavailable"));
    }

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());
    Config::load(path)?;
    output::success("Config file is valid");
    output::field(
        "Next",
        format!("mispriced config show -c {}", path.display()),
    );
    Ok(())
}
