//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::adapter::outbound::llm::openai::OpenAi;
use crate::adapter::outbound::polymarket::client::PolymarketClient;
use crate::application::audit::Auditor;
use crate::application::cache::ScanCache;
use crate::application::scanner::Scanner;
use crate::application::session::Session;
use crate::error::Result;
use crate::infrastructure::config::scanner::{DEFAULT_EXCLUDES, SEED_CATEGORIES};
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::llm::Llm;

/// Build the scanner on top of the Polymarket client.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn build_scanner(config: &Config) -> Result<Scanner> {
    let client = Arc::new(PolymarketClient::from_config(&config.polymarket)?);
    info!(
        gamma = %config.polymarket.gamma_url,
        clob = %config.polymarket.clob_url,
        "Polymarket client ready"
    );
    Ok(Scanner::new(
        client.clone(),
        client,
        config.scanner.rules(),
        config.scanner.event_limit,
    ))
}

/// Build the forensic auditor.
///
/// # Errors
///
/// Fails with a missing-field configuration error when `OPENAI_API_KEY` is
/// not set, before any network call is made.
pub fn build_auditor(config: &Config) -> Result<Auditor> {
    let llm: Arc<dyn Llm> = Arc::new(OpenAi::from_env(&config.llm)?);
    info!(provider = llm.name(), model = %config.llm.model, "Auditor ready");
    Ok(Auditor::new(llm))
}

/// Build a session with the default label seed and a TTL scan cache.
///
/// # Errors
///
/// Same as [`build_scanner`].
pub fn build_session(config: &Config) -> Result<Session> {
    let scanner = Arc::new(build_scanner(config)?);
    let cache = Arc::new(ScanCache::new(Duration::from_secs(
        config.scanner.cache_ttl_secs,
    )));
    Ok(Session::new(scanner, cache, seed_categories()))
}

/// Labels known before any scan: the default exclusions plus a few common
/// topics.
#[must_use]
pub fn seed_categories() -> Vec<&'static str> {
    DEFAULT_EXCLUDES
        .iter()
        .chain(SEED_CATEGORIES.iter())
        .copied()
        .collect()
}
