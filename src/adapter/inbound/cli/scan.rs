//! Handler for the `scan` command.

use std::sync::Arc;

use serde_json::json;
use tabled::settings::Style;
use tabled::Table;

use super::command::ScanArgs;
use super::format::{self, ResultRow};
use super::output;
use crate::application::scanner::ScanReport;
use crate::application::session::Session;
use crate::domain::scan::ScanConfig;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Execute `scan`.
pub async fn execute(config: &Config, args: &ScanArgs) -> Result<()> {
    let mut config = config.clone();
    if let Some(limit) = args.limit {
        config.scanner.event_limit = limit.max(1);
    }
    let scan = args.filter.scan_config(&config.scanner)?;
    let mut session = bootstrap::build_session(&config)?;

    output::header(env!("CARGO_PKG_VERSION"));
    let report = run(&mut session, &scan).await;
    render(&report, &scan, &config.polymarket.market_url);
    Ok(())
}

/// Scan through the session behind a spinner.
pub async fn run(session: &mut Session, scan: &ScanConfig) -> Arc<ScanReport> {
    let pb = output::spinner(&format!(
        "Scanning markets for {} bets",
        format::usd(scan.capital())
    ));
    let report = session.scan(scan).await;
    output::spinner_success(
        &pb,
        &format!(
            "Scanned {} events, {} candidates, {} ranked",
            report.events_scanned,
            report.candidates,
            report.results.len()
        ),
    );
    report
}

/// Print a report as a table, or as one JSON object in JSON mode.
pub fn render(report: &ScanReport, scan: &ScanConfig, market_base: &str) {
    let capital = scan.capital();

    if output::is_json() {
        output::json_output(json!({
            "command": "scan",
            "capital": capital,
            "excluded": scan.excluded(),
            "events_scanned": report.events_scanned,
            "candidates": report.candidates,
            "skipped": report.skipped.len(),
            "rejected": report.rejected.len(),
            "results": report
                .results
                .iter()
                .enumerate()
                .map(|(i, result)| format::result_json(i + 1, result, capital, market_base))
                .collect::<Vec<_>>(),
            "categories": report.categories,
        }));
        return;
    }

    if report.is_empty() {
        output::warning("No market passed every gate");
        output::hint("widen the search with --no-default-excludes or a smaller --capital");
        return;
    }

    output::section(&format!("Found {} opportunities", report.results.len()));
    if !output::is_quiet() {
        let rows: Vec<ResultRow> = report
            .results
            .iter()
            .enumerate()
            .map(|(i, result)| ResultRow::new(i + 1, result, capital))
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        output::lines(&table.to_string());
    }

    output::section("Links");
    for (i, result) in report.results.iter().enumerate() {
        output::note(&format!(
            "#{:<3} {}",
            i + 1,
            result.market_url(market_base)
        ));
    }

    output::section("Filtered");
    output::field("Skipped", report.skipped.len());
    output::field("Rejected", report.rejected.len());

    if !report.categories.is_empty() {
        output::section("Categories seen");
        let labels: Vec<&str> = report.categories.iter().map(String::as_str).collect();
        output::note(&labels.join(", "));
    }
}
