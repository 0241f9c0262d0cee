//! Handler for the `audit` command.
//!
//! With `--rank` (or without a terminal) one result is audited and the
//! command exits. Otherwise the operator picks results from a menu until
//! they quit; rescans inside the cache TTL are served from the session cache
//! and audits are never paid for twice.

use dialoguer::{theme::ColorfulTheme, Select};
use rust_decimal::Decimal;
use serde_json::json;

use super::command::AuditArgs;
use super::format;
use super::output;
use super::scan;
use crate::application::audit::Auditor;
use crate::application::session::Session;
use crate::domain::candidate::RankedResult;
use crate::domain::scan::ScanConfig;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

const MENU_TITLE_WIDTH: usize = 60;

/// Execute `audit`.
pub async fn execute(config: &Config, args: &AuditArgs) -> Result<()> {
    // Fails on a missing API key before any market data is fetched.
    let auditor = bootstrap::build_auditor(config)?;
    let scan_config = args.filter.scan_config(&config.scanner)?;
    let mut session = bootstrap::build_session(config)?;
    let market_base = config.polymarket.market_url.as_str();

    output::header(env!("CARGO_PKG_VERSION"));
    let report = scan::run(&mut session, &scan_config).await;
    if report.is_empty() {
        output::warning("No market passed every gate, nothing to audit");
        return Ok(());
    }

    if let Some(rank) = args.rank {
        return audit_rank(&mut session, &auditor, rank, &scan_config, market_base).await;
    }

    if !output::is_interactive() {
        output::note("No --rank given and no terminal attached, auditing rank 1");
        return audit_rank(&mut session, &auditor, 1, &scan_config, market_base).await;
    }

    let theme = ColorfulTheme::default();
    loop {
        let mut items = menu_items(&session, scan_config.capital());
        let results = items.len();
        items.push("Rescan".to_string());
        items.push("Quit".to_string());

        let choice = Select::with_theme(&theme)
            .with_prompt("Pick a market to red-team")
            .items(&items)
            .default(0)
            .interact_opt()?;

        match choice {
            Some(index) if index < results => {
                if let Err(err) =
                    audit_rank(&mut session, &auditor, index + 1, &scan_config, market_base).await
                {
                    output::error(&err.to_string());
                }
            }
            Some(index) if index == results => {
                let report = scan::run(&mut session, &scan_config).await;
                if report.is_empty() {
                    output::warning("No market passed every gate on rescan");
                    return Ok(());
                }
            }
            _ => return Ok(()),
        }
    }
}

fn menu_items(session: &Session, capital: Decimal) -> Vec<String> {
    session
        .results()
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let audited = if session.cached_audit(&result.candidate.token_id).is_some() {
                " [audited]"
            } else {
                ""
            };
            format!(
                "#{:<3} {} ({} {}, {}, {}){}",
                i + 1,
                format::truncate(&result.candidate.title, MENU_TITLE_WIDTH),
                result.candidate.outcome.to_uppercase(),
                format::cents(result.entry_price),
                format::signed_pct(result.roi_pct),
                result.depth_label(capital),
                audited
            )
        })
        .collect()
}

async fn audit_rank(
    session: &mut Session,
    auditor: &Auditor,
    rank: usize,
    scan_config: &ScanConfig,
    market_base: &str,
) -> Result<()> {
    let result = session.result(rank)?.clone();
    let message = if session.cached_audit(&result.candidate.token_id).is_some() {
        "Reusing the audit from earlier in this session"
    } else {
        "Forensic auditor is analyzing"
    };

    let pb = output::spinner(message);
    let text = match session.audit(auditor, rank).await {
        Ok(text) => {
            output::spinner_success(&pb, "Audit complete");
            text
        }
        Err(err) => {
            output::spinner_fail(&pb, "Audit failed");
            return Err(err);
        }
    };

    render(rank, &result, &text, scan_config.capital(), market_base);
    Ok(())
}

fn render(rank: usize, result: &RankedResult, report: &str, capital: Decimal, market_base: &str) {
    if output::is_json() {
        output::json_output(json!({
            "command": "audit",
            "result": format::result_json(rank, result, capital, market_base),
            "report": report,
        }));
        return;
    }

    output::section(&format!("#{rank} {}", result.candidate.title));
    output::field("Link", output::highlight(result.market_url(market_base)));
    output::field("Outcome", result.candidate.outcome.to_uppercase());
    output::field(
        "Entry",
        format!(
            "{} (quoted {})",
            format::cents(result.entry_price),
            format::cents(result.candidate.quoted_price)
        ),
    );
    output::field("ROI", output::positive(format::signed_pct(result.roi_pct)));
    output::field("Profit", format::usd(result.profit));
    output::field("Slippage", format::fraction_pct(result.slippage));
    output::field(
        "Depth",
        format!(
            "{} ({})",
            result.depth_label(capital),
            format::usd(result.max_liquidity)
        ),
    );
    output::field(
        "Ends",
        format!(
            "{} (in {} days)",
            result.candidate.end_label, result.candidate.days_left
        ),
    );

    output::section("Red Team Report");
    output::lines(report);
}
