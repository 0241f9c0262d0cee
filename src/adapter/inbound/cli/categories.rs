//! Handler for the `categories` command.

use serde_json::json;

use super::command::FilterArgs;
use super::output;
use super::scan;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Execute `categories`.
///
/// Prints the seed labels merged with every label the scan ran into, marking
/// the ones the current filters exclude.
pub async fn execute(config: &Config, args: &FilterArgs) -> Result<()> {
    let scan_config = args.scan_config(&config.scanner)?;
    let mut session = bootstrap::build_session(config)?;

    output::header(env!("CARGO_PKG_VERSION"));
    let report = scan::run(&mut session, &scan_config).await;

    let labels: Vec<(&str, bool, bool)> = session
        .categories()
        .iter()
        .map(|label| {
            let excluded = scan_config
                .exclusion_match(std::slice::from_ref(label))
                .is_some();
            (label.as_str(), excluded, report.categories.contains(label))
        })
        .collect();

    if output::is_json() {
        output::json_output(json!({
            "command": "categories",
            "categories": labels
                .iter()
                .map(|(label, excluded, seen)| json!({
                    "label": label,
                    "excluded": excluded,
                    "seen": seen,
                }))
                .collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    output::section(&format!("{} known categories", labels.len()));
    for (label, excluded, seen) in &labels {
        let line = match (excluded, seen) {
            (true, _) => format!("{} {}", output::muted(label), output::caution("(excluded)")),
            (false, true) => output::positive(label),
            (false, false) => (*label).to_string(),
        };
        output::lines(&line);
    }
    output::hint("exclude more with --exclude a,b or keep everything with --no-default-excludes");
    Ok(())
}
