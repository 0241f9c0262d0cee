//! Miette-based error diagnostics for CLI error presentation.
//!
//! Maps crate errors to diagnostics with codes and help text. Config parse
//! errors carry the file content and a span pointing at the bad key.

use std::fs;
use std::path::Path;

use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

use crate::adapter::outbound::llm::openai::API_KEY_ENV;
use crate::domain::error::DomainError;
use crate::domain::scan::{MAX_CAPITAL, MIN_CAPITAL};
use crate::error::{ConfigError, Error};

/// Configuration file that failed to parse.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(mispriced::config::parse))]
pub struct ConfigParseError {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: Option<SourceSpan>,

    #[help]
    pub help: Option<String>,
}

/// A required secret is missing from the environment.
#[derive(Debug, Error, Diagnostic)]
#[error("{name} is not set")]
#[diagnostic(code(mispriced::credential))]
pub struct MissingCredential {
    pub name: &'static str,

    #[help]
    pub help: String,
}

impl MissingCredential {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            help: format!(
                "export {name}=<your key>, or add it to a .env file in the working directory"
            ),
        }
    }
}

/// Any other failure, with an optional suggestion.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(mispriced::error))]
pub struct CommandError {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

impl CommandError {
    fn new(message: impl Into<String>, help: Option<String>) -> Self {
        Self {
            message: message.into(),
            help,
        }
    }
}

/// Turn a command failure into a renderable report.
///
/// `config_path` is re-read for parse errors so the report can show the
/// offending line.
#[must_use]
pub fn report(err: Error, config_path: &Path) -> Report {
    match err {
        Error::Config(ConfigError::MissingField { field }) if field == API_KEY_ENV => {
            Report::new(MissingCredential::new(field))
        }
        Error::Config(ConfigError::Parse(parse)) => {
            let content = fs::read_to_string(config_path).unwrap_or_default();
            Report::new(ConfigParseError {
                message: format!("invalid config: {}", parse.message()),
                src: NamedSource::new(config_path.display().to_string(), content),
                span: parse.span().map(SourceSpan::from),
                help: Some("run `mispriced config init --force` for a documented template".into()),
            })
        }
        Error::Config(other) => Report::new(CommandError::new(
            other.to_string(),
            Some(format!(
                "check {} with `mispriced config validate`",
                config_path.display()
            )),
        )),
        Error::Domain(err @ DomainError::CapitalOutOfRange { .. }) => {
            Report::new(CommandError::new(
                err.to_string(),
                Some(format!(
                    "pass --capital between {MIN_CAPITAL} and {MAX_CAPITAL}"
                )),
            ))
        }
        Error::NoSuchResult { rank, available } => {
            let help = if available == 0 {
                "the scan returned no results; try --no-default-excludes".to_string()
            } else {
                format!("pick a rank from 1 to {available}")
            };
            Report::new(CommandError::new(
                format!("no result at rank {rank}"),
                Some(help),
            ))
        }
        err @ (Error::Http(_) | Error::Connection(_)) => Report::new(CommandError::new(
            err.to_string(),
            Some("check network access to Polymarket and the audit endpoint".into()),
        )),
        other => Report::new(CommandError::new(other.to_string(), None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn code(report: &Report) -> Option<String> {
        report.code().map(|code| code.to_string())
    }

    #[test]
    fn missing_key_gets_credential_help() {
        let err = Error::Config(ConfigError::MissingField {
            field: API_KEY_ENV,
        });
        let report = report(err, Path::new("config.toml"));

        assert_eq!(code(&report).as_deref(), Some("mispriced::credential"));
        let help = report.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("OPENAI_API_KEY"));
    }

    #[test]
    fn parse_error_points_into_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let content = "[scanner]\nevent_limit = \"many\"\n";
        fs::write(&path, content).unwrap();
        let parse = toml::from_str::<crate::infrastructure::config::settings::Config>(content)
            .unwrap_err();

        let report = report(Error::Config(ConfigError::Parse(parse)), &path);

        assert_eq!(code(&report).as_deref(), Some("mispriced::config::parse"));
        assert!(report.labels().is_some_and(|mut labels| labels.next().is_some()));
    }

    #[test]
    fn capital_error_suggests_range() {
        let err = Error::Domain(DomainError::CapitalOutOfRange {
            capital: dec!(5),
            min: MIN_CAPITAL,
            max: MAX_CAPITAL,
        });
        let report = report(err, Path::new("config.toml"));
        let help = report.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("--capital"));
    }

    #[test]
    fn bad_rank_lists_available_range() {
        let report = report(
            Error::NoSuchResult {
                rank: 9,
                available: 3,
            },
            Path::new("config.toml"),
        );
        let help = report.help().map(|h| h.to_string()).unwrap_or_default();
        assert_eq!(help, "pick a rank from 1 to 3");
    }
}
