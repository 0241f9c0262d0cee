use clap::Parser;

use mispriced::adapter::inbound::cli::command::Cli;
use mispriced::adapter::inbound::cli::output::{self, OutputConfig};
use mispriced::adapter::inbound::cli::{self, diagnostic};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(
        cli.json,
        cli.quiet,
        cli.verbose,
        &cli.color,
    ));

    let config_path = cli.config.clone();
    if let Err(err) = cli::run(cli).await {
        if output::is_json() {
            output::error(&err.to_string());
        } else {
            eprintln!("{:?}", diagnostic::report(err, &config_path));
        }
        std::process::exit(1);
    }
}
