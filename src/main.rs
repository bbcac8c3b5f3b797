use clap::Parser;
use colored::*;
use github_auto_star::cli::Cli;
use github_auto_star::config::Config;
use github_auto_star::github::GitHubClient;
use github_auto_star::{report, runner};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("{}", "GitHub Auto Star".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> github_auto_star::error::Result<()> {
    let config = Config::from_cli(cli)?;
    let client = GitHubClient::from_config(&config)?;
    let printer = report::event_printer();

    let summary = runner::auto_star(&config, &client, Some(&printer)).await?;
    report::print_summary(&summary);

    Ok(())
}
