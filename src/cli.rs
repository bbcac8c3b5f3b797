use crate::delay::{DEFAULT_MAX_DELAY_MS, DEFAULT_MIN_DELAY_MS};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "github-auto-star")]
#[command(about = "Stars every GitHub repository listed in the first column of a spreadsheet")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// GitHub personal access token
    #[arg(long, env = "GITHUB_TOKEN", default_value = "", hide_env_values = true)]
    pub token: String,

    /// Minimum delay between repositories, in milliseconds
    #[arg(
        long,
        env = "MIN_DELAY",
        default_value_t = DEFAULT_MIN_DELAY_MS,
        value_parser = parse_min_delay
    )]
    pub min_delay: u64,

    /// Maximum delay between repositories, in milliseconds
    #[arg(
        long,
        env = "MAX_DELAY",
        default_value_t = DEFAULT_MAX_DELAY_MS,
        value_parser = parse_max_delay
    )]
    pub max_delay: u64,

    /// Spreadsheet holding repository URLs in its first column
    #[arg(long, env = "REPOS_FILE", default_value = "github 仓库合集.xlsx")]
    pub file: PathBuf,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,

    /// Per-request timeout, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout: u64,
}

fn parse_min_delay(value: &str) -> Result<u64, String> {
    parse_delay_ms(value, DEFAULT_MIN_DELAY_MS)
}

fn parse_max_delay(value: &str) -> Result<u64, String> {
    parse_delay_ms(value, DEFAULT_MAX_DELAY_MS)
}

/// Milliseconds from a flag or env var; a blank value (`MIN_DELAY=` in `.env`) means the default.
fn parse_delay_ms(value: &str, default: u64) -> Result<u64, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(default);
    }

    value
        .parse::<u64>()
        .map_err(|e| format!("expected a whole number of milliseconds, got {:?}: {}", value, e))
}
