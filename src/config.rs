use crate::cli::Cli;
use crate::delay::DelayRange;
use crate::error::{AutoStarError, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Settings for one run, fixed once the process has started.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub delay: DelayRange,
    pub input_file: PathBuf,
    pub api_base_url: Url,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let token = cli.token.trim().to_string();
        if token.is_empty() {
            return Err(AutoStarError::MissingToken);
        }

        let delay = DelayRange::new(cli.min_delay, cli.max_delay)?;

        let api_base_url = Url::parse(&cli.api_url)?;
        if api_base_url.cannot_be_a_base() {
            return Err(AutoStarError::Config(format!(
                "API URL {} cannot be used as a base URL",
                cli.api_url
            )));
        }

        Ok(Config {
            token,
            delay,
            input_file: cli.file,
            api_base_url,
            request_timeout: Duration::from_secs(cli.request_timeout),
        })
    }
}
