//! Sequential starring run over a list of repository URLs.
//!
//! The runner accumulates a [`RunSummary`] and reports what it does through
//! [`RunEvent`]s; it never writes to the console itself.

use crate::config::Config;
use crate::delay::DelayRange;
use crate::error::{AutoStarError, Result};
use crate::github::StarApi;
use crate::repo_url::{
    is_own_repository, parse_repo_url, validate_and_clean_urls, RepositoryReference,
};
use crate::spreadsheet;
use crate::summary::RunSummary;
use crate::types::{ApiFailure, StarOutcome, TokenStatus};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Events emitted while a run progresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// About to handle the `index`-th (1-based) of `total` URLs.
    Progress {
        index: usize,
        total: usize,
        url: String,
    },
    InvalidUrl {
        url: String,
        error: String,
    },
    /// Owned by the authenticated user.
    Skipped { repo: RepositoryReference },
    AlreadyStarred { repo: RepositoryReference },
    Starred { repo: RepositoryReference },
    StarFailed {
        repo: RepositoryReference,
        failure: ApiFailure,
    },
    /// Pausing before the next repository.
    Waiting { delay: Duration },
}

pub type EventCallback = Box<dyn Fn(RunEvent) + Send + Sync>;

#[inline]
pub fn emit(on_event: Option<&EventCallback>, event: RunEvent) {
    if let Some(cb) = on_event {
        cb(event);
    }
}

pub struct Runner<'a, A: StarApi> {
    api: &'a A,
    delay: DelayRange,
    rng: StdRng,
    on_event: Option<&'a EventCallback>,
}

impl<'a, A: StarApi> Runner<'a, A> {
    pub fn new(api: &'a A, delay: DelayRange) -> Self {
        Runner {
            api,
            delay,
            rng: StdRng::from_entropy(),
            on_event: None,
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_events(mut self, on_event: Option<&'a EventCallback>) -> Self {
        self.on_event = on_event;
        self
    }

    /// Resolve the login behind the token, failing the run if GitHub rejects it.
    pub async fn check_token(&self) -> Result<String> {
        info!("Validating GitHub token");

        match self.api.validate_token().await {
            TokenStatus::Valid { login } => Ok(login),
            TokenStatus::Invalid(failure) => Err(AutoStarError::InvalidToken(failure.to_string())),
        }
    }

    /// Star every URL in order, one at a time, pausing between repositories.
    ///
    /// Per-repository problems are counted and never abort the run. No pause
    /// follows the last URL or a repository skipped as the user's own.
    pub async fn star_all(&mut self, current_user: &str, urls: &[String]) -> RunSummary {
        let total = urls.len();
        let mut summary = RunSummary::new(total);

        for (i, url) in urls.iter().enumerate() {
            emit(
                self.on_event,
                RunEvent::Progress {
                    index: i + 1,
                    total,
                    url: url.clone(),
                },
            );

            match parse_repo_url(url) {
                Err(e) => {
                    warn!(error = %e, "Skipping unparseable URL {}", url);
                    summary.record_failure();
                    emit(
                        self.on_event,
                        RunEvent::InvalidUrl {
                            url: url.clone(),
                            error: e.to_string(),
                        },
                    );
                }
                Ok(repo) if is_own_repository(&repo.owner, current_user) => {
                    debug!("Skipping own repository {}", repo);
                    summary.record_skip();
                    emit(self.on_event, RunEvent::Skipped { repo });
                    continue;
                }
                Ok(repo) => {
                    let outcome = self.api.star_repository(&repo.owner, &repo.name).await;
                    summary.record_star(&outcome);

                    let event = match outcome {
                        StarOutcome::AlreadyStarred => RunEvent::AlreadyStarred { repo },
                        StarOutcome::Starred => RunEvent::Starred { repo },
                        StarOutcome::Failed(failure) => RunEvent::StarFailed { repo, failure },
                    };
                    emit(self.on_event, event);
                }
            }

            if i + 1 < total {
                let delay = self.delay.sample(&mut self.rng);
                emit(self.on_event, RunEvent::Waiting { delay });
                sleep(delay).await;
            }
        }

        info!(
            success = summary.success_count,
            failed = summary.fail_count,
            skipped = summary.skip_count,
            "Run finished"
        );

        summary
    }
}

/// Clean the raw spreadsheet candidates, failing when nothing usable remains.
pub fn select_repositories(raw_urls: &[String]) -> Result<Vec<String>> {
    if raw_urls.is_empty() {
        return Err(AutoStarError::NoRepositoryUrls);
    }

    let repositories = validate_and_clean_urls(raw_urls);
    info!(
        "{} valid repository URLs out of {} candidates",
        repositories.len(),
        raw_urls.len()
    );

    if repositories.is_empty() {
        return Err(AutoStarError::NoValidRepositories);
    }

    Ok(repositories)
}

/// Validate the token, load and clean the spreadsheet, then star everything in it.
pub async fn auto_star<A: StarApi>(
    config: &Config,
    api: &A,
    on_event: Option<&EventCallback>,
) -> Result<RunSummary> {
    let mut runner = Runner::new(api, config.delay).with_events(on_event);

    let login = runner.check_token().await?;
    info!(login = %login, "Authenticated");

    let raw_urls = spreadsheet::load_repository_urls(&config.input_file)?;
    let repositories = select_repositories(&raw_urls)?;

    Ok(runner.star_all(&login, &repositories).await)
}
