use crate::config::{Config, DEFAULT_API_URL};
use crate::error::{AutoStarError, Result};
use crate::types::{ApiFailure, GitHubUser, StarOutcome, TokenStatus};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, CONTENT_LENGTH};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

const USER_AGENT: &str = "GitHub-Auto-Star-Bot/0.1.0";
const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const LOW_RATE_LIMIT: u32 = 10;

/// The GitHub operations a run depends on.
///
/// Implementations report every failure through the returned value and never
/// surface transport errors to the caller.
#[async_trait]
pub trait StarApi: Send + Sync {
    /// Check the token against `GET /user`.
    async fn validate_token(&self) -> TokenStatus;

    /// Star `owner/repo` unless the authenticated user already has.
    async fn star_repository(&self, owner: &str, repo: &str) -> StarOutcome;
}

pub struct GitHubClient {
    client: Client,
    token: String,
    base_url: Url,
}

impl GitHubClient {
    pub fn new(token: String) -> Result<Self> {
        Self::with_base_url(token, Url::parse(DEFAULT_API_URL)?, DEFAULT_TIMEOUT)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_base_url(
            config.token.clone(),
            config.api_base_url.clone(),
            config.request_timeout,
        )
    }

    pub fn with_base_url(token: String, base_url: Url, timeout: Duration) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(AutoStarError::Config(format!(
                "API URL {} cannot be used as a base URL",
                base_url
            )));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(GitHubClient {
            client,
            token,
            base_url,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in the constructor, so the path is always editable.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, ACCEPT_MEDIA_TYPE)
            .header(API_VERSION_HEADER, API_VERSION)
    }

    /// `GET /user/starred/{owner}/{repo}` answers 204 when starred and 404 when not.
    ///
    /// Anything other than 204, including a failed request, counts as not starred.
    pub async fn is_repo_starred(&self, owner: &str, repo: &str) -> bool {
        let url = self.endpoint(&["user", "starred", owner, repo]);

        match self.request(Method::GET, url).send().await {
            Ok(response) => {
                note_rate_limit(&response);
                let status = response.status();
                debug!(%status, "{}/{} star status", owner, repo);
                status == StatusCode::NO_CONTENT
            }
            Err(e) => {
                error!(error = %e, "Failed to check star status of {}/{}", owner, repo);
                false
            }
        }
    }
}

#[async_trait]
impl StarApi for GitHubClient {
    async fn validate_token(&self) -> TokenStatus {
        let url = self.endpoint(&["user"]);

        let response = match self.request(Method::GET, url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Token validation request failed");
                return TokenStatus::Invalid(ApiFailure::transport(e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(%status, "Token validation failed: {}", error_text);
            return TokenStatus::Invalid(ApiFailure::status(status.as_u16(), error_text));
        }

        match response.json::<GitHubUser>().await {
            Ok(user) => {
                info!(
                    login = %user.login,
                    id = ?user.id,
                    profile = user.html_url.as_deref().unwrap_or("-"),
                    "Token validated"
                );
                TokenStatus::Valid { login: user.login }
            }
            Err(e) => {
                error!(error = %e, "Unexpected body from GET /user");
                TokenStatus::Invalid(ApiFailure::transport(e.to_string()))
            }
        }
    }

    async fn star_repository(&self, owner: &str, repo: &str) -> StarOutcome {
        if self.is_repo_starred(owner, repo).await {
            debug!("{}/{} is already starred", owner, repo);
            return StarOutcome::AlreadyStarred;
        }

        let url = self.endpoint(&["user", "starred", owner, repo]);
        let response = self
            .request(Method::PUT, url)
            .header(CONTENT_LENGTH, "0")
            .send()
            .await;

        if let Ok(response) = &response {
            note_rate_limit(response);
        }

        match response {
            Ok(response) if response.status() == StatusCode::NO_CONTENT => {
                debug!("Starred {}/{}", owner, repo);
                StarOutcome::Starred
            }
            Ok(response) => {
                let status = response.status();
                let error_text = response.text().await.unwrap_or_default();
                warn!(%status, "Failed to star {}/{}: {}", owner, repo, error_text);
                StarOutcome::Failed(ApiFailure::status(status.as_u16(), error_text))
            }
            Err(e) => {
                error!(error = %e, "Star request for {}/{} failed", owner, repo);
                StarOutcome::Failed(ApiFailure::transport(e.to_string()))
            }
        }
    }
}

fn note_rate_limit(response: &Response) {
    if let Some(remaining) = rate_limit_remaining(response.headers()) {
        if remaining < LOW_RATE_LIMIT {
            warn!("⚠️ Rate limit low ({} remaining)", remaining);
        } else {
            debug!(remaining, "Rate limit");
        }
    }
}

fn rate_limit_remaining(headers: &HeaderMap) -> Option<u32> {
    headers
        .get("X-RateLimit-Remaining")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<u32>().ok())
}
