//! Parsing and cleaning of GitHub repository URLs.

use crate::error::{AutoStarError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

lazy_static! {
    static ref REPO_PATTERN: Regex = Regex::new(r"github\.com/([^/]+)/([^/]+)").unwrap();
    static ref CLEAN_REPO_URL: Regex = Regex::new(r"^https://github\.com/[^/]+/[^/]+$").unwrap();
}

/// A repository identified by its owner login and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryReference {
    pub owner: String,
    pub name: String,
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Extract `owner/name` from the first `github.com/<owner>/<name>` found in `url`.
///
/// Anything after the name segment (a further path, a query) is ignored.
pub fn parse_repo_url(url: &str) -> Result<RepositoryReference> {
    let captures = REPO_PATTERN
        .captures(url)
        .ok_or_else(|| AutoStarError::InvalidRepoUrl(url.to_string()))?;

    Ok(RepositoryReference {
        owner: captures[1].to_string(),
        name: captures[2].to_string(),
    })
}

pub fn is_own_repository(owner: &str, current_user: &str) -> bool {
    owner.to_lowercase() == current_user.to_lowercase()
}

/// Reduce raw spreadsheet cells to unique `https://github.com/<owner>/<name>` URLs.
///
/// Whitespace, query strings and fragments are stripped before matching, and
/// the first occurrence of each URL keeps its position.
pub fn validate_and_clean_urls<I, S>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut valid = Vec::new();

    for url in urls {
        let cleaned = strip_query_and_fragment(url.as_ref().trim());

        if CLEAN_REPO_URL.is_match(cleaned) && seen.insert(cleaned.to_string()) {
            valid.push(cleaned.to_string());
        }
    }

    valid
}

fn strip_query_and_fragment(url: &str) -> &str {
    let url = url.split('?').next().unwrap_or(url);
    url.split('#').next().unwrap_or(url)
}
