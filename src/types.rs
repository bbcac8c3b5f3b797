use serde::Deserialize;
use std::fmt;

// GitHub API response structures
#[derive(Debug, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub id: Option<u64>,
    pub html_url: Option<String>,
}

/// Why a GitHub call did not succeed.
///
/// `status` is `None` when no HTTP response was received at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: Option<u16>,
    pub message: String,
}

impl ApiFailure {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        ApiFailure {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ApiFailure {
            status: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "status {}: {}", status, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    Valid { login: String },
    Invalid(ApiFailure),
}

impl TokenStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, TokenStatus::Valid { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            TokenStatus::Valid { login } => Some(login),
            TokenStatus::Invalid(_) => None,
        }
    }
}

/// What happened when asked to star one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StarOutcome {
    AlreadyStarred,
    Starred,
    Failed(ApiFailure),
}

impl StarOutcome {
    pub fn result(&self) -> OperationResult {
        OperationResult::from(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationResult {
    pub success: bool,
    pub already_starred: bool,
}

impl From<&StarOutcome> for OperationResult {
    fn from(outcome: &StarOutcome) -> Self {
        match outcome {
            StarOutcome::AlreadyStarred => OperationResult {
                success: true,
                already_starred: true,
            },
            StarOutcome::Starred => OperationResult {
                success: true,
                already_starred: false,
            },
            StarOutcome::Failed(_) => OperationResult {
                success: false,
                already_starred: false,
            },
        }
    }
}
