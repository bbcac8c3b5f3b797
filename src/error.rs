use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoStarError {
    #[error("GitHub token is missing: set GITHUB_TOKEN or pass --token")]
    MissingToken,

    #[error("GitHub token is invalid: {0}")]
    InvalidToken(String),

    #[error("Invalid repository URL: {0}")]
    InvalidRepoUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("No repository URLs found in the spreadsheet")]
    NoRepositoryUrls,

    #[error("No valid GitHub repository URLs left after cleaning")]
    NoValidRepositories,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, AutoStarError>;
