pub mod cli;
pub mod config;
pub mod delay;
pub mod error;
pub mod github;
pub mod repo_url;
pub mod report;
pub mod runner;
pub mod spreadsheet;
pub mod summary;
pub mod types;
