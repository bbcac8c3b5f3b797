#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use github_auto_star::github::GitHubClient;
use serde_json::json;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

pub const TOKEN: &str = "test-token";

/// A cell written into the first worksheet of a generated workbook.
pub enum Cell<'a> {
    Text(u32, u16, &'a str),
    Number(u32, u16, f64),
}

/// Write an `.xlsx` file into the temp dir and return its path.
pub fn write_workbook(name: &str, cells: &[Cell]) -> anyhow::Result<PathBuf> {
    let path = std::env::temp_dir().join(format!(
        "github-auto-star-{}-{}.xlsx",
        std::process::id(),
        name
    ));

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    for cell in cells {
        match *cell {
            Cell::Text(row, col, text) => worksheet.write_string(row, col, text)?,
            Cell::Number(row, col, number) => worksheet.write_number(row, col, number)?,
        };
    }
    workbook.save(&path)?;

    Ok(path)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub content_length: Option<String>,
}

#[derive(Debug, Default)]
struct FakeState {
    login: String,
    starred: HashSet<String>,
    put_status: Option<StatusCode>,
    calls: Vec<RecordedCall>,
}

/// Minimal stand-in for the GitHub REST API, served on an ephemeral local port.
#[derive(Clone)]
pub struct FakeGitHub {
    addr: SocketAddr,
    state: Arc<Mutex<FakeState>>,
}

impl FakeGitHub {
    pub async fn start(login: &str) -> anyhow::Result<Self> {
        let state = Arc::new(Mutex::new(FakeState {
            login: login.to_string(),
            ..Default::default()
        }));

        let app = Router::new()
            .route("/user", get(user))
            .route("/user/starred/:owner/:repo", get(check_star).put(put_star))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(FakeGitHub { addr, state })
    }

    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("valid local url")
    }

    pub fn client(&self) -> GitHubClient {
        self.client_with_token(TOKEN)
    }

    pub fn client_with_token(&self, token: &str) -> GitHubClient {
        GitHubClient::with_base_url(token.to_string(), self.url(), Duration::from_secs(5))
            .expect("Failed to create client")
    }

    /// Mark `owner/repo` as already starred.
    pub fn star(&self, full_name: &str) {
        self.state.lock().unwrap().starred.insert(full_name.to_string());
    }

    pub fn reject_puts_with(&self, status: StatusCode) {
        self.state.lock().unwrap().put_status = Some(status);
    }

    pub fn is_starred(&self, full_name: &str) -> bool {
        self.state.lock().unwrap().starred.contains(full_name)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn puts(&self) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == "PUT")
            .collect()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    let value = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    value("authorization") == Some(format!("token {}", TOKEN).as_str())
        && value("accept") == Some("application/vnd.github+json")
        && value("x-github-api-version") == Some("2022-11-28")
        && value("user-agent").map_or(false, |agent| !agent.is_empty())
}

fn record(state: &Mutex<FakeState>, method: &'static str, path: String, headers: &HeaderMap) {
    let content_length = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.lock().unwrap().calls.push(RecordedCall {
        method,
        path,
        content_length,
    });
}

fn bad_credentials() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Bad credentials" })),
    )
        .into_response()
}

async fn user(State(state): State<Arc<Mutex<FakeState>>>, headers: HeaderMap) -> Response {
    record(&state, "GET", "/user".to_string(), &headers);
    if !authorized(&headers) {
        return bad_credentials();
    }

    let login = state.lock().unwrap().login.clone();
    Json(json!({ "login": login, "id": 1, "html_url": format!("https://github.com/{}", login) }))
        .into_response()
}

async fn check_star(
    State(state): State<Arc<Mutex<FakeState>>>,
    Path((owner, repo)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let full_name = format!("{}/{}", owner, repo);
    record(&state, "GET", format!("/user/starred/{}", full_name), &headers);
    if !authorized(&headers) {
        return bad_credentials();
    }

    if state.lock().unwrap().starred.contains(&full_name) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn put_star(
    State(state): State<Arc<Mutex<FakeState>>>,
    Path((owner, repo)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let full_name = format!("{}/{}", owner, repo);
    record(&state, "PUT", format!("/user/starred/{}", full_name), &headers);
    if !authorized(&headers) {
        return bad_credentials();
    }

    let mut state = state.lock().unwrap();
    if let Some(status) = state.put_status {
        return (status, "You have triggered an abuse detection mechanism").into_response();
    }

    state.starred.insert(full_name);
    StatusCode::NO_CONTENT.into_response()
}
