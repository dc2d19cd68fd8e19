use std::time::Duration;

use chrono::{Local, TimeZone};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;

use crate::compare::UserSet;

pub const API_BASE: &str = "https://api.github.com";
/// GitHub caps list endpoints at 100 records per page; requesting the
/// maximum keeps the request count minimal.
pub const PER_PAGE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Followers,
    Following,
}

impl RelationKind {
    pub fn label(self) -> &'static str {
        match self {
            RelationKind::Followers => "followers",
            RelationKind::Following => "following",
        }
    }
}

/// Token + account pair, resolved once at startup and reused for every
/// request.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(
        "authentication failed (HTTP 401): check that the token is valid and has read:user scope"
    )]
    Auth,
    #[error("rate limit exceeded (HTTP {status}): {detail}")]
    RateLimit { status: u16, detail: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("no GitHub username given: pass --user or set GITHUB_USERNAME")]
    MissingUser,
    #[error("no GitHub token given: pass --token or set GITHUB_TOKEN (or GITHUB_PAT)")]
    MissingToken,
}

impl FetchError {
    /// Exit code for the process when this error reaches the top level.
    pub fn exit_code(&self) -> i32 {
        match self {
            FetchError::Auth | FetchError::MissingUser | FetchError::MissingToken => 2,
            FetchError::RateLimit { .. } => 3,
            FetchError::Transport(_) | FetchError::Status { .. } => 4,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    login: String,
}

/// Profile detail from `/users/{login}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserDetails {
    pub login: String,
    pub public_repos: u32,
}

pub struct GithubClient {
    http: Client,
    creds: Credentials,
}

impl GithubClient {
    pub fn new(creds: Credentials) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("ghmutuals/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, creds })
    }

    pub fn user(&self) -> &str {
        &self.creds.user
    }

    /// Collects the complete follower or following set, paging until a
    /// short page marks the end.
    pub fn list_relation(&self, kind: RelationKind) -> Result<UserSet, FetchError> {
        drain_pages(|page| self.fetch_page(kind, page))
    }

    pub fn user_details(&self, login: &str) -> Result<UserDetails, FetchError> {
        let url = format!("{API_BASE}/users/{login}");
        let resp = self.get(&url, &[])?;
        Ok(resp.json()?)
    }

    fn fetch_page(&self, kind: RelationKind, page: u32) -> Result<Vec<String>, FetchError> {
        let url = format!("{API_BASE}/users/{}/{}", self.creds.user, kind.label());
        let resp = self.get(
            &url,
            &[("page", page.to_string()), ("per_page", PER_PAGE.to_string())],
        )?;
        let records: Vec<UserRecord> = resp.json()?;
        Ok(records.into_iter().map(|r| r.login).collect())
    }

    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Response, FetchError> {
        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("token {}", self.creds.token))
            .header(ACCEPT, "application/vnd.github.v3+json")
            .query(query)
            .send()?;
        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(FetchError::Auth),
            // GitHub signals quota exhaustion as 403 (secondary limits as 429).
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => Err(FetchError::RateLimit {
                status: resp.status().as_u16(),
                detail: rate_limit_detail(&resp),
            }),
            s if s.is_success() => Ok(resp),
            s => Err(FetchError::Status {
                status: s.as_u16(),
                url: url.to_string(),
            }),
        }
    }
}

/// Drives the page loop: requests page 1, 2, ... until a page comes back
/// shorter than `PER_PAGE`. A short (or empty) page is authoritative; the
/// `Link` header is deliberately not consulted.
pub fn drain_pages<F>(mut fetch_page: F) -> Result<UserSet, FetchError>
where
    F: FnMut(u32) -> Result<Vec<String>, FetchError>,
{
    let mut users = UserSet::new();
    let mut page = 1u32;
    loop {
        let logins = fetch_page(page)?;
        let count = logins.len();
        users.extend(logins);
        if count < PER_PAGE {
            return Ok(users);
        }
        page += 1;
    }
}

/// Fetches followers then following. Any failure aborts immediately, so a
/// rejected token on the first collection means the second request is
/// never issued and no partial result escapes.
pub fn collect_both<F>(mut list: F) -> Result<(UserSet, UserSet), FetchError>
where
    F: FnMut(RelationKind) -> Result<UserSet, FetchError>,
{
    let followers = list(RelationKind::Followers)?;
    let following = list(RelationKind::Following)?;
    Ok((followers, following))
}

fn rate_limit_detail(resp: &Response) -> String {
    let header = |name: &str| {
        resp.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let remaining = header("x-ratelimit-remaining");
    let reset = header("x-ratelimit-reset")
        .and_then(|v| v.parse::<i64>().ok())
        .and_then(|epoch| Local.timestamp_opt(epoch, 0).single())
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string());
    match (reset, remaining) {
        (Some(reset), Some(remaining)) => {
            format!("quota resets at {reset} ({remaining} requests remaining); try again later")
        }
        (Some(reset), None) => format!("quota resets at {reset}; try again later"),
        _ => "wait for the quota window to reset or check your plan limits".to_string(),
    }
}
