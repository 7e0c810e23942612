//! Hosting platform API client
//!
//! Minimal GitHub REST client exposing only the capabilities the metric probes
//! need: directory listings, issue data, contributor data, and raw file
//! content. Content endpoints use the raw media type so bodies arrive as plain
//! text rather than base64.

use super::RepoSpec;
use crate::Result;
use chrono::{DateTime, Utc};
use ohno::app_err;
use reqwest::header::{ACCEPT, HeaderMap};
use serde::Deserialize;

const RAW_CONTENT_TYPE: &str = "application/vnd.github.raw+json";

/// One page is enough: the correctness penalty bands top out at 60 open
/// issues, and responsiveness only looks at recent closures.
const ISSUE_PAGE_SIZE: u8 = 100;

/// Contributor window used for the bus factor concentration measure.
const CONTRIBUTOR_PAGE_SIZE: u8 = 50;

/// One entry in a repository directory listing.
#[derive(Debug, Deserialize)]
pub struct ContentEntry {
    pub name: String,
}

/// Minimal issue info with only the fields the probes need.
#[derive(Debug, Deserialize)]
pub struct Issue {
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub pull_request: Option<PullRequestMarker>,
}

impl Issue {
    /// The issues endpoint reports pull requests too; this tells them apart.
    #[must_use]
    pub const fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Marker present on issue records that are actually pull requests. Only its
/// presence matters; the payload is ignored.
#[derive(Debug, Deserialize)]
pub struct PullRequestMarker {}

/// A contributor and their commit count.
#[derive(Debug, Deserialize)]
pub struct Contributor {
    pub login: Option<String>,
    pub contributions: u64,
}

/// Classified result of a hosting API call.
///
/// `Missing` (404) is distinct from `Failed` so probes can treat an absent
/// resource as a confident observation rather than an error.
#[derive(Debug)]
pub enum Fetch<T> {
    /// The resource exists and was retrieved.
    Found(T),

    /// The resource does not exist (404).
    Missing,

    /// The request failed: transport error or unexpected HTTP status.
    Failed(ohno::AppError),
}

/// Unwrap a `Fetch` or propagate the missing/failed variant to the caller.
macro_rules! try_fetch {
    ($expr:expr) => {
        match $expr {
            Fetch::Found(data) => data,
            Fetch::Missing => return Fetch::Missing,
            Fetch::Failed(e) => return Fetch::Failed(e),
        }
    };
}

/// Hosting API client, shared read-only across all probes and repositories.
#[derive(Debug, Clone)]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Create a new hosting API client with optional authentication token.
    ///
    /// The base URL is injectable so tests can point the client at a mock
    /// server.
    pub fn new(token: Option<&str>, base_url: impl Into<String>) -> Result<Self> {
        use reqwest::header::{AUTHORIZATION, HeaderValue};

        let mut client_builder = reqwest::Client::builder().user_agent("repo-rank");

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("token {t}"))?;
            auth_val.set_sensitive(true);

            let mut headers = HeaderMap::new();
            let _ = headers.insert(AUTHORIZATION, auth_val);

            client_builder = client_builder.default_headers(headers);
        }

        Ok(Self {
            client: client_builder.build()?,
            base_url: base_url.into(),
        })
    }

    /// Get the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check that the configured token is accepted by the hosting platform.
    ///
    /// Called once before any per-repository work; a rejected token is fatal
    /// for the whole run.
    pub async fn validate_credentials(&self) -> Result<()> {
        let url = format!("{}/user", self.base_url);
        let resp = self.client.get(&url).send().await.map_err(ohno::AppError::from)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(app_err!("hosting platform rejected the access token (HTTP {status})"));
        }

        Ok(())
    }

    /// List the entries of a directory in the repository's file tree.
    ///
    /// A path that names a file rather than a directory counts as missing,
    /// since the listing the caller asked for does not exist.
    pub async fn dir_listing(&self, spec: &RepoSpec, path: &str) -> Fetch<Vec<ContentEntry>> {
        let url = format!("{}/repos/{}/{}/contents/{path}", self.base_url, spec.owner(), spec.repo());
        let resp = try_fetch!(self.get(&url, false).await);

        let body = match resp.json::<serde_json::Value>().await {
            Ok(body) => body,
            Err(e) => return Fetch::Failed(e.into()),
        };

        // A file at the path comes back as an object, not a listing.
        if !body.is_array() {
            return Fetch::Missing;
        }

        match serde_json::from_value::<Vec<ContentEntry>>(body) {
            Ok(entries) => Fetch::Found(entries),
            Err(e) => Fetch::Failed(e.into()),
        }
    }

    /// Count currently open issues (pull requests included, as the hosting
    /// platform reports them on the same endpoint). Capped at one page.
    pub async fn open_issue_count(&self, spec: &RepoSpec) -> Fetch<usize> {
        let issues = try_fetch!(self.issues(spec, "open").await);
        Fetch::Found(issues.len())
    }

    /// Fetch the most recently updated closed issues, one page.
    pub async fn closed_issues(&self, spec: &RepoSpec) -> Fetch<Vec<Issue>> {
        self.issues(spec, "closed").await
    }

    /// Fetch the repository's rendered README as plain text.
    pub async fn readme(&self, spec: &RepoSpec) -> Fetch<String> {
        let url = format!("{}/repos/{}/{}/readme", self.base_url, spec.owner(), spec.repo());
        self.text(&url).await
    }

    /// Fetch a file at the repository root as plain text.
    pub async fn file_content(&self, spec: &RepoSpec, path: &str) -> Fetch<String> {
        let url = format!("{}/repos/{}/{}/contents/{path}", self.base_url, spec.owner(), spec.repo());
        self.text(&url).await
    }

    /// Fetch the repository's top contributors with their commit counts.
    pub async fn contributors(&self, spec: &RepoSpec) -> Fetch<Vec<Contributor>> {
        let url = format!(
            "{}/repos/{}/{}/contributors?per_page={CONTRIBUTOR_PAGE_SIZE}",
            self.base_url,
            spec.owner(),
            spec.repo()
        );
        let resp = try_fetch!(self.get(&url, false).await);

        match resp.json::<Vec<Contributor>>().await {
            Ok(contributors) => Fetch::Found(contributors),
            Err(e) => Fetch::Failed(e.into()),
        }
    }

    async fn issues(&self, spec: &RepoSpec, state: &str) -> Fetch<Vec<Issue>> {
        let url = format!(
            "{}/repos/{}/{}/issues?state={state}&per_page={ISSUE_PAGE_SIZE}",
            self.base_url,
            spec.owner(),
            spec.repo()
        );
        let resp = try_fetch!(self.get(&url, false).await);

        match resp.json::<Vec<Issue>>().await {
            Ok(issues) => Fetch::Found(issues),
            Err(e) => Fetch::Failed(e.into()),
        }
    }

    async fn text(&self, url: &str) -> Fetch<String> {
        let resp = try_fetch!(self.get(url, true).await);

        match resp.text().await {
            Ok(body) => Fetch::Found(body),
            Err(e) => Fetch::Failed(e.into()),
        }
    }

    /// Make an API call and classify the result.
    async fn get(&self, url: &str, raw: bool) -> Fetch<reqwest::Response> {
        let mut request = self.client.get(url);
        if raw {
            request = request.header(ACCEPT, RAW_CONTENT_TYPE);
        }

        let resp = match request.send().await {
            Ok(r) => r,
            Err(e) => return Fetch::Failed(e.into()),
        };

        let status = resp.status();
        if status.is_success() {
            return Fetch::Found(resp);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Fetch::Missing;
        }

        Fetch::Failed(app_err!("hosting API returned HTTP {status} for {url}"))
    }
}
