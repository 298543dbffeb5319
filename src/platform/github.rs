//! GitHub REST implementation of [HostingPlatform].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::{Comparison, GitRef, HostingPlatform, LatestRelease, PublishedRelease};
use crate::config::GitHubConfig;
use crate::domain::{Release, RepositoryCoordinate};
use crate::error::{DrafterError, Result};

const API_VERSION: &str = "2022-11-28";
const COMPARE_PAGE_SIZE: usize = 100;

/// HTTP client for the GitHub REST API.
///
/// No request timeout is configured; the transport's defaults apply.
pub struct GitHubClient {
    client: Client,
    api_url: Url,
}

impl GitHubClient {
    /// Creates a client from config, reading the token from the configured env var.
    pub fn from_config(config: &GitHubConfig) -> Result<Self> {
        Self::new(&config.api_url, config.token().as_deref(), &config.user_agent)
    }

    pub fn new(api_url: &str, token: Option<&str>, user_agent: &str) -> Result<Self> {
        let api_url = Url::parse(api_url)
            .map_err(|e| DrafterError::config(format!("invalid API URL '{}': {}", api_url, e)))?;
        if api_url.cannot_be_a_base() {
            return Err(DrafterError::config(format!(
                "API URL '{}' cannot be used as a base",
                api_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|_| DrafterError::config("user agent contains invalid characters"))?,
        );
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| DrafterError::config("API token contains invalid characters"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder().default_headers(headers).build()?;
        Ok(GitHubClient { client, api_url })
    }

    /// Builds `<api_url>/repos/<owner>/<repo>/<segments...>` with every segment percent-encoded.
    fn repo_url(&self, repo: &RepositoryCoordinate, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| DrafterError::config("API URL cannot be used as a base"))?
            .pop_if_empty()
            .extend(["repos", repo.owner.as_str(), repo.name.as_str()])
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, url: Url, body: &B) -> Result<T> {
        debug!(%url, "POST");
        let response = self.client.post(url).json(body).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

/// Turns a non-success response into the matching error variant.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let rate_limited = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");
    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();

    Err(classify_status(status, rate_limited, &body, &url))
}

/// Pulls the `message` field out of a GitHub error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.chars().take(200).collect())
}

/// Maps an HTTP failure status and its error body onto the error taxonomy.
///
/// A 422 is a conflict only when the body reports `already_exists`, which is how
/// GitHub rejects a duplicate release tag. Other validation failures stay `Platform`.
pub fn classify_status(status: StatusCode, rate_limited: bool, body: &str, url: &str) -> DrafterError {
    let message = format!("{} ({})", error_message(body), url);
    match status {
        StatusCode::NOT_FOUND => DrafterError::NotFound(message),
        StatusCode::CONFLICT => DrafterError::Conflict(message),
        StatusCode::UNPROCESSABLE_ENTITY if body.contains("already_exists") => {
            DrafterError::Conflict(message)
        }
        StatusCode::UNAUTHORIZED => DrafterError::Unauthorized(message),
        StatusCode::TOO_MANY_REQUESTS => DrafterError::RateLimited(message),
        StatusCode::FORBIDDEN if rate_limited => DrafterError::RateLimited(message),
        s if s.is_server_error() => DrafterError::Transient(format!("HTTP {}: {}", s, message)),
        s => DrafterError::Platform {
            status: s.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl HostingPlatform for GitHubClient {
    async fn get_latest_release(&self, repo: &RepositoryCoordinate) -> Result<LatestRelease> {
        let url = self.repo_url(repo, &["releases", "latest"])?;
        self.get(url).await
    }

    async fn get_ref(&self, repo: &RepositoryCoordinate, reference: &str) -> Result<GitRef> {
        let mut segments = vec!["git", "ref"];
        segments.extend(reference.split('/'));
        let url = self.repo_url(repo, &segments)?;
        self.get(url).await
    }

    async fn compare_commits(
        &self,
        repo: &RepositoryCoordinate,
        base: &str,
        head: &str,
    ) -> Result<Comparison> {
        let basehead = format!("{}...{}", base, head);
        let mut merged = Comparison::default();
        let mut page = 1usize;

        loop {
            let mut url = self.repo_url(repo, &["compare", basehead.as_str()])?;
            url.query_pairs_mut()
                .append_pair("per_page", &COMPARE_PAGE_SIZE.to_string())
                .append_pair("page", &page.to_string());

            let batch: Comparison = self.get(url).await?;
            let received = batch.commits.len();
            merged.total_commits = batch.total_commits;
            merged.commits.extend(batch.commits);

            if received == 0 || merged.commits.len() >= merged.total_commits {
                break;
            }
            page += 1;
        }

        Ok(merged)
    }

    async fn create_release(
        &self,
        repo: &RepositoryCoordinate,
        release: &Release,
    ) -> Result<PublishedRelease> {
        let url = self.repo_url(repo, &["releases"])?;
        self.post(url, release).await
    }

    async fn create_comment(
        &self,
        repo: &RepositoryCoordinate,
        issue_number: u64,
        body: &str,
    ) -> Result<()> {
        let number = issue_number.to_string();
        let url = self.repo_url(repo, &["issues", number.as_str(), "comments"])?;
        let _: serde_json::Value = self.post(url, &serde_json::json!({ "body": body })).await?;
        Ok(())
    }
}
