//! Pull request creation against the GitHub REST API

use crate::config::{MigrateConfig, DEFAULT_GITHUB_API, DEFAULT_PR_BASE};
use crate::error::{MigrateError, Result};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const PR_TITLE: &str = "Automated Migration to GitHub Actions";
pub const PR_BODY: &str = "Migration generated automatically.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestRequest {
    pub title: String,
    pub head: String,
    pub base: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Opens a pull request from `head` into the configured base branch.
///
/// Nothing checks for an existing pull request, so calling this twice for the
/// same branch asks GitHub for two.
pub trait PullRequestCreator {
    fn create_pull_request(&self, repo: &str, head: &str) -> Result<PullRequest>;
}

pub struct GitHubClient {
    http_client: Client,
    api_base: String,
    token: String,
    base_branch: String,
}

impl GitHubClient {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_endpoint(DEFAULT_GITHUB_API, token, DEFAULT_PR_BASE)
    }

    pub fn with_endpoint(
        api_base: impl Into<String>,
        token: impl Into<String>,
        base_branch: impl Into<String>,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| MigrateError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
            base_branch: base_branch.into(),
        })
    }

    /// Builds a client from the run configuration. Fails when `GH_PAT` is unset.
    pub fn from_config(config: &MigrateConfig) -> Result<Self> {
        let token = config.github_token.clone().ok_or_else(|| {
            crate::config::ConfigError::ValidationFailed("GH_PAT is not set".to_string())
        })?;
        Self::with_endpoint(&config.github_api, token, &config.pr_base)
    }

    pub fn pulls_url(&self, repo: &str) -> String {
        format!("{}/repos/{}/pulls", self.api_base, repo)
    }

    pub fn request_for(&self, head: &str) -> PullRequestRequest {
        PullRequestRequest {
            title: PR_TITLE.to_string(),
            head: head.to_string(),
            base: self.base_branch.clone(),
            body: PR_BODY.to_string(),
        }
    }
}

impl PullRequestCreator for GitHubClient {
    fn create_pull_request(&self, repo: &str, head: &str) -> Result<PullRequest> {
        let url = self.pulls_url(repo);
        let payload = self.request_for(head);
        debug!(%url, head, base = %payload.base, "Opening pull request");

        let response = self
            .http_client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, concat!("actionport/", env!("CARGO_PKG_VERSION")))
            .json(&payload)
            .send()
            .map_err(|e| MigrateError::network(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| MigrateError::network(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|b| b.message)
                .unwrap_or(text);
            warn!(status = status.as_u16(), %message, "Pull request creation rejected");
            return Err(MigrateError::Network {
                message,
                status_code: Some(status.as_u16()),
            });
        }

        let pull_request: PullRequest = serde_json::from_str(&text).unwrap_or_default();
        info!(
            repo,
            head,
            url = pull_request.html_url.as_deref().unwrap_or("<unknown>"),
            "Opened pull request"
        );
        Ok(pull_request)
    }
}
