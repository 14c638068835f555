//! GitHub REST metadata provider.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use repolens_core::defaults::{
    CALL_TIMEOUT_SECS, GITHUB_API_URL, README_MAX_CHARS, USER_AGENT as AGENT,
};
use repolens_core::{Error, MetadataProvider, RepositorySnapshot, Result, UpstreamKind};

use crate::reference::RepoReference;
use crate::tree::{self, TreeEntry};

const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.v3.raw";

/// GitHub client settings.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: GITHUB_API_URL.to_string(),
            token: None,
            timeout_secs: CALL_TIMEOUT_SECS,
        }
    }
}

impl GitHubConfig {
    /// Read `GITHUB_API_URL` and `GITHUB_TOKEN`.
    pub fn from_env() -> Self {
        let var = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            api_url: var("GITHUB_API_URL").unwrap_or_else(|| GITHUB_API_URL.to_string()),
            token: var("GITHUB_TOKEN"),
            ..Default::default()
        }
    }
}

// ===== API payloads =====

#[derive(Debug, Deserialize)]
struct RepoPayload {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    #[serde(default)]
    open_issues_count: u64,
    #[serde(default)]
    topics: Vec<String>,
    #[serde(default)]
    license: Option<LicensePayload>,
}

#[derive(Debug, Deserialize)]
struct LicensePayload {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TreePayload {
    #[serde(default)]
    tree: Vec<TreeEntry>,
}

/// Metadata provider backed by the GitHub REST API.
pub struct GitHubProvider {
    client: Client,
    api_url: String,
}

impl GitHubProvider {
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_MEDIA_TYPE));
        headers.insert(USER_AGENT, HeaderValue::from_static(AGENT));
        if let Some(token) = config.token.as_deref() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| Error::Config(format!("Invalid GITHUB_TOKEN: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "metadata",
            component = "github",
            api_url = %config.api_url,
            authenticated = config.token.is_some(),
            "Initializing GitHub provider"
        );

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(&GitHubConfig::from_env())
    }

    fn get(&self, repo: &RepoReference, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}/repos/{}/{}{}", self.api_url, repo.owner, repo.repo, path))
    }

    /// Map a non-success response for a required resource.
    fn status_error(status: StatusCode, repo: &RepoReference) -> Error {
        match status.as_u16() {
            404 => Error::NotFound(format!("Repository {} not found", repo)),
            403 | 429 => Error::RateLimited(format!("GitHub returned {} for {}", status, repo)),
            code => Error::Upstream {
                kind: UpstreamKind::from_status(code),
                status: Some(code),
                provider_status: None,
                message: format!("GitHub returned {} for {}", status, repo),
            },
        }
    }

    fn required(response: Response, repo: &RepoReference) -> Result<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::status_error(response.status(), repo))
        }
    }

    async fn repository(&self, repo: &RepoReference) -> Result<RepoPayload> {
        let response = Self::required(self.get(repo, "").send().await?, repo)?;
        response
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse repository: {}", e)))
    }

    async fn languages(&self, repo: &RepoReference) -> Result<BTreeMap<String, u64>> {
        let response = Self::required(self.get(repo, "/languages").send().await?, repo)?;
        response
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse languages: {}", e)))
    }

    async fn try_readme(&self, repo: &RepoReference) -> Result<String> {
        let response = Self::required(
            self.get(repo, "/readme")
                .header(ACCEPT, RAW_MEDIA_TYPE)
                .send()
                .await?,
            repo,
        )?;
        let text = response.text().await?;
        Ok(text.chars().take(README_MAX_CHARS).collect())
    }

    /// Raw README, bounded. Empty on any failure.
    async fn readme(&self, repo: &RepoReference) -> String {
        self.try_readme(repo).await.unwrap_or_else(|e| {
            debug!(repository = %repo, error = %e, "README unavailable");
            String::new()
        })
    }

    async fn try_tree(&self, repo: &RepoReference) -> Result<String> {
        let response = Self::required(
            self.get(repo, "/git/trees/HEAD")
                .query(&[("recursive", "1")])
                .send()
                .await?,
            repo,
        )?;
        let payload: TreePayload = response
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse tree: {}", e)))?;
        Ok(tree::render(&payload.tree))
    }

    /// Filtered tree excerpt. Empty on any failure.
    async fn tree(&self, repo: &RepoReference) -> String {
        self.try_tree(repo).await.unwrap_or_else(|e| {
            debug!(repository = %repo, error = %e, "Tree unavailable");
            String::new()
        })
    }
}

#[async_trait]
impl MetadataProvider for GitHubProvider {
    #[instrument(skip(self), fields(subsystem = "metadata", component = "github", op = "fetch"))]
    async fn fetch(&self, reference: &str) -> Result<RepositorySnapshot> {
        let repo = RepoReference::parse(reference)?;
        let start = Instant::now();

        let (payload, languages, readme, tree) = tokio::try_join!(
            self.repository(&repo),
            self.languages(&repo),
            async { Ok::<_, Error>(self.readme(&repo).await) },
            async { Ok::<_, Error>(self.tree(&repo).await) },
        )
        .map_err(|e| {
            warn!(repository = %repo, error = %e, "Metadata fetch failed");
            e
        })?;

        debug!(
            repository = %repo,
            languages = languages.len(),
            readme_len = readme.len(),
            tree_lines = tree.lines().count(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Fetched repository metadata"
        );

        Ok(RepositorySnapshot {
            name: payload.name,
            description: payload.description.filter(|d| !d.trim().is_empty()),
            stars: payload.stargazers_count,
            forks: payload.forks_count,
            open_issues: payload.open_issues_count,
            languages,
            topics: payload.topics,
            license: payload.license.map(|l| l.name),
            readme_excerpt: readme,
            tree_excerpt: tree,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let repo = RepoReference {
            owner: "o".to_string(),
            repo: "r".to_string(),
        };
        assert!(matches!(
            GitHubProvider::status_error(StatusCode::NOT_FOUND, &repo),
            Error::NotFound(_)
        ));
        assert!(matches!(
            GitHubProvider::status_error(StatusCode::FORBIDDEN, &repo),
            Error::RateLimited(_)
        ));
        assert!(matches!(
            GitHubProvider::status_error(StatusCode::TOO_MANY_REQUESTS, &repo),
            Error::RateLimited(_)
        ));
        match GitHubProvider::status_error(StatusCode::BAD_GATEWAY, &repo) {
            Error::Upstream { kind, status, .. } => {
                assert_eq!(kind, UpstreamKind::Unavailable);
                assert_eq!(status, Some(502));
            }
            other => panic!("Expected Upstream, got {:?}", other),
        }
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        let provider = GitHubProvider::new(&GitHubConfig {
            api_url: "http://localhost:9999/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(provider.api_url, "http://localhost:9999");
    }
}
