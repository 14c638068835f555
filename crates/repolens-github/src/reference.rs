//! Repository URL parsing.

use std::fmt;

use reqwest::Url;

use repolens_core::{Error, Result};

/// `owner/repo` pair addressed by a repository URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoReference {
    pub owner: String,
    pub repo: String,
}

impl RepoReference {
    /// Parse `https://github.com/<owner>/<repo>[/...]`.
    ///
    /// Extra path segments are ignored and a `.git` suffix is stripped.
    pub fn parse(reference: &str) -> Result<Self> {
        let invalid = || Error::InvalidReference(reference.trim().to_string());

        let url = Url::parse(reference.trim()).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid());
        }

        let mut segments = url
            .path_segments()
            .ok_or_else(invalid)?
            .filter(|s| !s.is_empty());
        let owner = segments.next().ok_or_else(invalid)?;
        let repo = segments.next().ok_or_else(invalid)?;
        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        if repo.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl fmt::Display for RepoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
