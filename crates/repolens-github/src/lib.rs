//! # repolens-github
//!
//! GitHub REST implementation of [`repolens_core::MetadataProvider`].
//!
//! Repository, languages, README and the recursive file tree are fetched
//! concurrently. Repository and languages are required; README and tree
//! degrade to empty excerpts on failure.
//!
//! # Configuration
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | GITHUB_API_URL | https://api.github.com | REST API base URL |
//! | GITHUB_TOKEN | (none) | Bearer token, raises the rate limit |

pub mod client;
pub mod reference;
pub mod tree;

pub use client::{GitHubConfig, GitHubProvider};
pub use reference::RepoReference;
