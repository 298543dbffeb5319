//! Hosting platform abstraction layer
//!
//! This module provides a trait-based abstraction over the hosting platform's
//! REST API, allowing for multiple implementations including the real GitHub
//! client and mock implementations for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [HostingPlatform] trait, which defines the
//! remote operations release-drafter needs. The concrete implementations include:
//!
//! - [github::GitHubClient]: A real implementation using `reqwest`
//! - [mock::MockPlatform]: An in-memory implementation that records calls
//! - [dry_run::DryRun]: A wrapper that forwards reads and swallows writes
//!
//! # Usage
//!
//! Pipeline code depends on the [HostingPlatform] trait rather than concrete
//! implementations, and receives the handle by reference.
//!
//! ```rust
//! # use release_drafter::platform::HostingPlatform;
//! # use release_drafter::domain::RepositoryCoordinate;
//! # async fn example<P: HostingPlatform>(platform: &P) -> release_drafter::Result<()> {
//! let repo = RepositoryCoordinate::new("octocat", "hello-world");
//! let latest = platform.get_latest_release(&repo).await?;
//! let tag = platform.get_ref(&repo, &format!("tags/{}", latest.tag_name)).await?;
//! println!("{} points at {}", latest.tag_name, tag.object.sha);
//! # Ok(())
//! # }
//! ```

pub mod dry_run;
pub mod github;
pub mod mock;

pub use dry_run::DryRun;
pub use github::GitHubClient;
pub use mock::MockPlatform;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{Commit, Release, RepositoryCoordinate};
use crate::error::Result;

/// The latest published release of a repository
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LatestRelease {
    pub tag_name: String,
}

/// A git reference and the object it points at
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitRef {
    #[serde(rename = "ref", default)]
    pub name: String,
    pub object: GitObject,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitObject {
    pub sha: String,
    /// "commit" for lightweight tags, "tag" for annotated ones
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Result of comparing two commits
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Comparison {
    #[serde(default)]
    pub commits: Vec<ComparedCommit>,
    /// Total number of commits in the range, across all pages
    #[serde(default)]
    pub total_commits: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComparedCommit {
    pub sha: String,
    #[serde(default)]
    pub html_url: String,
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommitDetail {
    #[serde(default)]
    pub message: String,
}

impl From<ComparedCommit> for Commit {
    fn from(c: ComparedCommit) -> Self {
        Commit::new(c.sha, c.commit.message, c.html_url)
    }
}

/// What the platform reports back after creating a release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct PublishedRelease {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub html_url: String,
}

/// Remote operations the release pipeline and issue responder rely on
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync`; concurrent invocations share one handle.
///
/// ## Error Handling
///
/// Implementations map transport and HTTP failures onto [crate::error::DrafterError].
/// A missing resource must be reported as `DrafterError::NotFound`, since the
/// release resolver treats exactly that variant as "no previous release".
#[async_trait]
pub trait HostingPlatform: Send + Sync {
    /// Get the latest published release
    ///
    /// # Returns
    /// * `Ok(LatestRelease)` - The release's tag name
    /// * `Err(NotFound)` - The repository has no published release yet
    async fn get_latest_release(&self, repo: &RepositoryCoordinate) -> Result<LatestRelease>;

    /// Look up a reference such as `tags/v1.0.0`
    async fn get_ref(&self, repo: &RepositoryCoordinate, reference: &str) -> Result<GitRef>;

    /// Compare two commits
    ///
    /// Returns the commits reachable from `head` but not from `base`,
    /// oldest first. `base` itself is never included.
    async fn compare_commits(
        &self,
        repo: &RepositoryCoordinate,
        base: &str,
        head: &str,
    ) -> Result<Comparison>;

    /// Create a release
    ///
    /// No existence check is made; a duplicate tag is up to the platform.
    async fn create_release(
        &self,
        repo: &RepositoryCoordinate,
        release: &Release,
    ) -> Result<PublishedRelease>;

    /// Post a comment on an issue
    async fn create_comment(
        &self,
        repo: &RepositoryCoordinate,
        issue_number: u64,
        body: &str,
    ) -> Result<()>;
}
