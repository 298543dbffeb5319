use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::{
    CommitDetail, ComparedCommit, Comparison, GitObject, GitRef, HostingPlatform, LatestRelease,
    PublishedRelease,
};
use crate::domain::{Release, RepositoryCoordinate};
use crate::error::{DrafterError, Result};

/// A recorded call against the mock platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    GetLatestRelease {
        repository: String,
    },
    GetRef {
        repository: String,
        reference: String,
    },
    CompareCommits {
        repository: String,
        base: String,
        head: String,
    },
    CreateRelease {
        repository: String,
        release: Release,
    },
    CreateComment {
        repository: String,
        issue_number: u64,
        body: String,
    },
}

/// Operation selector for injected failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetLatestRelease,
    GetRef,
    CompareCommits,
    CreateRelease,
    CreateComment,
}

/// Failure kinds the mock can inject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    NotFound,
    Conflict,
    Transient,
    RateLimited,
    Unauthorized,
}

impl MockFailure {
    fn into_error(self, op: Operation) -> DrafterError {
        let msg = format!("injected failure in {:?}", op);
        match self {
            MockFailure::NotFound => DrafterError::NotFound(msg),
            MockFailure::Conflict => DrafterError::Conflict(msg),
            MockFailure::Transient => DrafterError::Transient(msg),
            MockFailure::RateLimited => DrafterError::RateLimited(msg),
            MockFailure::Unauthorized => DrafterError::Unauthorized(msg),
        }
    }
}

/// In-memory hosting platform for testing without network access
///
/// Every call is recorded, including calls that fail.
pub struct MockPlatform {
    latest_release: Option<String>,
    refs: HashMap<String, String>,
    comparisons: HashMap<String, Vec<ComparedCommit>>,
    failures: HashMap<Operation, MockFailure>,
    reject_duplicate_releases: bool,
    calls: Mutex<Vec<PlatformCall>>,
}

impl MockPlatform {
    /// Create a platform with no releases, tags or commits
    pub fn new() -> Self {
        MockPlatform {
            latest_release: None,
            refs: HashMap::new(),
            comparisons: HashMap::new(),
            failures: HashMap::new(),
            reject_duplicate_releases: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Builds a comparison entry the way the platform reports it
    pub fn commit(sha: &str, message: &str, url: &str) -> ComparedCommit {
        ComparedCommit {
            sha: sha.to_string(),
            html_url: url.to_string(),
            commit: CommitDetail {
                message: message.to_string(),
            },
        }
    }

    /// Set the tag name of the latest published release
    pub fn with_latest_release(mut self, tag: impl Into<String>) -> Self {
        self.latest_release = Some(tag.into());
        self
    }

    /// Add a tag pointing at an object sha
    pub fn with_tag(mut self, tag: &str, sha: impl Into<String>) -> Self {
        self.refs.insert(format!("tags/{}", tag), sha.into());
        self
    }

    /// Set the commits returned when comparing from `base`, oldest first
    pub fn with_comparison(mut self, base: impl Into<String>, commits: Vec<ComparedCommit>) -> Self {
        self.comparisons.insert(base.into(), commits);
        self
    }

    /// Make every call of `op` fail with `failure`
    pub fn with_failure(mut self, op: Operation, failure: MockFailure) -> Self {
        self.failures.insert(op, failure);
        self
    }

    /// Answer a second release for the same tag with a conflict, as GitHub does
    pub fn rejecting_duplicate_releases(mut self) -> Self {
        self.reject_duplicate_releases = true;
        self
    }

    /// All calls received so far, in order
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.lock().clone()
    }

    /// Releases passed to `create_release`, including rejected ones
    pub fn created_releases(&self) -> Vec<Release> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                PlatformCall::CreateRelease { release, .. } => Some(release.clone()),
                _ => None,
            })
            .collect()
    }

    /// Comment bodies passed to `create_comment`
    pub fn comments(&self) -> Vec<(u64, String)> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                PlatformCall::CreateComment {
                    issue_number, body, ..
                } => Some((*issue_number, body.clone())),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PlatformCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, call: PlatformCall) {
        self.lock().push(call);
    }

    fn check(&self, op: Operation) -> Result<()> {
        match self.failures.get(&op) {
            Some(failure) => Err(failure.into_error(op)),
            None => Ok(()),
        }
    }
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostingPlatform for MockPlatform {
    async fn get_latest_release(&self, repo: &RepositoryCoordinate) -> Result<LatestRelease> {
        self.record(PlatformCall::GetLatestRelease {
            repository: repo.to_string(),
        });
        self.check(Operation::GetLatestRelease)?;

        self.latest_release
            .clone()
            .map(|tag_name| LatestRelease { tag_name })
            .ok_or_else(|| DrafterError::not_found(format!("no release in {}", repo)))
    }

    async fn get_ref(&self, repo: &RepositoryCoordinate, reference: &str) -> Result<GitRef> {
        self.record(PlatformCall::GetRef {
            repository: repo.to_string(),
            reference: reference.to_string(),
        });
        self.check(Operation::GetRef)?;

        self.refs
            .get(reference)
            .map(|sha| GitRef {
                name: format!("refs/{}", reference),
                object: GitObject {
                    sha: sha.clone(),
                    kind: "commit".to_string(),
                },
            })
            .ok_or_else(|| DrafterError::not_found(format!("ref {} in {}", reference, repo)))
    }

    async fn compare_commits(
        &self,
        repo: &RepositoryCoordinate,
        base: &str,
        head: &str,
    ) -> Result<Comparison> {
        self.record(PlatformCall::CompareCommits {
            repository: repo.to_string(),
            base: base.to_string(),
            head: head.to_string(),
        });
        self.check(Operation::CompareCommits)?;

        let commits = self
            .comparisons
            .get(base)
            .cloned()
            .ok_or_else(|| DrafterError::not_found(format!("commit {} in {}", base, repo)))?;
        Ok(Comparison {
            total_commits: commits.len(),
            commits,
        })
    }

    async fn create_release(
        &self,
        repo: &RepositoryCoordinate,
        release: &Release,
    ) -> Result<PublishedRelease> {
        let already_created = self
            .created_releases()
            .iter()
            .any(|r| r.tag_name == release.tag_name);
        self.record(PlatformCall::CreateRelease {
            repository: repo.to_string(),
            release: release.clone(),
        });
        self.check(Operation::CreateRelease)?;

        if self.reject_duplicate_releases && already_created {
            return Err(DrafterError::conflict(format!(
                "release for {} already exists",
                release.tag_name
            )));
        }

        let id = self.created_releases().len() as u64;
        Ok(PublishedRelease {
            id,
            html_url: format!(
                "https://github.com/{}/releases/tag/{}",
                repo, release.tag_name
            ),
        })
    }

    async fn create_comment(
        &self,
        repo: &RepositoryCoordinate,
        issue_number: u64,
        body: &str,
    ) -> Result<()> {
        self.record(PlatformCall::CreateComment {
            repository: repo.to_string(),
            issue_number,
            body: body.to_string(),
        });
        self.check(Operation::CreateComment)
    }
}
