use tracing::debug;

use crate::config::CompareHead;
use crate::domain::{Commit, CommitRange, ReleaseAnchor, RepositoryCoordinate};
use crate::error::Result;
use crate::platform::HostingPlatform;

/// Ref used when the payload does not name the default branch.
pub const DEFAULT_HEAD: &str = "HEAD";

/// Collects the commits introduced since the previous release.
pub struct CommitRangeFetcher<'a, P: ?Sized> {
    platform: &'a P,
    compare_head: CompareHead,
}

impl<'a, P: HostingPlatform + ?Sized> CommitRangeFetcher<'a, P> {
    pub fn new(platform: &'a P, compare_head: CompareHead) -> Self {
        CommitRangeFetcher {
            platform,
            compare_head,
        }
    }

    /// Ref the comparison runs up to.
    pub fn head<'r>(&self, repo: &'r RepositoryCoordinate, tag: &'r str) -> &'r str {
        match self.compare_head {
            CompareHead::Tag => tag,
            CompareHead::DefaultBranch => repo.default_branch.as_deref().unwrap_or(DEFAULT_HEAD),
        }
    }

    /// Fetches commits reachable from the head but not from the anchor, oldest first.
    ///
    /// An absent anchor yields an empty range without contacting the platform.
    pub async fn fetch(
        &self,
        anchor: &ReleaseAnchor,
        repo: &RepositoryCoordinate,
        tag: &str,
    ) -> Result<CommitRange> {
        let base = match anchor.sha() {
            Some(sha) => sha,
            None => return Ok(CommitRange::empty()),
        };
        let head = self.head(repo, tag);

        let comparison = self.platform.compare_commits(repo, base, head).await?;
        let range = CommitRange::new(
            comparison
                .commits
                .into_iter()
                .map(Commit::from)
                .filter(|c| c.sha != base)
                .collect(),
        );
        debug!(
            repository = %repo,
            base,
            head,
            commits = ?range.short_shas(),
            "fetched commit range"
        );
        Ok(range)
    }
}
