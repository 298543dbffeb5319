use async_trait::async_trait;
use tracing::info;

use super::{Comparison, GitRef, HostingPlatform, LatestRelease, PublishedRelease};
use crate::domain::{Release, RepositoryCoordinate};
use crate::error::Result;

/// Forwards reads to the wrapped platform and logs writes instead of sending them.
pub struct DryRun<'a, P: ?Sized> {
    inner: &'a P,
}

impl<'a, P: HostingPlatform + ?Sized> DryRun<'a, P> {
    pub fn new(inner: &'a P) -> Self {
        DryRun { inner }
    }
}

#[async_trait]
impl<'a, P: HostingPlatform + ?Sized> HostingPlatform for DryRun<'a, P> {
    async fn get_latest_release(&self, repo: &RepositoryCoordinate) -> Result<LatestRelease> {
        self.inner.get_latest_release(repo).await
    }

    async fn get_ref(&self, repo: &RepositoryCoordinate, reference: &str) -> Result<GitRef> {
        self.inner.get_ref(repo, reference).await
    }

    async fn compare_commits(
        &self,
        repo: &RepositoryCoordinate,
        base: &str,
        head: &str,
    ) -> Result<Comparison> {
        self.inner.compare_commits(repo, base, head).await
    }

    async fn create_release(
        &self,
        repo: &RepositoryCoordinate,
        release: &Release,
    ) -> Result<PublishedRelease> {
        info!(
            repository = %repo,
            tag = %release.tag_name,
            body = %release.body,
            "dry run: release not created"
        );
        Ok(PublishedRelease::default())
    }

    async fn create_comment(
        &self,
        repo: &RepositoryCoordinate,
        issue_number: u64,
        body: &str,
    ) -> Result<()> {
        info!(repository = %repo, issue_number, body, "dry run: comment not posted");
        Ok(())
    }
}
