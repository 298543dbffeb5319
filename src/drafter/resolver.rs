use tracing::debug;

use crate::domain::{ReleaseAnchor, RepositoryCoordinate};
use crate::error::Result;
use crate::platform::HostingPlatform;

/// Finds the commit the latest published release points at.
pub struct LatestReleaseResolver<'a, P: ?Sized> {
    platform: &'a P,
}

impl<'a, P: HostingPlatform + ?Sized> LatestReleaseResolver<'a, P> {
    pub fn new(platform: &'a P) -> Self {
        LatestReleaseResolver { platform }
    }

    /// Resolves the previous release's tag to a commit sha.
    ///
    /// # Returns
    /// * `Ok(ReleaseAnchor::Absent)` - The repository has no published release yet
    /// * `Ok(ReleaseAnchor::Commit)` - Tag and sha of the latest release
    /// * `Err` - Any other failure, including a missing tag ref for an existing release
    pub async fn resolve(&self, repo: &RepositoryCoordinate) -> Result<ReleaseAnchor> {
        let latest = match self.platform.get_latest_release(repo).await {
            Ok(latest) => latest,
            Err(e) if e.is_not_found() => {
                debug!(repository = %repo, reason = %e, "no published release");
                return Ok(ReleaseAnchor::Absent);
            }
            Err(e) => return Err(e),
        };

        let reference = format!("tags/{}", latest.tag_name);
        let tag_ref = self.platform.get_ref(repo, &reference).await?;
        debug!(
            repository = %repo,
            tag = %latest.tag_name,
            sha = %tag_ref.object.sha,
            "resolved latest release"
        );

        Ok(ReleaseAnchor::Commit {
            tag: latest.tag_name,
            sha: tag_ref.object.sha,
        })
    }
}
