use tracing::info;

use crate::domain::{Release, RepositoryCoordinate};
use crate::error::Result;
use crate::platform::{HostingPlatform, PublishedRelease};

/// Creates releases on the hosting platform.
///
/// There is no existence check: publishing the same tag twice issues two
/// create calls and the platform decides what happens to the second.
pub struct ReleasePublisher<'a, P: ?Sized> {
    platform: &'a P,
}

impl<'a, P: HostingPlatform + ?Sized> ReleasePublisher<'a, P> {
    pub fn new(platform: &'a P) -> Self {
        ReleasePublisher { platform }
    }

    pub async fn publish(
        &self,
        repo: &RepositoryCoordinate,
        tag: &str,
        body: String,
    ) -> Result<(Release, PublishedRelease)> {
        let release = Release::for_tag(tag, body);
        let published = self.platform.create_release(repo, &release).await?;
        info!(
            repository = %repo,
            tag,
            id = published.id,
            url = %published.html_url,
            "release created"
        );
        Ok((release, published))
    }
}
