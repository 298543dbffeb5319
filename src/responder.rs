//! Automatic acknowledgement of newly opened issues.

use tracing::{debug, info};

use crate::config::ResponderConfig;
use crate::domain::IssueOpenedEvent;
use crate::error::Result;
use crate::platform::HostingPlatform;

/// What the responder did with an issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    Commented,
    Disabled,
    IgnoredAuthor(String),
}

/// Replies to new issues with the configured greeting.
pub struct IssueResponder<'a, P: ?Sized> {
    platform: &'a P,
    config: &'a ResponderConfig,
}

impl<'a, P: HostingPlatform + ?Sized> IssueResponder<'a, P> {
    pub fn new(platform: &'a P, config: &'a ResponderConfig) -> Self {
        IssueResponder { platform, config }
    }

    fn is_ignored(&self, author: &str) -> bool {
        self.config
            .ignored_authors
            .iter()
            .any(|ignored| ignored.eq_ignore_ascii_case(author))
    }

    pub async fn respond(&self, event: &IssueOpenedEvent) -> Result<ResponseOutcome> {
        if !self.config.enabled {
            debug!(repository = %event.repository, "issue responder disabled");
            return Ok(ResponseOutcome::Disabled);
        }
        if self.is_ignored(&event.author) {
            debug!(
                repository = %event.repository,
                author = %event.author,
                "not replying to ignored author"
            );
            return Ok(ResponseOutcome::IgnoredAuthor(event.author.clone()));
        }

        self.platform
            .create_comment(&event.repository, event.issue_number, &self.config.greeting)
            .await?;
        info!(
            repository = %event.repository,
            issue = event.issue_number,
            "acknowledged new issue"
        );
        Ok(ResponseOutcome::Commented)
    }
}
