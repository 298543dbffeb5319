//! Per-event sequencing of the release pipeline
//!
//! The stages run strictly in order, each consuming the previous one's output:
//!
//! `Start -> ResolvingAnchor -> FetchingRange -> Formatting -> Publishing -> Done`
//!
//! Any stage may fail, which ends the invocation. A missing previous release is
//! not a failure: the fetcher then yields an empty range and the formatter
//! produces the first-release body, which is still published.

use std::fmt;

use tracing::{debug, error, info, warn};

use super::{
    extract_coordinates, ChangelogFormatter, CommitRangeFetcher, LatestReleaseResolver,
    ReleasePublisher,
};
use crate::boundary::BoundaryWarning;
use crate::config::ReleaseConfig;
use crate::domain::{Release, ReleaseAnchor, RepositoryCoordinate, TagEvent};
use crate::error::{DrafterError, Result};
use crate::platform::HostingPlatform;

/// Position of an invocation within the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Start,
    ResolvingAnchor,
    FetchingRange,
    Formatting,
    Publishing,
    Done,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Start => "start",
            PipelineStage::ResolvingAnchor => "resolving-anchor",
            PipelineStage::FetchingRange => "fetching-range",
            PipelineStage::Formatting => "formatting",
            PipelineStage::Publishing => "publishing",
            PipelineStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Result of handling one "ref created" event
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisOutcome {
    /// The created ref was not a tag
    Skipped { ref_type: String, ref_name: String },
    /// A release was created
    Published {
        release: Release,
        anchor: ReleaseAnchor,
        commit_count: usize,
        url: String,
    },
}

/// Runs the release pipeline for a single tag event.
///
/// Holds only borrowed, read-only state; concurrent invocations share nothing.
pub struct ReleaseSynthesisOrchestrator<'a, P: ?Sized> {
    platform: &'a P,
    config: &'a ReleaseConfig,
}

impl<'a, P: HostingPlatform + ?Sized> ReleaseSynthesisOrchestrator<'a, P> {
    pub fn new(platform: &'a P, config: &'a ReleaseConfig) -> Self {
        ReleaseSynthesisOrchestrator { platform, config }
    }

    pub async fn run(&self, event: &TagEvent) -> Result<SynthesisOutcome> {
        if !event.is_tag() {
            let warning = BoundaryWarning::NonTagRef {
                ref_type: event.ref_type.as_str().to_string(),
                ref_name: event.ref_name.clone(),
            };
            info!(repository = %event.repository, "{}", warning);
            return Ok(SynthesisOutcome::Skipped {
                ref_type: event.ref_type.as_str().to_string(),
                ref_name: event.ref_name.clone(),
            });
        }

        let repo = extract_coordinates(event);
        let tag = event.ref_name.as_str();
        info!(repository = %repo, tag, stage = %PipelineStage::Start, "drafting release");

        let anchor = LatestReleaseResolver::new(self.platform)
            .resolve(&repo)
            .await
            .map_err(|e| self.fail(PipelineStage::ResolvingAnchor, &repo, tag, e))?;
        if anchor.is_absent() {
            let warning = BoundaryWarning::FirstRelease {
                tag: tag.to_string(),
            };
            info!(repository = %repo, "{}", warning);
        }
        if let (Some(previous), Some(sha)) = (anchor.tag(), anchor.sha()) {
            info!(repository = %repo, previous_tag = previous, sha, "previous release");
        }

        let range = CommitRangeFetcher::new(self.platform, self.config.compare_head)
            .fetch(&anchor, &repo, tag)
            .await
            .map_err(|e| self.fail(PipelineStage::FetchingRange, &repo, tag, e))?;
        if let (true, Some(previous), Some(sha)) = (range.is_empty(), anchor.tag(), anchor.sha()) {
            let warning = BoundaryWarning::NoNewCommits {
                previous_tag: previous.to_string(),
                previous_sha: sha.to_string(),
                tag: tag.to_string(),
            };
            warn!(repository = %repo, "{}", warning);
        }
        info!(
            repository = %repo,
            tag,
            commit_count = range.len(),
            commits = %range.short_shas().join(", "),
            "new commits since previous release"
        );

        debug!(stage = %PipelineStage::Formatting, tag);
        let body = ChangelogFormatter::new(self.config).format(&range);
        debug!(repository = %repo, tag, %body, "release body");

        let (release, published) = ReleasePublisher::new(self.platform)
            .publish(&repo, tag, body)
            .await
            .map_err(|e| self.fail(PipelineStage::Publishing, &repo, tag, e))?;

        debug!(stage = %PipelineStage::Done, tag);
        Ok(SynthesisOutcome::Published {
            release,
            anchor,
            commit_count: range.len(),
            url: published.html_url,
        })
    }

    /// Logs a failed stage with enough context to diagnose it, then hands the error back unchanged.
    fn fail(
        &self,
        stage: PipelineStage,
        repo: &RepositoryCoordinate,
        tag: &str,
        err: DrafterError,
    ) -> DrafterError {
        error!(
            repository = %repo,
            tag,
            %stage,
            transient = err.is_transient(),
            error = %err,
            "release drafting failed"
        );
        err
    }
}
