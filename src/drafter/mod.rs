//! Release note synthesis pipeline
//!
//! A "tag created" event flows through these steps in order:
//! 1. [extract_coordinates] - owner and repository name
//! 2. [LatestReleaseResolver] - commit of the previous release, if any
//! 3. [CommitRangeFetcher] - commits introduced since that commit
//! 4. [ChangelogFormatter] - markdown release body
//! 5. [ReleasePublisher] - release creation
//!
//! [ReleaseSynthesisOrchestrator] runs them for a single event.

pub mod changelog;
pub mod fetcher;
pub mod orchestrator;
pub mod publisher;
pub mod resolver;

pub use changelog::ChangelogFormatter;
pub use fetcher::CommitRangeFetcher;
pub use orchestrator::{PipelineStage, ReleaseSynthesisOrchestrator, SynthesisOutcome};
pub use publisher::ReleasePublisher;
pub use resolver::LatestReleaseResolver;

use crate::domain::{RepositoryCoordinate, TagEvent};

/// Returns the repository a tag event belongs to.
///
/// Presence of owner and name is guaranteed by [TagEvent::from_payload].
pub fn extract_coordinates(event: &TagEvent) -> RepositoryCoordinate {
    event.repository.clone()
}
