//! Domain types - plain values independent of the hosting platform client

pub mod commit;
pub mod event;
pub mod release;
pub mod repository;

pub use commit::{Commit, CommitRange};
pub use event::{IssueOpenedEvent, RefType, TagEvent};
pub use release::{Release, ReleaseAnchor};
pub use repository::RepositoryCoordinate;
