use std::fmt;

use crate::domain::commit::abbreviate;

/// Notable but non-fatal conditions met while drafting a release.
/// These are logged and never change the pipeline's control flow.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No earlier release exists; the body falls back to the first-release text
    FirstRelease { tag: String },
    /// An earlier release exists but the comparison returned no commits
    NoNewCommits {
        previous_tag: String,
        previous_sha: String,
        tag: String,
    },
    /// A ref other than a tag was created; nothing is drafted
    NonTagRef { ref_type: String, ref_name: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::FirstRelease { tag } => {
                write!(f, "No previous release found; '{}' is the first release", tag)
            }
            BoundaryWarning::NoNewCommits {
                previous_tag,
                previous_sha,
                tag,
            } => {
                write!(
                    f,
                    "No new commits between '{}' ({}) and '{}'",
                    previous_tag,
                    abbreviate(previous_sha),
                    tag
                )
            }
            BoundaryWarning::NonTagRef { ref_type, ref_name } => {
                write!(
                    f,
                    "Ignoring created {} '{}': only tags are released",
                    ref_type, ref_name
                )
            }
        }
    }
}
