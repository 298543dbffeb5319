use serde::Serialize;

/// A release to be created on the hosting platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(rename = "name")]
    pub display_name: String,
    pub body: String,
}

impl Release {
    /// Builds a release whose tag and display name are both `tag`.
    pub fn for_tag(tag: impl Into<String>, body: impl Into<String>) -> Self {
        let tag_name = tag.into();
        Release {
            display_name: tag_name.clone(),
            tag_name,
            body: body.into(),
        }
    }
}

/// The commit the previous release points at.
///
/// `Absent` is the normal state before a repository's first release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseAnchor {
    Absent,
    Commit { tag: String, sha: String },
}

impl ReleaseAnchor {
    pub fn sha(&self) -> Option<&str> {
        match self {
            ReleaseAnchor::Absent => None,
            ReleaseAnchor::Commit { sha, .. } => Some(sha),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            ReleaseAnchor::Absent => None,
            ReleaseAnchor::Commit { tag, .. } => Some(tag),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ReleaseAnchor::Absent)
    }
}
