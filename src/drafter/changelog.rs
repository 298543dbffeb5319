//! Markdown rendering of a commit range into a release body.

use crate::config::ReleaseConfig;
use crate::domain::{Commit, CommitRange};

/// Renders commit ranges into release bodies.
#[derive(Debug, Clone)]
pub struct ChangelogFormatter {
    heading: String,
    first_release_body: String,
    line_separator: String,
}

impl Default for ChangelogFormatter {
    fn default() -> Self {
        Self::new(&ReleaseConfig::default())
    }
}

impl ChangelogFormatter {
    pub fn new(config: &ReleaseConfig) -> Self {
        ChangelogFormatter {
            heading: config.heading.clone(),
            first_release_body: config.first_release_body.clone(),
            line_separator: config.line_separator.clone(),
        }
    }

    /// Renders one commit as ``[`abc1234`](url) summary``.
    pub fn format_commit(commit: &Commit) -> String {
        format!(
            "[`{}`]({}) {}",
            commit.short_sha,
            commit.url,
            commit.summary()
        )
    }

    /// Builds the release body.
    ///
    /// An empty range produces exactly the first-release text. Otherwise the
    /// heading is followed by a blank line and one line per commit, newest first,
    /// joined with the hard-break separator.
    pub fn format(&self, range: &CommitRange) -> String {
        if range.is_empty() {
            return self.first_release_body.clone();
        }

        let lines: Vec<String> = range.newest_first().map(Self::format_commit).collect();
        format!("{}\n\n{}", self.heading, lines.join(&self.line_separator))
    }
}
