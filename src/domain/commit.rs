/// Length of the abbreviated commit id shown in release notes.
pub const SHORT_SHA_LEN: usize = 7;

/// A commit as reported by the platform's comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Full hex object id
    pub sha: String,
    /// First seven characters of `sha`
    pub short_sha: String,
    /// Complete message, possibly multi-line
    pub message: String,
    /// Web URL of the commit
    pub url: String,
}

impl Commit {
    pub fn new(sha: impl Into<String>, message: impl Into<String>, url: impl Into<String>) -> Self {
        let sha = sha.into();
        let short_sha = abbreviate(&sha).to_string();
        Commit {
            sha,
            short_sha,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Message text up to the first line break.
    pub fn summary(&self) -> &str {
        let line = self.message.split('\n').next().unwrap_or_default();
        line.strip_suffix('\r').unwrap_or(line)
    }
}

/// Shortens a sha to its first seven characters; shorter ids are returned whole.
pub fn abbreviate(sha: &str) -> &str {
    match sha.char_indices().nth(SHORT_SHA_LEN) {
        Some((idx, _)) => &sha[..idx],
        None => sha,
    }
}

/// Commits reachable from the comparison head but not from the base,
/// oldest first as the platform returns them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitRange {
    commits: Vec<Commit>,
}

impl CommitRange {
    pub fn new(commits: Vec<Commit>) -> Self {
        CommitRange { commits }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    /// Commits in platform order (oldest first).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Commit> {
        self.commits.iter()
    }

    /// Commits newest first, the order a changelog reads in.
    pub fn newest_first(&self) -> impl Iterator<Item = &Commit> {
        self.commits.iter().rev()
    }

    pub fn short_shas(&self) -> Vec<&str> {
        self.commits.iter().map(|c| c.short_sha.as_str()).collect()
    }
}
