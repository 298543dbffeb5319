use thiserror::Error;

/// Unified error type for release-drafter operations
#[derive(Error, Debug)]
pub enum DrafterError {
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Release already exists: {0}")]
    Conflict(String),

    #[error("Transient platform error: {0}")]
    Transient(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Platform returned HTTP {status}: {message}")]
    Platform { status: u16, message: String },

    #[error("HTTP transport failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-drafter
pub type Result<T> = std::result::Result<T, DrafterError>;

impl DrafterError {
    /// Create a malformed event error with context
    pub fn malformed(msg: impl Into<String>) -> Self {
        DrafterError::MalformedEvent(msg.into())
    }

    /// Create a not-found error with context
    pub fn not_found(msg: impl Into<String>) -> Self {
        DrafterError::NotFound(msg.into())
    }

    /// Create a conflict error with context
    pub fn conflict(msg: impl Into<String>) -> Self {
        DrafterError::Conflict(msg.into())
    }

    /// Create a transient error with context
    pub fn transient(msg: impl Into<String>) -> Self {
        DrafterError::Transient(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        DrafterError::Config(msg.into())
    }

    /// True for a platform "not found" answer.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DrafterError::NotFound(_))
    }

    /// True for failures that might succeed if attempted later.
    ///
    /// Nothing in the pipeline retries; this only drives log wording.
    pub fn is_transient(&self) -> bool {
        match self {
            DrafterError::Transient(_) | DrafterError::RateLimited(_) => true,
            DrafterError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }
}
