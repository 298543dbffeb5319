use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{DrafterError, Result};

/// File name searched for in the working directory and the user config directory.
pub const CONFIG_FILE_NAME: &str = "release-drafter.toml";

/// Represents the complete configuration for release-drafter.
///
/// Contains hosting platform access, release body rendering, and issue responder settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub responder: ResponderConfig,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

fn default_user_agent() -> String {
    concat!("release-drafter/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Access settings for the hosting platform API.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitHubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Name of the environment variable holding the API token.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_url: default_api_url(),
            token_env: default_token_env(),
            user_agent: default_user_agent(),
        }
    }
}

impl GitHubConfig {
    /// Reads the API token from the configured environment variable.
    ///
    /// An unset or blank variable yields `None`; requests then go out unauthenticated.
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

/// Which ref the commit comparison runs up to.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CompareHead {
    /// Tip of the repository's default branch.
    #[default]
    DefaultBranch,
    /// The newly created tag.
    Tag,
}

fn default_heading() -> String {
    "## Changes".to_string()
}

fn default_first_release_body() -> String {
    "Initial release!".to_string()
}

fn default_line_separator() -> String {
    // Two or more trailing spaces force a hard line break in GitHub markdown.
    "    \n".to_string()
}

/// Configuration for release body rendering.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_heading")]
    pub heading: String,

    #[serde(default = "default_first_release_body")]
    pub first_release_body: String,

    #[serde(default = "default_line_separator")]
    pub line_separator: String,

    #[serde(default)]
    pub compare_head: CompareHead,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            heading: default_heading(),
            first_release_body: default_first_release_body(),
            line_separator: default_line_separator(),
            compare_head: CompareHead::default(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_greeting() -> String {
    "Thanks for opening this issue!".to_string()
}

/// Configuration for the issue auto-responder.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ResponderConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Logins whose issues never get an automatic reply (usually the maintainers).
    #[serde(default)]
    pub ignored_authors: Vec<String>,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        ResponderConfig {
            enabled: default_enabled(),
            greeting: default_greeting(),
            ignored_authors: Vec::new(),
        }
    }
}

impl Config {
    /// Checks values that serde alone cannot reject.
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.github.api_url).map_err(|e| {
            DrafterError::config(format!("invalid github.api_url '{}': {}", self.github.api_url, e))
        })?;
        if url.cannot_be_a_base() {
            return Err(DrafterError::config(format!(
                "github.api_url '{}' cannot be used as a base URL",
                self.github.api_url
            )));
        }
        if self.release.line_separator.is_empty() {
            return Err(DrafterError::config("release.line_separator must not be empty"));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release-drafter.toml` in current directory
/// 3. `release-drafter.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if local.exists() {
        fs::read_to_string(local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    config.validate()?;
    Ok(config)
}
