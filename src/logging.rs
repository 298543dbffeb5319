//! Tracing setup for the release-drafter binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "RELEASE_DRAFTER_LOG";

/// Initialize tracing with the RELEASE_DRAFTER_LOG environment variable.
///
/// Defaults to "info" level if RELEASE_DRAFTER_LOG is not set. Logs go to
/// stderr so stdout stays free for the command's own output.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
