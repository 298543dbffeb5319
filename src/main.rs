use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use release_drafter::cli::{dispatch, WebhookEvent};
use release_drafter::config;
use release_drafter::logging;
use release_drafter::platform::{DryRun, GitHubClient};
use release_drafter::ui;

#[derive(clap::Parser)]
#[command(
    name = "release-drafter",
    version,
    about = "Draft a release note for a newly created tag and acknowledge new issues"
)]
struct Args {
    #[arg(
        short,
        long,
        env = "GITHUB_EVENT_PATH",
        help = "Path to the webhook event payload (JSON)"
    )]
    event_path: Option<PathBuf>,

    #[arg(
        short = 'n',
        long,
        env = "GITHUB_EVENT_NAME",
        default_value = "create",
        help = "Webhook event name, e.g. create or issues"
    )]
    event_name: String,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Read from the platform but do not create releases or comments")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_tracing();

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let event_path = match args.event_path {
        Some(path) => path,
        None => {
            ui::display_error("No event payload given (use --event-path or GITHUB_EVENT_PATH)");
            std::process::exit(1);
        }
    };
    let payload = match fs::read_to_string(&event_path) {
        Ok(payload) => payload,
        Err(e) => {
            ui::display_error(&format!(
                "Could not read event payload {}: {}",
                event_path.display(),
                e
            ));
            std::process::exit(1);
        }
    };

    // Validate the payload before touching the network
    let event = match WebhookEvent::from_json(&args.event_name, &payload) {
        Ok(event) => event,
        Err(e) => {
            ui::display_error(&format!("Rejected '{}' event: {}", args.event_name, e));
            std::process::exit(1);
        }
    };

    if config.github.token().is_none() {
        tracing::warn!(
            token_env = %config.github.token_env,
            "no API token set; requests are unauthenticated"
        );
    }
    let client = match GitHubClient::from_config(&config.github) {
        Ok(client) => client,
        Err(e) => {
            ui::display_error(&format!("Could not build API client: {}", e));
            std::process::exit(1);
        }
    };

    let outcome = if args.dry_run {
        ui::display_status("Dry run: nothing will be written to the platform");
        dispatch(&DryRun::new(&client), &config, &event).await
    } else {
        dispatch(&client, &config, &event).await
    };

    match outcome {
        Ok(outcome) => {
            ui::display_outcome(&outcome);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&format!("Failed to handle '{}' event: {}", args.event_name, e));
            std::process::exit(1);
        }
    }
}
