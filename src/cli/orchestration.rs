//! Event routing between the webhook payload and the handlers
//!
//! This module keeps the event handling that the binary performs separate
//! from CLI argument parsing, so the same routing can be driven
//! programmatically (and by tests) with any [HostingPlatform].

use crate::config::Config;
use crate::domain::{IssueOpenedEvent, TagEvent};
use crate::drafter::{ReleaseSynthesisOrchestrator, SynthesisOutcome};
use crate::error::Result;
use crate::platform::HostingPlatform;
use crate::responder::{IssueResponder, ResponseOutcome};

/// Event name of a "ref created" webhook.
pub const CREATE_EVENT: &str = "create";
/// Event name of an issue webhook.
pub const ISSUES_EVENT: &str = "issues";

/// A webhook delivery, typed by event name
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    TagCreated(TagEvent),
    IssueOpened(IssueOpenedEvent),
    /// An event or action nothing subscribes to
    Ignored { event_name: String },
}

impl WebhookEvent {
    /// Types a raw payload according to its event name.
    ///
    /// Payloads of handled events are fully validated here; a missing
    /// required field fails with `MalformedEvent` before anything else runs.
    pub fn parse(event_name: &str, payload: serde_json::Value) -> Result<Self> {
        match event_name {
            CREATE_EVENT => Ok(WebhookEvent::TagCreated(TagEvent::from_payload(payload)?)),
            ISSUES_EVENT => {
                let action = payload.get("action").and_then(|a| a.as_str());
                if action == Some("opened") {
                    Ok(WebhookEvent::IssueOpened(IssueOpenedEvent::from_payload(
                        payload,
                    )?))
                } else {
                    Ok(WebhookEvent::Ignored {
                        event_name: format!("{}.{}", event_name, action.unwrap_or("unknown")),
                    })
                }
            }
            other => Ok(WebhookEvent::Ignored {
                event_name: other.to_string(),
            }),
        }
    }

    /// Parses the JSON text of a payload, then types it.
    pub fn from_json(event_name: &str, json: &str) -> Result<Self> {
        let payload: serde_json::Value = serde_json::from_str(json)?;
        Self::parse(event_name, payload)
    }
}

/// What handling an event amounted to
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Release(SynthesisOutcome),
    Issue(ResponseOutcome),
    Ignored { event_name: String },
}

/// Hands an event to its handler.
pub async fn dispatch<P: HostingPlatform + ?Sized>(
    platform: &P,
    config: &Config,
    event: &WebhookEvent,
) -> Result<DispatchOutcome> {
    match event {
        WebhookEvent::TagCreated(tag_event) => {
            let outcome = ReleaseSynthesisOrchestrator::new(platform, &config.release)
                .run(tag_event)
                .await?;
            Ok(DispatchOutcome::Release(outcome))
        }
        WebhookEvent::IssueOpened(issue_event) => {
            let outcome = IssueResponder::new(platform, &config.responder)
                .respond(issue_event)
                .await?;
            Ok(DispatchOutcome::Issue(outcome))
        }
        WebhookEvent::Ignored { event_name } => {
            tracing::debug!(event = %event_name, "no handler for event");
            Ok(DispatchOutcome::Ignored {
                event_name: event_name.clone(),
            })
        }
    }
}
