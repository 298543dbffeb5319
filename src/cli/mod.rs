//! Entry-point plumbing shared by the binary and tests

pub mod orchestration;

pub use orchestration::{dispatch, DispatchOutcome, WebhookEvent};
