//! Console output for the release-drafter binary.

use console::style;

use crate::cli::DispatchOutcome;
use crate::drafter::SynthesisOutcome;
use crate::responder::ResponseOutcome;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// One-line description of how an event was handled.
pub fn describe_outcome(outcome: &DispatchOutcome) -> String {
    match outcome {
        DispatchOutcome::Release(SynthesisOutcome::Published {
            release,
            commit_count,
            url,
            ..
        }) => {
            let mut line = format!(
                "Published release {} with {} commit(s)",
                release.tag_name, commit_count
            );
            if !url.is_empty() {
                line.push_str(&format!(" at {}", url));
            }
            line
        }
        DispatchOutcome::Release(SynthesisOutcome::Skipped { ref_type, ref_name }) => {
            format!("Skipped {} '{}': not a tag", ref_type, ref_name)
        }
        DispatchOutcome::Issue(ResponseOutcome::Commented) => "Commented on new issue".to_string(),
        DispatchOutcome::Issue(ResponseOutcome::Disabled) => {
            "Issue responder is disabled".to_string()
        }
        DispatchOutcome::Issue(ResponseOutcome::IgnoredAuthor(author)) => {
            format!("Issue by '{}' left without reply", author)
        }
        DispatchOutcome::Ignored { event_name } => {
            format!("No handler for event '{}'", event_name)
        }
    }
}

/// Print the release body that was (or would have been) published.
pub fn display_release_body(body: &str) {
    println!("\n{}", style("Release body:").bold());
    for line in body.lines() {
        println!("  {}", line);
    }
}

/// Print the result of handling an event.
pub fn display_outcome(outcome: &DispatchOutcome) {
    let line = describe_outcome(outcome);
    match outcome {
        DispatchOutcome::Release(SynthesisOutcome::Published { release, .. }) => {
            display_success(&line);
            display_release_body(&release.body);
        }
        DispatchOutcome::Issue(ResponseOutcome::Commented) => display_success(&line),
        _ => display_status(&line),
    }
}
