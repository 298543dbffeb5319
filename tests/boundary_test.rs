use release_drafter::boundary::BoundaryWarning;
use release_drafter::ui;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_first_release_display() {
    let warning = BoundaryWarning::FirstRelease {
        tag: "v0.1.0".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("first release"),
        "Message should mention the first release, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("v0.1.0"),
        "Message should contain tag 'v0.1.0', got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_no_new_commits_display() {
    let warning = BoundaryWarning::NoNewCommits {
        previous_tag: "v1.0.0".to_string(),
        previous_sha: "abc1234def5678".to_string(),
        tag: "v1.0.1".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("No new commits"),
        "Message should contain 'No new commits', got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("abc1234") && !display_msg.contains("abc1234d"),
        "Message should contain shortened commit hash 'abc1234', got: {}",
        display_msg
    );
    assert!(display_msg.contains("v1.0.0") && display_msg.contains("v1.0.1"));
}

#[test]
fn test_boundary_warning_no_new_commits_short_hash() {
    let warning = BoundaryWarning::NoNewCommits {
        previous_tag: "v1.0.0".to_string(),
        previous_sha: "abc".to_string(),
        tag: "v1.0.1".to_string(),
    };

    // Hashes shorter than seven characters are shown whole
    assert!(warning.to_string().contains("(abc)"));
}

#[test]
fn test_boundary_warning_non_tag_ref_display() {
    let warning = BoundaryWarning::NonTagRef {
        ref_type: "branch".to_string(),
        ref_name: "feature/login".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("branch"));
    assert!(display_msg.contains("feature/login"));
    assert!(display_msg.contains("only tags"));
}

#[test]
fn test_boundary_warning_equality() {
    let a = BoundaryWarning::FirstRelease {
        tag: "v1".to_string(),
    };
    let b = BoundaryWarning::FirstRelease {
        tag: "v1".to_string(),
    };
    let c = BoundaryWarning::FirstRelease {
        tag: "v2".to_string(),
    };
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_ui_display_functions_do_not_panic() {
    ui::display_status("status");
    ui::display_success("success");
    ui::display_error("error");
    ui::display_release_body("## Changes\n\n[`abc1234`](u) fix");
}
