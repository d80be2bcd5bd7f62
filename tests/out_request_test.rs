//! `out` step tests - request JSON in, resolved payload out

mod common;

use common::{write_file, write_git_metadata, CapturingReporter, FULL_GIT_METADATA};
use hipchat_notify::cli::prepare;
use hipchat_notify::{BuildContext, OutRequest};

fn build_context() -> BuildContext {
    BuildContext {
        build_id: Some("248".to_string()),
        build_name: Some("17".to_string()),
        team_name: Some("main".to_string()),
        job_name: Some("unit".to_string()),
        pipeline_name: Some("app".to_string()),
        external_url: Some("https://ci.example.com".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_plain_message_with_tokens() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "pr/url", "https://git.example.com/pr/7");

    let request = OutRequest::from_json(
        r#"{
            "source": {"hipchat_server_url": "https://api.hipchat.com/v2/room/12456", "token": "t0k"},
            "params": {
                "message": "Job ${BUILD_JOB_NAME} #${BUILD_NAME} for ${PR}",
                "color": "green",
                "message_format": "text",
                "tokens": {"PR": "file://pr/url"}
            }
        }"#,
    )
    .unwrap();

    let reporter = CapturingReporter::default();
    let prepared = prepare(request, &build_context(), dir.path(), &reporter).unwrap();

    assert_eq!(prepared.config.server_url, "https://api.hipchat.com");
    assert_eq!(prepared.config.room_id, "12456");
    assert!(prepared.fail_on_error);

    let payload = serde_json::to_value(&prepared.message).unwrap();
    assert_eq!(
        payload,
        serde_json::json!({
            "room_id": "12456",
            "message": "Job unit #17 for https://git.example.com/pr/7",
            "color": "green",
            "message_format": "text"
        })
    );
    assert!(reporter.errors().is_empty());
}

#[test]
fn test_opinionated_failed_build_with_git_metadata() {
    let dir = tempfile::tempdir().unwrap();
    write_git_metadata(dir.path(), &FULL_GIT_METADATA);
    write_file(
        dir.path(),
        "src/.git/commit_message",
        &format!("{}\n\nbody text", "A".repeat(100)),
    );

    let request = OutRequest::from_json(
        r#"{
            "source": {"hipchat_server_url": "https://hipchat.example.com", "token": "t0k", "room_id": 3},
            "params": {"message_type": "failed", "message_type_config": {"fly_info": "disabled"}}
        }"#,
    )
    .unwrap();

    let reporter = CapturingReporter::default();
    let prepared = prepare(request, &build_context(), dir.path(), &reporter).unwrap();
    let message = &prepared.message;

    assert_eq!(message.room_id, "3");
    assert_eq!(message.color.as_deref(), Some("red"));
    assert_eq!(message.notify, Some(true));
    assert_eq!(message.from.as_deref(), Some("Concourse CI"));
    assert!(message
        .message
        .starts_with(r#"<img src="https://ci.example.com/public/images/favicon-failed.png""#));
    assert!(message.message.contains("Build Failed!  Changes by john.doe@nowhere.io.<br>- [abc123] "));
    assert!(message.message.ends_with(&format!("- [abc123] {}...", "A".repeat(75))));
    assert!(!message.message.contains("fly -t"));
    assert!(reporter.errors().is_empty());
}

#[test]
fn test_explicit_notify_false_is_sent() {
    let dir = tempfile::tempdir().unwrap();
    let request = OutRequest::from_json(
        r#"{
            "source": {"hipchat_server_url": "https://hipchat.example.com", "token": "t", "room_id": "9"},
            "params": {"message_type": "pr_failed", "notify": false}
        }"#,
    )
    .unwrap();

    let prepared = prepare(request, &build_context(), dir.path(), &CapturingReporter::default()).unwrap();
    assert_eq!(prepared.message.notify, Some(false));
    assert!(prepared.message.message.contains("Pull Request Build Failed!"));
}

#[test]
fn test_unknown_message_type_without_message_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let request = OutRequest::from_json(
        r#"{
            "source": {"hipchat_server_url": "https://hipchat.example.com", "token": "t", "room_id": "9"},
            "params": {"message_type": "something_unknown"}
        }"#,
    )
    .unwrap();

    let reporter = CapturingReporter::default();
    let err = prepare(request, &build_context(), dir.path(), &reporter).unwrap_err();

    assert_eq!(err.to_string(), "Please provide valid input and try again");
    assert_eq!(
        reporter.errors(),
        vec![
            "Unsupported value for 'message_type': something_unknown".to_string(),
            "Please provide a value for message".to_string(),
        ]
    );
}

#[test]
fn test_missing_token_file_leaves_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let request = OutRequest::from_json(
        r#"{
            "source": {"hipchat_server_url": "https://hipchat.example.com", "token": "t", "room_id": "9", "fail_on_error": false},
            "params": {"message": "v=${VERSION} by ${WHO}", "tokens": {"VERSION": "file://version/number", "WHO": "ci"}}
        }"#,
    )
    .unwrap();

    let reporter = CapturingReporter::default();
    let prepared = prepare(request, &build_context(), dir.path(), &reporter).unwrap();

    assert_eq!(prepared.message.message, "v=${VERSION} by ci");
    assert_eq!(reporter.errors().len(), 1);
    assert!(!prepared.fail_on_error);
}
