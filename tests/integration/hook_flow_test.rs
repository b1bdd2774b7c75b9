//! Hook Flow Integration Tests
//!
//! Drives `HookRunner` the way the binary does: one runner per invocation,
//! a transcript file on disk, and a temporary database path.

use std::path::{Path, PathBuf};

use memory_bridge::models::hook::HookInput;
use memory_bridge::models::settings::BridgeConfig;
use memory_bridge::models::transcript::Message;
use memory_bridge::services::hooks::{DegradeReason, HookOutcome, HookRunner};

// ============================================================================
// Helpers
// ============================================================================

fn write_transcript(dir: &Path, name: &str, messages: &[Message]) -> String {
    let path = dir.join(name);
    let lines: Vec<String> = messages
        .iter()
        .map(|m| serde_json::to_string(m).expect("serialize message"))
        .collect();
    std::fs::write(&path, lines.join("\n")).expect("write transcript");
    path.to_string_lossy().into_owned()
}

fn db_path(dir: &Path) -> PathBuf {
    dir.join("state").join("memory-bridge.db")
}

fn save_input(session_id: &str, transcript: String, project: &str) -> HookInput {
    HookInput {
        session_id: Some(session_id.to_string()),
        transcript_path: Some(transcript),
        cwd: Some(project.to_string()),
        hook_event_name: Some("PreCompact".to_string()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_save_and_load_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let transcript = write_transcript(
        tmp.path(),
        "t1.jsonl",
        &[
            Message::user("Please fix the flaky login test"),
            Message::assistant("Summary:\n- Fixed login bug\n- reviewed code\n* Added retry logic"),
        ],
    );

    let runner = HookRunner::new(BridgeConfig::default(), db_path(tmp.path()));
    let report = runner
        .save(&save_input("session-1", transcript, "/work/app"))
        .into_completed()
        .expect("save should complete");
    assert_eq!(report.decisions, 2);
    assert_eq!(report.pruned, 0);

    let sessions = runner
        .recent(Some("/work/app"))
        .into_completed()
        .expect("recent should complete");
    assert_eq!(sessions.len(), 1);
    assert_eq!(
        sessions[0].summary.decisions,
        vec!["- Fixed login bug", "* Added retry logic"]
    );
    assert_eq!(
        sessions[0].summary.initial_request,
        "Please fix the flaky login test"
    );

    let output = runner
        .load(&HookInput {
            cwd: Some("/work/app".into()),
            ..Default::default()
        })
        .into_completed()
        .expect("load should complete")
        .expect("context should be produced");
    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["hookSpecificOutput"]["hookEventName"], "SessionStart");
    assert!(json["hookSpecificOutput"]["additionalContext"]
        .as_str()
        .unwrap()
        .contains("- Fixed login bug"));
}

#[test]
fn test_window_of_five_over_seven_sessions() {
    let tmp = tempfile::tempdir().unwrap();
    let db = db_path(tmp.path());

    for n in 1..=7 {
        let transcript = write_transcript(
            tmp.path(),
            &format!("t{}.jsonl", n),
            &[Message::user(format!("request {}", n))],
        );
        // Fresh runner per invocation, like separate hook processes
        let runner = HookRunner::new(BridgeConfig::default(), db.clone());
        assert!(runner
            .save(&save_input(&format!("s{}", n), transcript, "/p"))
            .is_completed());
    }

    let runner = HookRunner::new(
        BridgeConfig {
            query_limit: 10,
            ..Default::default()
        },
        db,
    );
    let sessions = runner.recent(Some("/p")).into_completed().unwrap();
    let ids: Vec<&str> = sessions.iter().map(|s| s.session_id.as_str()).collect();
    assert_eq!(ids, vec!["s7", "s6", "s5", "s4", "s3"]);
}

#[test]
fn test_empty_transcript_saves_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let transcript = tmp.path().join("empty.jsonl");
    std::fs::write(&transcript, "").unwrap();
    let db = db_path(tmp.path());

    let runner = HookRunner::new(BridgeConfig::default(), db.clone());
    let outcome = runner.save(&save_input(
        "s1",
        transcript.to_string_lossy().into_owned(),
        "/p",
    ));

    assert!(matches!(
        outcome,
        HookOutcome::Degraded(DegradeReason::InputAbsent(_))
    ));
    assert!(!db.exists());
}

#[test]
fn test_load_for_unknown_project_is_silent() {
    let tmp = tempfile::tempdir().unwrap();
    let transcript = write_transcript(tmp.path(), "t.jsonl", &[Message::user("hello")]);
    let runner = HookRunner::new(BridgeConfig::default(), db_path(tmp.path()));
    runner
        .save(&save_input("s1", transcript, "/known"))
        .into_completed()
        .unwrap();

    let outcome = runner.load(&HookInput {
        cwd: Some("/unknown".into()),
        ..Default::default()
    });
    assert!(matches!(outcome, HookOutcome::Completed(None)));
}

#[test]
fn test_projects_listing() {
    let tmp = tempfile::tempdir().unwrap();
    let runner = HookRunner::new(BridgeConfig::default(), db_path(tmp.path()));
    assert!(runner.projects().into_completed().unwrap().is_empty());

    for (n, project) in ["/a", "/b"].iter().enumerate() {
        let transcript = write_transcript(
            tmp.path(),
            &format!("t{}.jsonl", n),
            &[Message::user("x")],
        );
        runner
            .save(&save_input(&format!("s{}", n), transcript, project))
            .into_completed()
            .unwrap();
    }

    assert_eq!(runner.projects().into_completed().unwrap(), vec!["/b", "/a"]);
}
