//! Retention Integration Tests
//!
//! Exercises `SessionMemoryStore` through separate `Database::open` /
//! `close` cycles on the same file, the way independent hook processes do.

use std::path::Path;

use memory_bridge::models::session::SessionSummary;
use memory_bridge::services::memory::{NewSession, SessionMemoryStore};
use memory_bridge::storage::database::Database;
use memory_bridge::utils::error::AppResult;

fn save_once(path: &Path, project: &str, session_id: &str, window: usize) -> AppResult<usize> {
    let db = Database::open(path)?;
    let summary = SessionSummary::new(
        &format!("work on {}", session_id),
        vec![format!("- Changed {}", session_id)],
    );
    let (_, pruned) = SessionMemoryStore::new(&db).insert_and_prune(
        &NewSession {
            project_path: project,
            session_id,
            summary: &summary,
            message_count: 2,
        },
        window,
    )?;
    db.close();
    Ok(pruned)
}

fn count(path: &Path, project: &str) -> usize {
    let db = Database::open(path).unwrap();
    let n = SessionMemoryStore::new(&db).count_sessions(project).unwrap();
    db.close();
    n
}

#[test]
fn test_window_bound_holds_after_every_insert() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("memory.db");

    for n in 1..=9 {
        save_once(&path, "/p", &format!("s{}", n), 4).unwrap();
        assert_eq!(count(&path, "/p"), n.min(4));
    }
}

#[test]
fn test_partition_b_untouched_by_partition_a() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("memory.db");

    save_once(&path, "/b", "b1", 5).unwrap();
    save_once(&path, "/b", "b2", 5).unwrap();

    let db = Database::open(&path).unwrap();
    let before = SessionMemoryStore::new(&db).query_recent("/b", 10).unwrap();
    db.close();

    for n in 1..=6 {
        save_once(&path, "/a", &format!("a{}", n), 1).unwrap();
    }

    let db = Database::open(&path).unwrap();
    let store = SessionMemoryStore::new(&db);
    assert_eq!(store.query_recent("/b", 10).unwrap(), before);
    assert_eq!(store.count_sessions("/a").unwrap(), 1);
    assert_eq!(store.query_recent("/a", 10).unwrap()[0].session_id, "a6");
}

#[test]
fn test_shrinking_window_prunes_on_next_insert() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("memory.db");

    for n in 1..=5 {
        save_once(&path, "/p", &format!("s{}", n), 5).unwrap();
    }
    let pruned = save_once(&path, "/p", "s6", 2).unwrap();
    assert_eq!(pruned, 4);

    let db = Database::open(&path).unwrap();
    let sessions = SessionMemoryStore::new(&db).query_recent("/p", 10).unwrap();
    let ids: Vec<&str> = sessions.iter().map(|s| s.session_id.as_str()).collect();
    assert_eq!(ids, vec!["s6", "s5"]);
    assert!(sessions
        .windows(2)
        .all(|w| w[0].created_at >= w[1].created_at));
}
