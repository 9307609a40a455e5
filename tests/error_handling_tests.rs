// Exit codes and error message formats

use predicates::prelude::*;
use test_env::{new_cmd, setup_test_env};
use std::fs;

#[test]
fn test_invalid_id_is_user_error() {
    let (temp_dir, _guard) = setup_test_env();

    new_cmd(&temp_dir)
        .args(["--offline", "projects", "delete", "abc", "-y"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("Invalid project ID: 'abc'"));

    new_cmd(&temp_dir)
        .args(["--offline", "reviews", "overview", "--user", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("User ID must be positive"));
}

#[test]
fn test_invalid_role_is_user_error() {
    let (temp_dir, _guard) = setup_test_env();

    new_cmd(&temp_dir)
        .args(["--offline", "users", "list", "--role", "janitor"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid role: 'janitor'"));
}

#[test]
fn test_import_bad_snapshot() {
    let (temp_dir, _guard) = setup_test_env();
    let path = temp_dir.path().join("bad.json");
    fs::write(&path, r#"{"users": [{"id": "1", "name": "Ada", "role": "student"}]}"#).unwrap();

    new_cmd(&temp_dir)
        .args(["import", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid snapshot"));

    new_cmd(&temp_dir)
        .args(["import", "/definitely/not/here.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Cannot read"));
}

#[test]
fn test_stats_offline_is_user_error() {
    let (temp_dir, _guard) = setup_test_env();

    new_cmd(&temp_dir)
        .args(["--offline", "stats"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("only available from the review service"));
}

#[test]
fn test_sync_with_service_down_is_user_error() {
    let (temp_dir, _guard) = setup_test_env();

    new_cmd(&temp_dir)
        .args(["sync"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("API server not available"));
}

#[test]
fn test_unwritable_database_is_internal_error() {
    let (temp_dir, _guard) = setup_test_env();
    // A regular file where the database directory should be
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    fs::write(
        temp_dir.path().join(".citriq").join("rc"),
        format!("data.location={}\n", blocker.join("test.db").display()),
    )
    .unwrap();

    new_cmd(&temp_dir)
        .args(["--offline", "users", "list"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::starts_with("Internal error:"));
}
