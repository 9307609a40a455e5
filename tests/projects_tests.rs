// Tests for the projects commands against the local store

use predicates::prelude::*;
use test_env::{import_snapshot, new_cmd, setup_test_env};

#[test]
fn test_projects_list_empty() {
    let (temp_dir, _guard) = setup_test_env();

    new_cmd(&temp_dir)
        .args(["--offline", "projects", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects found"));
}

#[test]
fn test_projects_list_cards() {
    let (temp_dir, _guard) = setup_test_env();
    import_snapshot(&temp_dir);

    new_cmd(&temp_dir)
        .args(["--offline", "projects", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[10] Essay [active] due 2026-03-15"))
        .stdout(predicate::str::contains("Students: Ada, Linus, Unknown Student"))
        .stdout(predicate::str::contains("Reviews: 3  Submissions: 2"))
        .stdout(predicate::str::contains("[11] Poster"));
}

#[test]
fn test_projects_list_json() {
    let (temp_dir, _guard) = setup_test_env();
    import_snapshot(&temp_dir);

    let output = new_cmd(&temp_dir)
        .args(["--offline", "projects", "list", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let cards: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(cards.as_array().unwrap().len(), 2);
    assert_eq!(cards[0]["id"], 10);
    assert_eq!(cards[0]["canViewSubmissions"], true);
    assert_eq!(cards[1]["canViewSubmissions"], false);
    assert_eq!(cards[1]["students"], serde_json::json!(["Linus"]));
}

#[test]
fn test_projects_list_falls_back_when_service_is_down() {
    let (temp_dir, _guard) = setup_test_env();
    import_snapshot(&temp_dir);

    // api.url points at a closed port
    new_cmd(&temp_dir)
        .args(["projects", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Essay"));
}

#[test]
fn test_projects_add() {
    let (temp_dir, _guard) = setup_test_env();
    import_snapshot(&temp_dir);

    new_cmd(&temp_dir)
        .args([
            "--offline", "projects", "add",
            "--title", "Lab report",
            "--description", "Measure g",
            "--due", "2026-05-01",
            "--student", "1",
            "--student", "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project 'Lab report' (id: 12)"));

    new_cmd(&temp_dir)
        .args(["--offline", "projects", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[12] Lab report [active] due 2026-05-01"))
        .stdout(predicate::str::contains("Students: Ada, Linus\n"));
}

#[test]
fn test_projects_add_repeated_student_toggles_off() {
    let (temp_dir, _guard) = setup_test_env();
    import_snapshot(&temp_dir);

    new_cmd(&temp_dir)
        .args([
            "--offline", "projects", "add",
            "--title", "Quiz", "--description", "Short quiz", "--due", "2026-05-01",
            "--student", "1", "--student", "2", "--student", "1",
        ])
        .assert()
        .success();

    let output = new_cmd(&temp_dir)
        .args(["--offline", "projects", "list", "--json"])
        .output()
        .unwrap();
    let cards: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(cards[2]["title"], "Quiz");
    assert_eq!(cards[2]["students"], serde_json::json!(["Linus"]));
}

#[test]
fn test_projects_add_rejects_missing_fields() {
    let (temp_dir, _guard) = setup_test_env();

    new_cmd(&temp_dir)
        .args(["--offline", "projects", "add", "--title", "  ", "--description", "d", "--due", "today"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Title cannot be empty"));

    new_cmd(&temp_dir)
        .args(["--offline", "projects", "add", "--title", "T", "--description", "d", "--due", "someday"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unsupported date expression"));
}

#[test]
fn test_projects_add_rejects_out_of_range_offset() {
    let (temp_dir, _guard) = setup_test_env();

    new_cmd(&temp_dir)
        .args(["--offline", "projects", "add", "--title", "T", "--description", "d", "--due", "+9999999999999d"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Date offset out of range"));

    new_cmd(&temp_dir)
        .args(["--offline", "projects", "add", "--title", "T", "--description", "d", "--due", "+-3d"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot be negative"));
}

#[test]
fn test_projects_add_rejects_non_student() {
    let (temp_dir, _guard) = setup_test_env();
    import_snapshot(&temp_dir);

    new_cmd(&temp_dir)
        .args([
            "--offline", "projects", "add",
            "--title", "T", "--description", "d", "--due", "today", "--student", "3",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("User 3 is not a student"));
}

#[test]
fn test_projects_delete() {
    let (temp_dir, _guard) = setup_test_env();
    import_snapshot(&temp_dir);

    new_cmd(&temp_dir)
        .args(["--offline", "projects", "delete", "10", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted project 10 (Essay)"));

    new_cmd(&temp_dir)
        .args(["--offline", "projects", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Essay").not())
        .stdout(predicate::str::contains("Poster"));

    new_cmd(&temp_dir)
        .args(["--offline", "reviews", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No reviews found"));
}

#[test]
fn test_projects_delete_declined() {
    let (temp_dir, _guard) = setup_test_env();
    import_snapshot(&temp_dir);

    new_cmd(&temp_dir)
        .args(["--offline", "projects", "delete", "10"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."));

    new_cmd(&temp_dir)
        .args(["--offline", "projects", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Essay"));
}

#[test]
fn test_projects_delete_missing() {
    let (temp_dir, _guard) = setup_test_env();

    new_cmd(&temp_dir)
        .args(["--offline", "projects", "delete", "77", "-y"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Project 77 not found"));
}

#[test]
fn test_projects_submissions() {
    let (temp_dir, _guard) = setup_test_env();
    import_snapshot(&temp_dir);

    new_cmd(&temp_dir)
        .args(["--offline", "projects", "submissions", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Submissions for Essay"))
        .stdout(predicate::str::contains("Ada"))
        .stdout(predicate::str::contains("essay.pdf"))
        .stdout(predicate::str::contains("Unknown Student"))
        .stdout(predicate::str::contains("late"));

    new_cmd(&temp_dir)
        .args(["--offline", "projects", "submissions", "11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No submissions yet."));
}
