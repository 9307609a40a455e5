// Tests for the reviews commands against an imported snapshot

use predicates::prelude::*;
use test_env::{import_snapshot, new_cmd, setup_test_env};

#[test]
fn test_reviews_overview_text() {
    let (temp_dir, _guard) = setup_test_env();
    import_snapshot(&temp_dir);

    new_cmd(&temp_dir)
        .args(["--offline", "reviews", "overview", "--user", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reviews for Ada (user 1)"))
        .stdout(predicate::str::contains("[10] Essay  due 2026-03-15"))
        .stdout(predicate::str::contains("Projects assigned: 1"))
        .stdout(predicate::str::contains("Reviews given: 1"))
        .stdout(predicate::str::contains("Reviews received: 2"))
        .stdout(predicate::str::contains("Average rating: 3.5"))
        .stdout(predicate::str::contains("To: Linus"))
        .stdout(predicate::str::contains("\"Clear argument\""))
        .stdout(predicate::str::contains("From: Linus"))
        .stdout(predicate::str::contains("From: Unknown"))
        .stdout(predicate::str::contains("Poster").not());
}

#[test]
fn test_reviews_overview_json() {
    let (temp_dir, _guard) = setup_test_env();
    import_snapshot(&temp_dir);

    let output = new_cmd(&temp_dir)
        .args(["--offline", "reviews", "overview", "--user", "1", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let overview: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(overview["userId"], 1);
    assert_eq!(overview["stats"]["reviewsGiven"], 1);
    assert_eq!(overview["stats"]["reviewsReceived"], 2);
    assert_eq!(overview["stats"]["averageRating"], 3.5);

    let preview = overview["projects"][0]["preview"].as_str().unwrap();
    assert!(preview.ends_with("..."));
    assert_eq!(preview.chars().count(), 103);

    let sections = overview["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0]["projectId"], 10);
    assert_eq!(sections[0]["given"][0]["reviewId"], 1);
    assert_eq!(sections[0]["received"][0]["reviewId"], 2);
    assert_eq!(sections[0]["received"][1]["counterpart"], "Unknown");
}

#[test]
fn test_reviews_overview_without_reviews() {
    let (temp_dir, _guard) = setup_test_env();
    import_snapshot(&temp_dir);

    new_cmd(&temp_dir)
        .args(["--offline", "reviews", "overview", "--user", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No assigned projects."))
        .stdout(predicate::str::contains("Reviews received: 0"))
        .stdout(predicate::str::contains("Average rating").not())
        .stdout(predicate::str::contains("No reviews yet."));
}

#[test]
fn test_reviews_overview_unknown_user() {
    let (temp_dir, _guard) = setup_test_env();
    import_snapshot(&temp_dir);

    new_cmd(&temp_dir)
        .args(["--offline", "reviews", "overview", "--user", "500"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("User 500 not found"));
}

#[test]
fn test_reviews_list_filters() {
    let (temp_dir, _guard) = setup_test_env();
    import_snapshot(&temp_dir);

    new_cmd(&temp_dir)
        .args(["--offline", "reviews", "list", "--user", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reviews involving Linus (user 2)"))
        .stdout(predicate::str::contains("Unknown User").not());

    let output = new_cmd(&temp_dir)
        .args(["--offline", "reviews", "list", "--reviewee", "1", "--json"])
        .output()
        .unwrap();
    let reviews: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<i64> = reviews
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn test_reviews_list_resolves_unknown_reviewer() {
    let (temp_dir, _guard) = setup_test_env();
    import_snapshot(&temp_dir);

    new_cmd(&temp_dir)
        .args(["--offline", "reviews", "list", "--reviewer", "99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown User"))
        .stdout(predicate::str::contains("4/5"));
}
