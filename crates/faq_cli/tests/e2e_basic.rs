use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn bin() -> Command {
    let path = assert_cmd::cargo::cargo_bin!("faq");
    let mut cmd = Command::new(path);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> Value {
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn categories_start_with_all() {
    bin()
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("all\nGetting Started\nPayments\n"));
}

#[test]
fn search_by_tag_outputs_json() {
    let assert = bin()
        .args(["search", "--term", "gst", "--output", "json"])
        .assert()
        .success();

    let json = stdout_json(&assert);
    assert_eq!(json["count"], 1);
    assert_eq!(json["hits"][0]["record"]["id"], "3");
    assert!(json["hits"][0]["score"].as_f64().unwrap() < 0.1);
}

#[test]
fn category_filter_via_raw_filters() {
    let assert = bin()
        .args([
            "search",
            "--filter",
            "category=Payments",
            "--output",
            "json",
        ])
        .assert()
        .success();

    let json = stdout_json(&assert);
    assert_eq!(json["count"], 1);
    assert_eq!(json["hits"][0]["record"]["category"], "Payments");
    assert!(json["hits"][0].get("score").is_none());
}

#[test]
fn unknown_filter_key_fails() {
    bin()
        .args(["search", "--filter", "sortBy=popular"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown filter key: sortBy"));
}

#[test]
fn repeated_votes_add_to_baseline() {
    let assert = bin()
        .args(["vote", "--id", "1", "--helpful", "--times", "2", "--output", "json"])
        .assert()
        .success();

    let json = stdout_json(&assert);
    assert_eq!(json["helpful"], 91);
    assert_eq!(json["not_helpful"], 3);
    assert_eq!(json["acknowledgment"], "Thanks for your feedback!");
}

#[test]
fn session_reads_commands_from_stdin() {
    bin()
        .arg("session")
        .write_stdin("vote 2 down\nsearch paymnt\nshow\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Thanks, we'll improve this answer"))
        .stdout(predicate::str::contains("id=2 helpful=156 not_helpful=9"))
        .stdout(predicate::str::contains("[2] What payment methods"));
}

#[test]
fn exported_catalog_can_be_reloaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("faqs.jsonl");

    bin()
        .args(["export", "--output-file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("exported_records=6"));

    bin()
        .arg("--catalog")
        .arg(&path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("6 questions found\n"));
}

#[test]
fn config_file_controls_featured_limit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "featured_limit = 2\n").unwrap();

    bin()
        .arg("--config")
        .arg(&path)
        .arg("featured")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("2 questions found\n"));
}

#[test]
fn rejects_out_of_range_threshold() {
    bin()
        .args(["--threshold", "2", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("threshold must be within [0, 1]"));
}

#[test]
fn rejects_unknown_output_format() {
    bin()
        .args(["--output", "yaml", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown output format: yaml"));
}

#[test]
fn featured_limit_flag_caps_preview() {
    bin()
        .args(["featured", "--limit", "3"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("3 questions found\n[1] "));
}

#[test]
fn vote_rejects_zero_times() {
    bin()
        .args(["vote", "--id", "1", "--helpful", "--times", "0"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}
