use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn help_text(args: &[&str]) -> String {
    let mut cmd = cargo_bin_cmd!("atelier-admin");
    let output = cmd
        .args(args)
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8_lossy(&output).into_owned()
}

#[test]
fn top_level_help_lists_pages() {
    let text = help_text(&[]);
    for page in ["users", "contests", "submissions", "campaigns", "examiners"] {
        assert!(text.contains(page), "help missing '{page}' command");
    }
    assert!(text.contains("--demo"), "help missing --demo flag");
}

#[test]
fn list_help_documents_filters() {
    let text = help_text(&["users", "list"]);
    for flag in ["--search", "--status", "--category", "--page"] {
        assert!(text.contains(flag), "users list help missing {flag}");
    }
}

#[test]
fn reject_requires_a_reason_flag() {
    let text = help_text(&["submissions", "reject"]);
    assert!(text.contains("--reason"), "reject help missing --reason");
}

#[test]
fn demo_users_list_shows_page_indicator() {
    let mut cmd = cargo_bin_cmd!("atelier-admin");
    cmd.args(["--demo", "--lang", "en", "--page-size", "10", "users", "list"])
        .env("ATELIER_CONFIG", "")
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1 of 2"))
        .stdout(predicate::str::contains("John Doe"));
}

#[test]
fn demo_rejects_unknown_status_filter() {
    let mut cmd = cargo_bin_cmd!("atelier-admin");
    cmd.args(["--demo", "users", "list", "--status", "BANNED"])
        .env("ATELIER_CONFIG", "")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown user status"));
}
