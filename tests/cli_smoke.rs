use assert_cmd::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str]) {
    assert!(Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn init_git_repo(dir: &Path) {
    // init and basic identity
    git(dir, &["init"]);
    git(dir, &["config", "core.autocrlf", "false"]);
    git(dir, &["config", "core.safecrlf", "false"]);
    git(dir, &["config", "user.email", "you@example.com"]);
    git(dir, &["config", "user.name", "Your Name"]);
}

/// Write every `(name, content)` pair and commit them together with both
/// author and committer date pinned to `date` (git's `YYYY-MM-DD HH:MM:SS +ZZZZ`).
fn commit_files_at(dir: &Path, files: &[(&str, &str)], date: &str) {
    for (name, content) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut f = File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.sync_all().unwrap();
    }
    git(dir, &["add", "."]);
    assert!(Command::new("git")
        .args(["commit", "-m", &format!("change at {date}")])
        .env("GIT_AUTHOR_DATE", date)
        .env("GIT_COMMITTER_DATE", date)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn daystat(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("git-daystat").unwrap();
    cmd.arg(dir).args(args).arg("--quiet").arg("--no-color");
    cmd
}

fn json_rows(dir: &Path, args: &[&str]) -> Vec<serde_json::Value> {
    let out = daystat(dir, args)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    v["rows"].as_array().unwrap().clone()
}

#[test]
fn json_report_collapses_idle_days() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    commit_files_at(
        dir.path(),
        &[("src/a.rs", "a\nb\nc\n"), ("src/b.rs", "x\ny\n")],
        "2023-08-30 10:00:00 +0000",
    );
    commit_files_at(dir.path(), &[("src/c.rs", "z\n")], "2023-09-01 10:00:00 +0000");

    let rows = json_rows(dir.path(), &["2023-08-30", "2023-09-01"]);
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0]["kind"], "active");
    assert_eq!(rows[0]["date"], "2023-08-30");
    assert_eq!(rows[0]["files_changed"], 2);
    assert_eq!(rows[0]["additions"], 5);
    assert_eq!(rows[0]["total_changes"], 5);

    assert_eq!(rows[1]["kind"], "gap");
    assert_eq!(rows[1]["start"], "2023-08-31");
    assert_eq!(rows[1]["end"], "2023-08-31");
    assert_eq!(rows[1]["days"], 1);

    assert_eq!(rows[2]["date"], "2023-09-01");
    assert_eq!(rows[2]["files_changed"], 1);
    assert_eq!(rows[2]["additions"], 1);
}

#[test]
fn same_file_twice_a_day_accumulates_lines() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    commit_files_at(dir.path(), &[("notes.txt", "one\ntwo\n")], "2023-06-01 09:00:00 +0000");
    commit_files_at(dir.path(), &[("notes.txt", "one\n2\nthree\n")], "2023-06-01 15:00:00 +0000");

    let rows = json_rows(dir.path(), &["2023-06-01", "2023-06-01"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["files_changed"], 1);
    assert_eq!(rows[0]["additions"], 4);
    assert_eq!(rows[0]["deletions"], 1);
}

#[test]
fn author_offset_decides_the_day_unless_utc() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    // 20:00 UTC on the 1st, but already the 2nd where the author sits
    commit_files_at(dir.path(), &[("late.txt", "l\n")], "2023-09-02 01:00:00 +0500");

    let local = json_rows(dir.path(), &["2023-09-01", "2023-09-02"]);
    assert_eq!(local[0]["kind"], "gap");
    assert_eq!(local[1]["date"], "2023-09-02");

    let utc = json_rows(dir.path(), &["2023-09-01", "2023-09-02", "--utc"]);
    assert_eq!(utc[0]["date"], "2023-09-01");
    assert_eq!(utc[1]["kind"], "gap");
}

#[test]
fn table_output_has_header_and_gap_rows() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    commit_files_at(dir.path(), &[("a.txt", "a\n")], "2022-12-31 12:00:00 +0000");

    let out = daystat(dir.path(), &["2023-01-01", "2023-01-03"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines[0].contains("Date Range"));
    assert!(lines[0].contains("Total Changes"));
    assert!(text.contains("2023-01-01 ~ 01-03"));
    assert!(text.contains("3 days no commits"));
    assert!(!text.contains("2022-12-31"));
}

#[test]
fn end_before_start_fails_before_opening_repo() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("not-a-repo");

    let out = Command::cargo_bin("git-daystat")
        .unwrap()
        .arg(&missing)
        .args(["2023-05-06", "2023-05-05"])
        .assert()
        .code(1)
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(out).unwrap();
    assert!(stderr.contains("before start date"));
}

#[test]
fn bad_input_exits_with_one() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("git-daystat")
        .unwrap()
        .arg(dir.path())
        .arg("2023-01-01")
        .assert()
        .code(1);

    Command::cargo_bin("git-daystat")
        .unwrap()
        .arg(dir.path())
        .args(["2023-13-01", "2023-12-31"])
        .assert()
        .code(1);

    Command::cargo_bin("git-daystat")
        .unwrap()
        .arg(dir.path().join("missing"))
        .args(["2023-01-01", "2023-01-02"])
        .assert()
        .code(1);

    // an existing directory that is not a repository
    Command::cargo_bin("git-daystat")
        .unwrap()
        .arg(dir.path())
        .args(["2023-01-01", "2023-01-02"])
        .assert()
        .code(1);
}

#[test]
fn binary_files_add_no_lines() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());

    let blob: Vec<u8> = (0..5000u32)
        .flat_map(|i| [0x00, 0xff, (i % 251) as u8, b'\n'])
        .collect();
    fs::write(dir.path().join("logo.png"), &blob).unwrap();
    commit_files_at(dir.path(), &[("notes.txt", "a\nb\n")], "2023-06-01 10:00:00 +0000");

    let mut changed = blob.clone();
    changed.reverse();
    fs::write(dir.path().join("logo.png"), &changed).unwrap();
    commit_files_at(dir.path(), &[], "2023-06-02 10:00:00 +0000");

    let rows = json_rows(dir.path(), &["2023-06-01", "2023-06-02"]);
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0]["files_changed"], 1);
    assert_eq!(rows[0]["additions"], 2);
    assert_eq!(rows[0]["deletions"], 0);

    // a binary-only commit still marks the day active
    assert_eq!(rows[1]["kind"], "active");
    assert_eq!(rows[1]["files_changed"], 0);
    assert_eq!(rows[1]["total_changes"], 0);
}
