mod common;

use common::{init_git_repo, treemark_cmd};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn repo_with_file() -> TempDir {
    let temp = TempDir::new().unwrap();
    init_git_repo(temp.path());
    fs::write(temp.path().join("file.txt"), "hello").unwrap();
    temp
}

#[test]
fn quiet_by_default_on_success() {
    let temp = repo_with_file();

    treemark_cmd(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn verbose_debug_shows_the_resolved_root() {
    let temp = repo_with_file();

    treemark_cmd(temp.path())
        .arg("-vv")
        .assert()
        .success()
        .stderr(predicate::str::contains("git root:"));
}

#[test]
fn rust_log_debug_is_respected_without_flags() {
    let temp = repo_with_file();

    treemark_cmd(temp.path())
        .env("RUST_LOG", "debug")
        .assert()
        .success()
        .stderr(predicate::str::contains("git root:"));
}

#[test]
fn verbose_overrides_rust_log() {
    let temp = repo_with_file();

    treemark_cmd(temp.path())
        .env("RUST_LOG", "error")
        .arg("-vv")
        .assert()
        .success()
        .stderr(predicate::str::contains("git root:"));
}

#[test]
fn dry_run_reports_at_info_level() {
    let temp = repo_with_file();

    treemark_cmd(temp.path())
        .arg("-v")
        .arg("--dry-run")
        .assert()
        .success()
        .stderr(predicate::str::contains("DRY RUN - no files were modified"));
}
