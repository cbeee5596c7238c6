mod common;

use common::{commit_count, hidden_files, init_git_repo, treemark_cmd};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn reuse_policy_appends_to_the_existing_hidden_file() {
    let temp = TempDir::new().unwrap();
    let repo = temp.path();
    init_git_repo(repo);
    fs::write(repo.join(".seed"), "").unwrap();
    fs::write(repo.join("x.txt"), "x").unwrap();

    treemark_cmd(repo)
        .arg("--policy")
        .arg("reuse")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Planted 3 marks across folders and files.",
        ));

    // .seed was the only hidden file, so the folder mark and both file
    // marks (for .seed and x.txt) all appended to it.
    assert_eq!(hidden_files(repo), vec![".seed".to_string()]);
    let content = fs::read_to_string(repo.join(".seed")).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert_eq!(commit_count(repo), 3);
}

#[test]
fn reuse_policy_creates_a_hidden_file_when_none_exist() {
    let temp = TempDir::new().unwrap();
    let repo = temp.path();
    init_git_repo(repo);
    fs::write(repo.join("x.txt"), "x").unwrap();

    treemark_cmd(repo)
        .arg("--policy")
        .arg("reuse")
        .assert()
        .success();

    let markers = hidden_files(repo);
    assert!(!markers.is_empty());
    for name in &markers {
        assert!(name.len() >= 5 && name.len() <= 9, "unexpected name {name}");
        assert!(name[1..].chars().all(|c| c.is_ascii_lowercase()));
    }
}

#[test]
fn always_create_rerun_appends_to_the_derived_file_marker() {
    let temp = TempDir::new().unwrap();
    let repo = temp.path();
    init_git_repo(repo);
    fs::write(repo.join("x.txt"), "x").unwrap();

    treemark_cmd(repo).assert().success();
    treemark_cmd(repo).assert().success();

    // The derived name .x.txt.mark already existed on the second run, so
    // it received a second line rather than a second file.
    let content = fs::read_to_string(repo.join(".x.txt.mark")).unwrap();
    assert_eq!(content.lines().count(), 2);
}
