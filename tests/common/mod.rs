use assert_cmd::{Command, cargo::cargo_bin_cmd};
use std::path::Path;
use std::process::Output;

pub fn treemark_cmd(cwd: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("treemark");
    cmd.arg("-C").arg(cwd);
    cmd
}

/// Create a throwaway git repository with an identity configured so
/// commits succeed regardless of the environment.
pub fn init_git_repo(path: &Path) {
    git(path, &["init", "--quiet"]);
    git(path, &["config", "user.email", "treemark@example.invalid"]);
    git(path, &["config", "user.name", "treemark tests"]);
    git(path, &["config", "commit.gpgsign", "false"]);
}

pub fn git(cwd: &Path, args: &[&str]) -> Output {
    let output = std::process::Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

// Each integration test file is compiled as its own crate; not every crate
// uses every helper below.
#[allow(dead_code)]
pub fn commit_count(cwd: &Path) -> usize {
    let output = git(cwd, &["rev-list", "--count", "HEAD"]);
    String::from_utf8_lossy(&output.stdout)
        .trim()
        .parse()
        .expect("rev-list --count output should be a number")
}

/// Names of hidden regular files directly inside `dir`, excluding `.git`,
/// sorted.
#[allow(dead_code)]
pub fn hidden_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("failed to list directory")
        .map(|e| e.expect("failed to read entry"))
        .filter(|e| e.file_type().expect("failed to stat entry").is_file())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| name.starts_with('.') && name != ".git")
        .collect();
    names.sort();
    names
}
