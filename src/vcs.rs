//! Version control integration.
//!
//! The traversal driver talks to version control through the [`CommitSink`]
//! capability trait (stage one path, commit one message) so tests can record
//! the call sequence in memory. The production implementation shells out to
//! the `git` client with the working directory set to the repository root.

use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    #[error("failed to run git {verb}: {source}")]
    Spawn {
        verb: &'static str,
        source: std::io::Error,
    },
    #[error("git {verb} exited with {status}: {stderr}")]
    Failed {
        verb: &'static str,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

pub trait CommitSink {
    fn stage(&mut self, path: &Path) -> Result<(), VcsError>;
    fn commit(&mut self, message: &str) -> Result<(), VcsError>;
}

/// Commit sink backed by the external `git` executable.
pub struct GitClient {
    root: PathBuf,
}

impl GitClient {
    pub fn new(root: PathBuf) -> Self {
        GitClient { root }
    }

    fn run(
        &self,
        verb: &'static str,
        configure: impl FnOnce(&mut Command),
    ) -> Result<(), VcsError> {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.root);
        configure(&mut cmd);

        let output = cmd.output().map_err(|source| VcsError::Spawn { verb, source })?;

        if !output.status.success() {
            return Err(VcsError::Failed {
                verb,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

impl CommitSink for GitClient {
    fn stage(&mut self, path: &Path) -> Result<(), VcsError> {
        self.run("add", |cmd| {
            cmd.arg("add").arg("--").arg(path);
        })
    }

    fn commit(&mut self, message: &str) -> Result<(), VcsError> {
        self.run("commit", |cmd| {
            cmd.args(["commit", "-m"]).arg(message);
        })
    }
}
