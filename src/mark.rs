//! Traversal driver: walks the tree and performs marking actions.
//!
//! A marking action is one append-and-commit cycle against one marker file.
//! Every directory gets exactly one folder-level action and every regular
//! file it contains gets one file-adjacent action. Actions are fully
//! sequential; each append is flushed to disk and committed before the walk
//! moves on. Per-action failures are printed and counted but never stop the
//! walk.

use crate::graffiti;
use crate::locate::VCS_DIR;
use crate::marker::{self, MarkerPolicy};
use crate::vcs::{CommitSink, VcsError};
use chrono::Utc;
use rand::Rng;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf, StripPrefixError};
use tracing::debug;

/// Fatal errors. Everything that can go wrong per-item is an
/// [`ActionError`] and is recovered instead.
#[derive(Debug, thiserror::Error)]
pub enum MarkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single marking action, logged with its target and skipped.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Marker(#[from] marker::MarkerError),
    #[error(transparent)]
    Vcs(#[from] VcsError),
    #[error("path escapes the repository root: {0}")]
    OutsideRoot(#[from] StripPrefixError),
}

pub struct MarkOptions {
    pub policy: MarkerPolicy,
    /// Resolve and report targets without writing or committing anything.
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct MarkResult {
    /// Successful marking actions.
    pub planted: usize,
    /// Actions that failed and were skipped.
    pub failed: usize,
}

/// Run-scoped state threaded through the walk; nothing here is global.
struct Run<'a, R: Rng, S: CommitSink> {
    root: &'a Path,
    options: &'a MarkOptions,
    rng: &'a mut R,
    sink: &'a mut S,
    visited: HashSet<PathBuf>,
    planted: usize,
    failed: usize,
}

/// Depth-first pre-order walk from `start`, marking every directory and
/// regular file below it. `root` is the resolved git root; `start` must lie
/// inside it.
pub fn mark_tree<R: Rng, S: CommitSink>(
    start: &Path,
    root: &Path,
    options: &MarkOptions,
    rng: &mut R,
    sink: &mut S,
) -> Result<MarkResult, MarkError> {
    let start = start.canonicalize()?;

    let mut run = Run {
        root,
        options,
        rng,
        sink,
        visited: HashSet::new(),
        planted: 0,
        failed: 0,
    };

    run.mark_directory(&start);

    Ok(MarkResult {
        planted: run.planted,
        failed: run.failed,
    })
}

impl<R: Rng, S: CommitSink> Run<'_, R, S> {
    fn mark_directory(&mut self, dir: &Path) {
        // Snapshot the listing before marking so markers created during
        // this visit are not themselves marked in the same run.
        let (files, subdirs) = match list_entries(dir) {
            Ok(listing) => listing,
            Err(e) => {
                self.record::<()>(Err(e.into()), dir);
                return;
            }
        };

        if self.visited.insert(dir.to_path_buf()) {
            let outcome = marker::folder_marker(dir, self.options.policy, self.rng)
                .map_err(ActionError::from)
                .and_then(|target| self.plant(&target));
            self.record(outcome, dir);
        }

        for file_name in files {
            let outcome =
                marker::file_marker(dir, &file_name, self.options.policy, self.rng)
                    .map_err(ActionError::from)
                    .and_then(|target| self.plant(&target));
            self.record(outcome, &dir.join(&file_name));
        }

        for subdir in subdirs {
            self.mark_directory(&subdir);
        }
    }

    /// Append one graffiti line to `target` and commit it.
    fn plant(&mut self, target: &Path) -> Result<(), ActionError> {
        let rel = target.strip_prefix(self.root)?.to_path_buf();

        if !self.options.dry_run {
            let line = graffiti::line(Utc::now(), self.rng);
            let mut file = OpenOptions::new().create(true).append(true).open(target)?;
            file.write_all(line.as_bytes())?;
            // Closed (and flushed to the OS) before git sees the path.
            drop(file);

            self.sink.stage(target)?;
            self.sink.commit(&format!("mark {}", rel.display()))?;
        }

        println!("✅ {}", rel.display());
        Ok(())
    }

    fn record<T>(&mut self, outcome: Result<T, ActionError>, subject: &Path) {
        match outcome {
            Ok(_) => self.planted += 1,
            Err(e) => {
                let shown = subject.strip_prefix(self.root).unwrap_or(subject);
                println!("❌ {}: {}", shown.display(), e);
                debug!("marking action failed for {}: {e}", subject.display());
                self.failed += 1;
            }
        }
    }
}

/// Immediate children of `dir`, split into regular files and directories,
/// each sorted by name. Symlinks are neither marked nor followed, and the
/// version control metadata directory is never descended into.
fn list_entries(dir: &Path) -> Result<(Vec<OsString>, Vec<PathBuf>), std::io::Error> {
    let mut files = Vec::new();
    let mut subdirs = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            if entry.file_name() != VCS_DIR {
                subdirs.push(entry.path());
            }
        } else if file_type.is_file() {
            files.push(entry.file_name());
        }
    }

    files.sort();
    subdirs.sort();

    Ok((files, subdirs))
}
