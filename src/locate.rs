//! Repository root location.
//!
//! Walks upward from a starting directory until a directory containing a
//! `.git` entry is found. This is the only fatal failure mode of the tool:
//! nothing is traversed or written before the root has been resolved.

use std::path::{Path, PathBuf};

pub const VCS_DIR: &str = ".git";

#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error("no git root found above {}", .0.display())]
    RootNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolve the git root at or above `start`.
///
/// `start` is canonicalized first; the filesystem root itself is checked
/// before giving up.
pub fn find_git_root(start: &Path) -> Result<PathBuf, LocateError> {
    let start = start.canonicalize()?;
    let mut current = start.as_path();

    loop {
        if current.join(VCS_DIR).is_dir() {
            return Ok(current.to_path_buf());
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return Err(LocateError::RootNotFound(start.clone())),
        }
    }
}
