//! Marker file resolution.
//!
//! Decides which hidden file inside a directory receives the next graffiti
//! line. Two policies exist, selected once at run start:
//!
//! - [`MarkerPolicy::AlwaysCreate`]: folder marks get a fresh random hidden
//!   name; file marks get a name derived from the adjacent file
//!   (`.{basename}.mark`), appending if that name already exists.
//! - [`MarkerPolicy::ReuseOrCreate`]: any mark in a directory appends to a
//!   uniformly chosen existing hidden regular file, creating a random one
//!   only when none exist. Folder and file marks share the selection pool.
//!
//! Both policies resolve to a single hidden filename joined onto the
//! directory being processed, so the target can never escape that
//! directory, never names a subdirectory, and never collides with a
//! non-hidden file.

use rand::Rng;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Suffix for file-adjacent markers under the always-create policy.
pub const MARKER_SUFFIX: &str = ".mark";

const FOLDER_TAG_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPolicy {
    AlwaysCreate,
    ReuseOrCreate,
}

#[derive(Debug, thiserror::Error)]
pub enum MarkerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("file name is not valid UTF-8: {}", .0.display())]
    BadFileName(PathBuf),
}

/// Resolve the marker path for a folder-level mark in `dir`.
pub fn folder_marker<R: Rng>(
    dir: &Path,
    policy: MarkerPolicy,
    rng: &mut R,
) -> Result<PathBuf, MarkerError> {
    match policy {
        MarkerPolicy::AlwaysCreate => {
            Ok(dir.join(format!(".{}", random_lowercase(rng, FOLDER_TAG_LEN))))
        }
        MarkerPolicy::ReuseOrCreate => reuse_or_create(dir, rng),
    }
}

/// Resolve the marker path for a mark adjacent to `file_name` inside `dir`.
pub fn file_marker<R: Rng>(
    dir: &Path,
    file_name: &OsStr,
    policy: MarkerPolicy,
    rng: &mut R,
) -> Result<PathBuf, MarkerError> {
    match policy {
        MarkerPolicy::AlwaysCreate => {
            let name = file_name
                .to_str()
                .ok_or_else(|| MarkerError::BadFileName(dir.join(file_name)))?;
            Ok(dir.join(format!(".{name}{MARKER_SUFFIX}")))
        }
        MarkerPolicy::ReuseOrCreate => reuse_or_create(dir, rng),
    }
}

fn reuse_or_create<R: Rng>(dir: &Path, rng: &mut R) -> Result<PathBuf, MarkerError> {
    let hidden = hidden_regular_files(dir)?;
    if hidden.is_empty() {
        let len = rng.random_range(4..=8);
        Ok(dir.join(format!(".{}", random_lowercase(rng, len))))
    } else {
        Ok(hidden[rng.random_range(0..hidden.len())].clone())
    }
}

/// List hidden regular files directly inside `dir`, sorted by name.
///
/// Directories and symlinks are never selectable as marker targets.
fn hidden_regular_files(dir: &Path) -> Result<Vec<PathBuf>, MarkerError> {
    let mut hidden = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let is_hidden = name.as_encoded_bytes().starts_with(b".");
        if is_hidden && entry.file_type()?.is_file() {
            hidden.push(entry.path());
        }
    }

    hidden.sort();
    Ok(hidden)
}

fn random_lowercase<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'a' + rng.random_range(0..26u8)))
        .collect()
}
