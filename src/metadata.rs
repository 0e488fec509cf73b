//! Optional per-file metadata: size, modification time and the last commit
//! touching the file.
//!
//! Lookups never fail. Anything that goes wrong is recorded as
//! [`GitMetadata::Unknown`] with the reason, and rendered as `N/A`.

use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommit {
    pub hash: String,
    pub author: String,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownReason {
    /// `git` could not be spawned.
    Unavailable,
    /// `git` exited unsuccessfully, e.g. outside a repository.
    CommandFailed,
    /// No commit touches the file.
    NotTracked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitMetadata {
    Known(GitCommit),
    Unknown(UnknownReason),
}

impl GitMetadata {
    pub fn commit(&self) -> Option<&GitCommit> {
        match self {
            GitMetadata::Known(commit) => Some(commit),
            GitMetadata::Unknown(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub size: u64,
    pub modified: Option<DateTime<Local>>,
    pub git: GitMetadata,
}

/// Collects metadata for `path`, whose root-relative form is `relative_path`.
pub fn file_metadata(root: &Path, path: &Path, relative_path: &str, size: u64) -> FileMetadata {
    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(DateTime::<Local>::from);
    FileMetadata {
        size,
        modified,
        git: git_metadata(root, relative_path),
    }
}

/// Asks `git log` for the last commit touching `relative_path`, running
/// inside `root`.
pub fn git_metadata(root: &Path, relative_path: &str) -> GitMetadata {
    let output = Command::new("git")
        .args(["log", "-1", "--pretty=format:%H|%an|%ad", "--", relative_path])
        .current_dir(root)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output();
    let output = match output {
        Ok(output) => output,
        Err(e) => {
            debug!("git unavailable for {}: {}", relative_path, e);
            return GitMetadata::Unknown(UnknownReason::Unavailable);
        }
    };
    if !output.status.success() {
        debug!("git log failed for {} ({})", relative_path, output.status);
        return GitMetadata::Unknown(UnknownReason::CommandFailed);
    }
    parse_log_line(&String::from_utf8_lossy(&output.stdout))
}

fn parse_log_line(line: &str) -> GitMetadata {
    let mut parts = line.trim().splitn(3, '|');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(hash), Some(author), Some(date)) if !hash.is_empty() => {
            GitMetadata::Known(GitCommit {
                hash: hash.to_string(),
                author: author.to_string(),
                date: date.to_string(),
            })
        }
        _ => GitMetadata::Unknown(UnknownReason::NotTracked),
    }
}
