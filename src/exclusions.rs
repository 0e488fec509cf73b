//! Static exclusion sets consulted while walking the tree.
//!
//! Directories are pruned by basename (at any depth) or by their full path
//! relative to the scanned root. Files are skipped by basename, compared
//! case-insensitively.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Directory basenames that are never descended into, wherever they appear.
pub const DEFAULT_EXCLUDED_NAMES: &[&str] = &[
    "node_modules",
    ".git",
    ".next",
    "dist",
    "build",
    ".angular",
    ".github",
    "storage",
    "__pycache__",
    ".svelte-kit",
    "venv",
    ".venv",
];

/// Root-relative directory paths that are pruned together with everything below them.
pub const DEFAULT_EXCLUDED_PATHS: &[&str] = &["frontend/.svelte-kit"];

/// File basenames skipped in every directory (case-insensitive).
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &[
    "package-lock.json",
    "package.json",
    "repo_files.md",
    "repo_files.json",
    "README.md",
    "NEON.md",
    "DATABASE.md",
    "AGENT.md",
    "latest.dump",
    "traverse_markdown.py",
    "heroku_db.dump",
    "traverse.py",
];

/// The immutable exclusion configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionRules {
    pub names: BTreeSet<String>,
    pub paths: BTreeSet<String>,
    pub files: BTreeSet<String>,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self {
            names: DEFAULT_EXCLUDED_NAMES.iter().map(|s| s.to_string()).collect(),
            paths: DEFAULT_EXCLUDED_PATHS.iter().map(|s| s.to_string()).collect(),
            files: DEFAULT_EXCLUDED_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ExclusionRules {
    /// Rules that exclude nothing.
    pub fn empty() -> Self {
        Self {
            names: BTreeSet::new(),
            paths: BTreeSet::new(),
            files: BTreeSet::new(),
        }
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths
            .extend(paths.into_iter().map(|p| normalize(&p.into())));
        self
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(files.into_iter().map(Into::into));
        self
    }

    /// Decides whether the directory at `rel_dir` (relative to the scanned
    /// root, `/` or `\` separated) must be pruned.
    ///
    /// Path entries match the directory itself and its descendants on whole
    /// segments, so `frontend/.svelte-kit` does not match
    /// `frontend/.svelte-kit-old`.
    pub fn is_dir_excluded(&self, rel_dir: &str) -> bool {
        let rel = normalize(rel_dir);
        if rel.is_empty() || rel == "." {
            return false;
        }
        let by_path = self.paths.iter().any(|p| {
            rel == *p
                || rel
                    .strip_prefix(p.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        });
        if by_path {
            return true;
        }
        let basename = rel.rsplit('/').next().unwrap_or(&rel);
        self.names.contains(basename)
    }

    /// Decides whether a file with basename `file_name` is skipped.
    pub fn is_file_excluded(&self, file_name: &str) -> bool {
        let lowered = file_name.to_lowercase();
        self.files.iter().any(|f| f.to_lowercase() == lowered)
    }
}

/// Forward slashes, no leading `./`, no trailing slash.
fn normalize(path: &str) -> String {
    let replaced = path.replace('\\', "/");
    let trimmed = replaced.trim_end_matches('/');
    trimmed.strip_prefix("./").unwrap_or(trimmed).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excludes_names_at_any_depth() {
        let rules = ExclusionRules::default();
        assert!(rules.is_dir_excluded("node_modules"));
        assert!(rules.is_dir_excluded("packages/web/node_modules"));
        assert!(rules.is_dir_excluded("a/b/c/__pycache__/"));
        assert!(!rules.is_dir_excluded("src/node_modules_helpers"));
    }

    #[test]
    fn excludes_full_paths_and_descendants_on_segment_boundaries() {
        let rules = ExclusionRules::empty().with_paths(["frontend/generated"]);
        assert!(rules.is_dir_excluded("frontend/generated"));
        assert!(rules.is_dir_excluded("frontend/generated/deep/er"));
        assert!(!rules.is_dir_excluded("frontend/generated-old"));
        assert!(!rules.is_dir_excluded("other/frontend/generated"));
        assert!(!rules.is_dir_excluded("frontend"));
    }

    #[test]
    fn windows_separators_are_normalized() {
        let rules = ExclusionRules::empty().with_paths(["frontend\\generated\\"]);
        assert!(rules.is_dir_excluded("frontend\\generated\\x"));
    }

    #[test]
    fn default_names_are_distinct_entries() {
        let rules = ExclusionRules::default();
        assert!(rules.is_dir_excluded(".svelte-kit"));
        assert!(rules.is_dir_excluded("venv"));
        assert!(!rules.is_dir_excluded(".svelte-kitvenv"));
    }

    #[test]
    fn root_is_never_excluded() {
        let rules = ExclusionRules::default();
        assert!(!rules.is_dir_excluded(""));
        assert!(!rules.is_dir_excluded("./"));
    }

    #[test]
    fn file_names_match_case_insensitively() {
        let rules = ExclusionRules::default();
        assert!(rules.is_file_excluded("readme.md"));
        assert!(rules.is_file_excluded("README.MD"));
        assert!(rules.is_file_excluded("Package.json"));
        assert!(!rules.is_file_excluded("README.txt"));
    }
}
