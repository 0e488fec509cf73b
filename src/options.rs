use crate::error::RepodumpError;
use crate::exclusions::ExclusionRules;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Files larger than this are listed but their content is omitted.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 2 * 1024 * 1024;
pub const DEFAULT_OUTPUT: &str = "repo_files.md";

/// How the leading block of a file is judged once it has been read.
///
/// A head that cannot be read always counts as binary, and an empty file
/// always counts as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryDetection {
    /// Lossy UTF-8 decoding, which accepts any readable head.
    #[default]
    None,
    /// A NUL byte in the head marks the file as binary.
    Simple,
    /// Delegates to `content_inspector`.
    Accurate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    pub root: PathBuf,
    pub output: PathBuf,
    pub max_file_size: u64,
    pub binary_detection: BinaryDetection,
    pub exclusions: ExclusionRules,
    pub ignore_patterns: Vec<String>,
    pub respect_gitignore: bool,
    pub follow_links: bool,
    pub git_metadata: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_OUTPUT),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            binary_detection: BinaryDetection::None,
            exclusions: ExclusionRules::default(),
            ignore_patterns: Vec::new(),
            respect_gitignore: false,
            follow_links: false,
            git_metadata: false,
        }
    }
}

impl ReportOptions {
    /// Loads options from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RepodumpError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| RepodumpError::io(path, e))?;
        serde_json::from_str(&raw).map_err(|e| RepodumpError::config(path, e))
    }
}

#[derive(Debug, Default)]
pub struct ReportBuilder {
    options: ReportOptions,
}

impl ReportBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: ReportOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    /// Starts from already loaded options, e.g. a config file.
    pub fn from_options(options: ReportOptions) -> Self {
        Self { options }
    }
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.options.root = root.into();
        self
    }
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.output = path.into();
        self
    }
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.options.max_file_size = bytes;
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.options.binary_detection = method;
        self
    }
    pub fn exclusions(mut self, rules: ExclusionRules) -> Self {
        self.options.exclusions = rules;
        self
    }
    pub fn exclude_names(mut self, names: Vec<String>) -> Self {
        self.options.exclusions = self.options.exclusions.with_names(names);
        self
    }
    pub fn exclude_paths(mut self, paths: Vec<String>) -> Self {
        self.options.exclusions = self.options.exclusions.with_paths(paths);
        self
    }
    pub fn exclude_files(mut self, files: Vec<String>) -> Self {
        self.options.exclusions = self.options.exclusions.with_files(files);
        self
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }
    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.options.respect_gitignore = yes;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn git_metadata(mut self, yes: bool) -> Self {
        self.options.git_metadata = yes;
        self
    }
    pub fn build(self) -> ReportOptions {
        self.options
    }
}
