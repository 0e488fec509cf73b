use crate::metadata::FileMetadata;
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// How a candidate file will be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Text,
    Binary,
    Oversized,
}

/// A file that survived the exclusion rules, about to become a [`Section`].
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// The path on disk.
    pub path: PathBuf,
    /// The path relative to the scanned root, `/` separated.
    pub relative_path: String,
    pub size: u64,
    pub classification: Classification,
    /// Fence tag, empty when the extension is unknown.
    pub language: &'static str,
}

/// Why a file's content was left out of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Binary,
    TooLarge,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Binary => "binary",
            SkipReason::TooLarge => "too large",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    /// The whole file, lossily decoded as UTF-8.
    Content { language: &'static str, text: String },
    Skipped(SkipReason),
    /// Reading failed after the file was discovered; holds the error message.
    ReadError(String),
}

/// The rendered unit of the report: one per included file.
#[derive(Debug, Clone)]
pub struct Section {
    pub relative_path: String,
    /// Only collected when git metadata was requested.
    pub metadata: Option<FileMetadata>,
    pub body: SectionBody,
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub files: usize,
    pub text: usize,
    pub binary: usize,
    pub too_large: usize,
    pub read_errors: usize,
    pub excluded_dirs: usize,
    pub walk_errors: usize,
}

impl Summary {
    pub(crate) fn record(&mut self, body: &SectionBody) {
        self.files += 1;
        match body {
            SectionBody::Content { .. } => self.text += 1,
            SectionBody::Skipped(SkipReason::Binary) => self.binary += 1,
            SectionBody::Skipped(SkipReason::TooLarge) => self.too_large += 1,
            SectionBody::ReadError(_) => self.read_errors += 1,
        }
    }
}

/// Everything needed to assemble the output document.
#[derive(Debug, Clone)]
pub struct Report {
    pub generated_at: DateTime<Local>,
    /// In traversal order.
    pub sections: Vec<Section>,
    pub summary: Summary,
}
