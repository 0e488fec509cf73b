use crate::error::RepodumpError;
use crate::exclusions::ExclusionRules;
use crate::language::language_for_path;
use crate::metadata::file_metadata;
use crate::options::{BinaryDetection, ReportOptions};
use crate::output::write_report;
use crate::progress::ProgressReporter;
use crate::types::{
    Classification, FileRecord, Report, Section, SectionBody, SkipReason, Summary,
};
use chrono::Local;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

/// Number of leading bytes inspected by the text/binary classifier.
pub const SNIFF_LEN: usize = 512;

/// A file found by the walk that passed every exclusion rule.
struct Candidate {
    path: PathBuf,
    relative_path: String,
}

struct Walker {
    inner: ignore::Walk,
    root: PathBuf,
    rules: Arc<ExclusionRules>,
    /// Canonical location of the report being written, if it can be resolved.
    report_path: Option<PathBuf>,
    excluded_dirs: Arc<AtomicUsize>,
}

impl Walker {
    fn new(options: &ReportOptions, root: &Path) -> Result<Self, RepodumpError> {
        let rules = Arc::new(options.exclusions.clone());
        let matcher = build_matcher(&options.ignore_patterns)?;
        let excluded_dirs = Arc::new(AtomicUsize::new(0));

        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .git_ignore(options.respect_gitignore)
            .require_git(false)
            .follow_links(options.follow_links);

        let prune_root = root.to_path_buf();
        let prune_rules = Arc::clone(&rules);
        let prune_count = Arc::clone(&excluded_dirs);
        // Pruned directories are never read, so nothing below them is visited.
        builder.filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            let rel = relative_path(&prune_root, entry.path());
            if let Some(matcher) = &matcher {
                if matcher.is_match(&rel) {
                    debug!("Ignored by pattern: {}", rel);
                    return false;
                }
            }
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            if is_dir && prune_rules.is_dir_excluded(&rel) {
                info!("Excluded directory: {}/", rel);
                prune_count.fetch_add(1, Ordering::Relaxed);
                return false;
            }
            true
        });

        Ok(Self {
            inner: builder.build(),
            root: root.to_path_buf(),
            rules,
            report_path: resolve_report_path(&options.output),
            excluded_dirs,
        })
    }

    /// Drains the walk, returning the candidates in traversal order plus the
    /// number of entries that could not be read.
    fn collect_candidates(self) -> (Vec<Candidate>, usize, usize) {
        let mut candidates = Vec::new();
        let mut walk_errors = 0;
        for result in self.inner {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    walk_errors += 1;
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }
            let relative_path = relative_path(&self.root, entry.path());
            if !entry.path().is_file() {
                if entry.path_is_symlink() {
                    if let Err(e) = fs::metadata(entry.path()) {
                        warn!("Skipping broken symlink: {}: {}", relative_path, e);
                        walk_errors += 1;
                    }
                }
                continue;
            }
            if self.report_path.as_deref() == Some(entry.path()) {
                debug!("Skipping the report being written: {}", relative_path);
                continue;
            }
            if self
                .rules
                .is_file_excluded(&entry.file_name().to_string_lossy())
            {
                debug!("Excluded file: {}", relative_path);
                continue;
            }
            candidates.push(Candidate {
                path: entry.into_path(),
                relative_path,
            });
        }
        let excluded_dirs = self.excluded_dirs.load(Ordering::Relaxed);
        (candidates, excluded_dirs, walk_errors)
    }
}

/// The output path with its parent directory canonicalized, so it can be
/// compared against walked paths even before the file exists.
fn resolve_report_path(output: &Path) -> Option<PathBuf> {
    let file_name = output.file_name()?;
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::canonicalize(parent).ok().map(|dir| dir.join(file_name))
}

fn build_matcher(patterns: &[String]) -> Result<Option<GlobSet>, RepodumpError> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut glob_builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            RepodumpError::Walk(format!("Invalid glob pattern '{}': {}", pattern, e))
        })?;
        glob_builder.add(glob);
    }
    glob_builder
        .build()
        .map(Some)
        .map_err(|e| RepodumpError::Walk(format!("Failed to build glob set: {}", e)))
}

/// `path` relative to `root`, joined with `/` on every platform.
fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Judges an already read leading block.
pub fn is_text_head(head: &[u8], detection: BinaryDetection) -> bool {
    if head.is_empty() {
        return true;
    }
    match detection {
        // lossy decoding replaces invalid sequences instead of failing
        BinaryDetection::None => true,
        BinaryDetection::Simple => !head.contains(&0),
        BinaryDetection::Accurate => content_inspector::inspect(head).is_text(),
    }
}

/// Reads up to [`SNIFF_LEN`] bytes of `path` and judges them. A file whose
/// head cannot be read is binary.
pub fn is_text_file(path: &Path, detection: BinaryDetection) -> bool {
    let mut head = Vec::with_capacity(SNIFF_LEN);
    let read = File::open(path).and_then(|file| file.take(SNIFF_LEN as u64).read_to_end(&mut head));
    match read {
        Ok(_) => is_text_head(&head, detection),
        Err(e) => {
            debug!("Cannot read head of {}: {}", path.display(), e);
            false
        }
    }
}

/// Stats and classifies one file. The size threshold wins over the content
/// check, so oversized files are never opened.
pub fn classify_file(
    path: &Path,
    relative_path: &str,
    options: &ReportOptions,
) -> io::Result<FileRecord> {
    let size = fs::metadata(path)?.len();
    let classification = if size > options.max_file_size {
        Classification::Oversized
    } else if is_text_file(path, options.binary_detection) {
        Classification::Text
    } else {
        Classification::Binary
    };
    Ok(FileRecord {
        path: path.to_path_buf(),
        relative_path: relative_path.to_string(),
        size,
        classification,
        language: language_for_path(path),
    })
}

/// Produces the body for a classified file. Read failures end up in the
/// body, never in the caller.
pub fn render_body(record: &FileRecord) -> SectionBody {
    match record.classification {
        Classification::Oversized => SectionBody::Skipped(SkipReason::TooLarge),
        Classification::Binary => SectionBody::Skipped(SkipReason::Binary),
        Classification::Text => match fs::read(&record.path) {
            Ok(bytes) => SectionBody::Content {
                language: record.language,
                text: String::from_utf8_lossy(&bytes).into_owned(),
            },
            Err(e) => {
                warn!("Read error: {}: {}", record.relative_path, e);
                SectionBody::ReadError(e.to_string())
            }
        },
    }
}

fn build_section(candidate: Candidate, root: &Path, options: &ReportOptions) -> Section {
    match classify_file(&candidate.path, &candidate.relative_path, options) {
        Ok(record) => {
            debug!(
                "{} ({} bytes) classified as {:?}",
                record.relative_path, record.size, record.classification
            );
            let metadata = options.git_metadata.then(|| {
                file_metadata(root, &record.path, &record.relative_path, record.size)
            });
            Section {
                body: render_body(&record),
                relative_path: record.relative_path,
                metadata,
            }
        }
        Err(e) => {
            warn!("Read error: {}: {}", candidate.relative_path, e);
            Section {
                relative_path: candidate.relative_path,
                metadata: None,
                body: SectionBody::ReadError(e.to_string()),
            }
        }
    }
}

fn resolve_root(root: &Path) -> Result<PathBuf, RepodumpError> {
    let resolved = fs::canonicalize(root)
        .map_err(|e| RepodumpError::InvalidPath(format!("{}: {}", root.display(), e)))?;
    if !resolved.is_dir() {
        return Err(RepodumpError::InvalidPath(format!(
            "{} is not a directory",
            root.display()
        )));
    }
    Ok(resolved)
}

/// Walks `options.root` and renders one section per included file, in
/// traversal order.
pub fn scan(
    options: &ReportOptions,
    progress: &dyn ProgressReporter,
) -> Result<Report, RepodumpError> {
    let root = resolve_root(&options.root)?;
    info!("Traversing: {}", root.display());

    let walker = Walker::new(options, &root)?;
    let (candidates, excluded_dirs, walk_errors) = walker.collect_candidates();
    let mut summary = Summary {
        excluded_dirs,
        walk_errors,
        ..Default::default()
    };

    progress.set_length(candidates.len() as u64);
    let mut sections = Vec::with_capacity(candidates.len());
    for (index, candidate) in candidates.into_iter().enumerate() {
        progress.set_message(candidate.relative_path.clone());
        let section = build_section(candidate, &root, options);
        summary.record(&section.body);
        sections.push(section);
        progress.set_position(index as u64 + 1);
    }
    progress.finish_with_message(format!("{} files", summary.files));

    info!(
        "Files processed: {} (text: {}, binary: {}, too large: {}, read errors: {}); excluded directories: {}; walk errors: {}",
        summary.files,
        summary.text,
        summary.binary,
        summary.too_large,
        summary.read_errors,
        summary.excluded_dirs,
        summary.walk_errors
    );
    Ok(Report {
        generated_at: Local::now(),
        sections,
        summary,
    })
}

/// Scans and writes the report to `options.output`, replacing any existing
/// file.
pub fn run(
    options: &ReportOptions,
    progress: &dyn ProgressReporter,
) -> Result<Summary, RepodumpError> {
    let report = scan(options, progress)?;
    write_report(&report, &options.output)?;
    info!("Report saved: {}", options.output.display());
    Ok(report.summary)
}
