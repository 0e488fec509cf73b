//! # Repodump
//!
//! `repodump` walks a directory tree, prunes build artifacts, dependency
//! caches and VCS metadata, and writes every remaining file into a single
//! Markdown document. Each file becomes one section holding its relative path
//! and its content in a fenced block tagged with a language guessed from the
//! extension. Binary, oversized and unreadable files keep their section with
//! a placeholder instead of content.
//!
//! The run is sequential: the tree is walked once, excluded directories are
//! never descended into, and files are rendered in traversal order.
//!
//! # Features
//!
//! - `progress` (default): terminal progress bar via `indicatif`.
//!
//! # Example
//!
//! ```no_run
//! use repodump::{ReportBuilder, BinaryDetection, NoOpProgress, scan, output};
//!
//! let options = ReportBuilder::new(".")
//!     .max_file_size(512 * 1024)
//!     .binary_detection(BinaryDetection::Accurate)
//!     .exclude_names(vec!["target".into()])
//!     .build();
//!
//! let report = scan(&options, &NoOpProgress).expect("Failed to scan directory");
//! for section in &report.sections {
//!     println!("{}", section.relative_path);
//! }
//! output::write_report(&report, "snapshot.md").expect("Failed to write report");
//! ```

mod engine;
mod error;
pub mod exclusions;
pub mod language;
pub mod metadata;
mod options;
pub mod output;
pub mod progress;
mod types;

pub use engine::{SNIFF_LEN, classify_file, is_text_file, is_text_head, render_body, run, scan};
pub use error::RepodumpError;
pub use exclusions::ExclusionRules;
pub use options::{
    BinaryDetection, DEFAULT_MAX_FILE_SIZE, DEFAULT_OUTPUT, ReportBuilder, ReportOptions,
};
#[cfg(feature = "progress")]
pub use progress::IndicatifProgress;
pub use progress::{NoOpProgress, ProgressReporter};
pub use types::{
    Classification, FileRecord, Report, Section, SectionBody, SkipReason, Summary,
};
