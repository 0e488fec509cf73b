//! Command-line interface for repodump.
//!
//! Walks a directory tree and writes every included file into one Markdown
//! report.

use clap::Parser;
#[cfg(feature = "progress")]
use repodump::IndicatifProgress;
use repodump::{
    BinaryDetection, NoOpProgress, ProgressReporter, RepodumpError, ReportBuilder, ReportOptions,
    run,
};
use std::path::PathBuf;
use std::process::exit;
use tracing_subscriber::EnvFilter;

/// repodump — snapshot a source tree into a single Markdown file
#[derive(Parser)]
#[command(name = "repodump", version, about, long_about = None)]
struct Cli {
    /// Root directory (default current dir)
    root: Option<PathBuf>,

    /// Output file (default repo_files.md)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Files larger than this many bytes have their content omitted (default 2 MiB)
    #[arg(long)]
    max_file_size: Option<u64>,

    /// Binary detection strategy: none, simple or accurate
    #[arg(long, value_parser = parse_binary_detection)]
    binary_detection: Option<BinaryDetection>,

    /// Glob patterns to ignore, matched against root-relative paths (can be repeated)
    #[arg(short = 'I', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Extra directory name to exclude at any depth (can be repeated)
    #[arg(long = "exclude-name")]
    exclude_names: Vec<String>,

    /// Extra root-relative directory path to exclude (can be repeated)
    #[arg(long = "exclude-path")]
    exclude_paths: Vec<String>,

    /// Extra file name to exclude, case-insensitive (can be repeated)
    #[arg(long = "exclude-file")]
    exclude_files: Vec<String>,

    /// Respect .gitignore files
    #[arg(long)]
    gitignore: bool,

    /// Follow symlinks
    #[arg(long)]
    follow_links: bool,

    /// Add size, modification time and last commit to every section
    #[arg(long)]
    git_metadata: bool,

    /// JSON file with default options; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log per-file decisions
    #[arg(short, long)]
    verbose: bool,
}

/// Parse string into BinaryDetection enum.
fn parse_binary_detection(s: &str) -> Result<BinaryDetection, String> {
    match s {
        "none" => Ok(BinaryDetection::None),
        "simple" => Ok(BinaryDetection::Simple),
        "accurate" => Ok(BinaryDetection::Accurate),
        _ => Err(format!("invalid binary detection method: {}", s)),
    }
}

impl Cli {
    fn into_options(self) -> Result<ReportOptions, RepodumpError> {
        let base = match &self.config {
            Some(path) => ReportOptions::from_json_file(path)?,
            None => ReportOptions::default(),
        };
        let mut builder = ReportBuilder::from_options(base)
            .exclude_names(self.exclude_names)
            .exclude_paths(self.exclude_paths)
            .exclude_files(self.exclude_files);

        if let Some(root) = self.root {
            builder = builder.root(root);
        }
        if let Some(output) = self.output {
            builder = builder.output(output);
        }
        if let Some(bytes) = self.max_file_size {
            builder = builder.max_file_size(bytes);
        }
        if let Some(method) = self.binary_detection {
            builder = builder.binary_detection(method);
        }
        if !self.ignore_patterns.is_empty() {
            builder = builder.ignore_patterns(self.ignore_patterns);
        }
        if self.gitignore {
            builder = builder.respect_gitignore(true);
        }
        if self.follow_links {
            builder = builder.follow_links(true);
        }
        if self.git_metadata {
            builder = builder.git_metadata(true);
        }
        Ok(builder.build())
    }
}

fn setup_logging(quiet: bool, verbose: bool) {
    let default = if quiet {
        "warn"
    } else if verbose {
        "debug,ignore=warn,globset=warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn progress_reporter(disabled: bool) -> Box<dyn ProgressReporter> {
    if disabled {
        return Box::new(NoOpProgress);
    }
    terminal_progress()
}

#[cfg(feature = "progress")]
fn terminal_progress() -> Box<dyn ProgressReporter> {
    Box::new(IndicatifProgress::new())
}

#[cfg(not(feature = "progress"))]
fn terminal_progress() -> Box<dyn ProgressReporter> {
    Box::new(NoOpProgress)
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.quiet, cli.verbose);
    let progress = progress_reporter(cli.no_progress);

    let options = match cli.into_options() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    match run(&options, progress.as_ref()) {
        Ok(summary) => {
            println!("\nReport saved: {}", options.output.display());
            println!("Files processed: {}", summary.files);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}
