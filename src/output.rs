//! Markdown rendering of a [`Report`].
//!
//! The document is a title, a generation timestamp, and one section per file
//! separated by horizontal rules. Every section wraps its content in a fence
//! that is longer than any backtick run inside it, so the embedded text can
//! always be recovered verbatim.

use crate::metadata::FileMetadata;
use crate::types::{Report, Section, SectionBody};
use crate::RepodumpError;
use std::fs;
use std::path::Path;

pub const DOCUMENT_TITLE: &str = "# Repository File Report";
pub const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Builds the whole document in memory.
pub fn render_document(report: &Report) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(DOCUMENT_TITLE);
    out.push_str("\n\n");
    out.push_str(&format!(
        "*Generated: {}*\n\n",
        report.generated_at.to_rfc3339()
    ));
    let sections: Vec<String> = report.sections.iter().map(render_section).collect();
    out.push_str(&sections.join(SECTION_SEPARATOR));
    if !sections.is_empty() {
        out.push('\n');
    }
    out
}

/// Writes the rendered document to `path`, replacing any existing file.
pub fn write_report(report: &Report, path: impl AsRef<Path>) -> Result<(), RepodumpError> {
    let path = path.as_ref();
    fs::write(path, render_document(report)).map_err(|e| RepodumpError::output(path, e))
}

pub fn render_section(section: &Section) -> String {
    let mut lines = vec![format!("## `{}`\n", section.relative_path)];
    if let Some(metadata) = &section.metadata {
        lines.extend(metadata_table(metadata));
    }
    let (language, text) = match &section.body {
        SectionBody::Content { language, text } => (*language, text.clone()),
        SectionBody::Skipped(reason) => ("", format!("<< Skipped: {} >>", reason.as_str())),
        SectionBody::ReadError(message) => ("", format!("<< Read error: {} >>", message)),
    };
    let fence = fence_for(&text);
    lines.push(format!("### Content\n{fence}{language}\n{text}\n{fence}"));
    lines.join("\n")
}

fn metadata_table(metadata: &FileMetadata) -> Vec<String> {
    let commit = metadata.git.commit();
    let or_na = |value: Option<&str>| value.unwrap_or("N/A").to_string();
    vec![
        "| Field | Value |".to_string(),
        "|-------|-------|".to_string(),
        format!("| Size | {} bytes |", metadata.size),
        format!(
            "| Last Modified | {} |",
            metadata
                .modified
                .map(|m| m.format("%Y-%m-%dT%H:%M:%S").to_string())
                .unwrap_or_else(|| "N/A".to_string())
        ),
        format!("| Git Commit | `{}` |", or_na(commit.map(|c| c.hash.as_str()))),
        format!("| Git Author | {} |", or_na(commit.map(|c| c.author.as_str()))),
        format!("| Git Date | {} |\n", or_na(commit.map(|c| c.date.as_str()))),
    ]
}

/// Three backticks, or one more than the longest backtick run in `text`.
pub fn fence_for(text: &str) -> String {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{GitCommit, GitMetadata, UnknownReason};
    use crate::types::{SkipReason, Summary};
    use chrono::{Local, TimeZone};

    fn section(body: SectionBody) -> Section {
        Section {
            relative_path: "a/b.py".into(),
            metadata: None,
            body,
        }
    }

    #[test]
    fn content_section_layout() {
        let rendered = render_section(&section(SectionBody::Content {
            language: "python",
            text: "print(1)".into(),
        }));
        assert_eq!(rendered, "## `a/b.py`\n\n### Content\n```python\nprint(1)\n```");
    }

    #[test]
    fn placeholders_are_untagged() {
        let binary = render_section(&section(SectionBody::Skipped(SkipReason::Binary)));
        assert!(binary.ends_with("```\n<< Skipped: binary >>\n```"));
        let large = render_section(&section(SectionBody::Skipped(SkipReason::TooLarge)));
        assert!(large.ends_with("```\n<< Skipped: too large >>\n```"));
        let error = render_section(&section(SectionBody::ReadError("denied".into())));
        assert!(error.ends_with("```\n<< Read error: denied >>\n```"));
    }

    #[test]
    fn fence_outgrows_embedded_backticks() {
        assert_eq!(fence_for("no ticks"), "```");
        assert_eq!(fence_for("a `b` c"), "```");
        assert_eq!(fence_for("```rust\nfn x() {}\n```"), "````");
        assert_eq!(fence_for("`````"), "``````");
    }

    #[test]
    fn metadata_table_uses_na_for_unknown_values() {
        let mut s = section(SectionBody::Content {
            language: "",
            text: "x".into(),
        });
        s.metadata = Some(FileMetadata {
            size: 1,
            modified: None,
            git: GitMetadata::Unknown(UnknownReason::NotTracked),
        });
        let rendered = render_section(&s);
        assert!(rendered.contains("| Size | 1 bytes |"));
        assert!(rendered.contains("| Last Modified | N/A |"));
        assert!(rendered.contains("| Git Commit | `N/A` |"));
        assert!(rendered.contains("| Git Date | N/A |\n\n### Content"));
    }

    #[test]
    fn metadata_table_shows_known_commit() {
        let mut s = section(SectionBody::Skipped(SkipReason::Binary));
        s.metadata = Some(FileMetadata {
            size: 9,
            modified: None,
            git: GitMetadata::Known(GitCommit {
                hash: "deadbeef".into(),
                author: "Ada".into(),
                date: "yesterday".into(),
            }),
        });
        let rendered = render_section(&s);
        assert!(rendered.contains("| Git Commit | `deadbeef` |"));
        assert!(rendered.contains("| Git Author | Ada |"));
    }

    #[test]
    fn document_joins_sections_with_rules() {
        let generated_at = Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let report = Report {
            generated_at,
            sections: vec![
                section(SectionBody::Skipped(SkipReason::Binary)),
                section(SectionBody::Skipped(SkipReason::TooLarge)),
            ],
            summary: Summary::default(),
        };
        let doc = render_document(&report);
        assert!(doc.starts_with("# Repository File Report\n\n*Generated: 2024-05-01T12:00:00"));
        assert_eq!(doc.matches(SECTION_SEPARATOR).count(), 1);
        assert!(doc.ends_with("```\n"));
    }
}
