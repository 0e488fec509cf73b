use repodump::{NoOpProgress, ReportBuilder, RepodumpError, output, run, scan};
use std::fs;
use tempfile::tempdir;

/// Pulls the fenced content of the section for `rel` out of a rendered report.
fn fenced_content(doc: &str, rel: &str) -> Option<String> {
    let heading = format!("## `{}`\n", rel);
    let start = doc.find(&heading)? + heading.len();
    let section = &doc[start..];
    let section = section.split(output::SECTION_SEPARATOR).next()?;
    let after_marker = section.split_once("### Content\n")?.1;
    let (fence_line, rest) = after_marker.split_once('\n')?;
    let fence: String = fence_line.chars().take_while(|c| *c == '`').collect();
    let closing = format!("\n{}", fence);
    let end = rest.rfind(&closing)?;
    Some(rest[..end].to_string())
}

#[test]
fn integration_full_flow() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("a")).unwrap();
    fs::create_dir_all(dir.path().join("node_modules")).unwrap();
    fs::write(dir.path().join("a/b.py"), "print(1)").unwrap();
    fs::write(dir.path().join("node_modules/c.js"), "console.log(1)").unwrap();
    fs::write(dir.path().join("README.md"), "# readme").unwrap();

    let out = dir.path().join("report.md");
    let options = ReportBuilder::new(dir.path()).output(&out).build();
    let summary = run(&options, &NoOpProgress).unwrap();
    assert_eq!(summary.files, 1);

    let doc = fs::read_to_string(&out).unwrap();
    assert!(doc.starts_with("# Repository File Report\n\n*Generated: "));
    assert_eq!(doc.matches("\n## `").count(), 1);
    assert!(doc.contains("## `a/b.py`\n\n### Content\n```python\nprint(1)\n```"));
    assert!(!doc.contains("c.js"));
    assert!(!doc.contains("README.md"));
}

#[test]
fn content_round_trips_verbatim() {
    let dir = tempdir().unwrap();
    let samples = [
        ("plain.txt", "line one\nline two\n"),
        ("no_newline.rs", "fn main() {}"),
        ("fences.md", "```rust\nlet x = 1;\n```\n\n````\nnested\n````\n"),
        ("unicode.py", "print('héllo wörld ✓')\r\n"),
        ("blank.txt", "\n\n\n"),
    ];
    for (name, content) in samples {
        fs::write(dir.path().join(name), content).unwrap();
    }
    let options = ReportBuilder::new(dir.path()).build();
    let report = scan(&options, &NoOpProgress).unwrap();
    let doc = output::render_document(&report);
    for (name, content) in samples {
        assert_eq!(
            fenced_content(&doc, name).as_deref(),
            Some(content),
            "content of {name} changed"
        );
    }
}

#[test]
fn oversized_files_never_leak_content() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("big.txt"), "SECRET-TEXT ".repeat(20)).unwrap();
    let options = ReportBuilder::new(dir.path()).max_file_size(16).build();
    let report = scan(&options, &NoOpProgress).unwrap();
    let doc = output::render_document(&report);
    assert!(doc.contains("```\n<< Skipped: too large >>\n```"));
    assert!(!doc.contains("SECRET-TEXT"));
}

#[test]
fn unknown_extension_renders_untagged_fence() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("data.xyz"), "payload").unwrap();
    let options = ReportBuilder::new(dir.path()).build();
    let doc = output::render_document(&scan(&options, &NoOpProgress).unwrap());
    assert!(doc.contains("## `data.xyz`\n\n### Content\n```\npayload\n```"));
}

#[test]
fn rerun_overwrites_and_skips_previous_report() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("main.go"), "package main").unwrap();
    let out = dir.path().join("snapshot.md");
    fs::write(&out, "stale contents").unwrap();
    let options = ReportBuilder::new(dir.path()).output(&out).build();

    run(&options, &NoOpProgress).unwrap();
    let summary = run(&options, &NoOpProgress).unwrap();
    assert_eq!(summary.files, 1);

    let doc = fs::read_to_string(&out).unwrap();
    assert!(!doc.contains("stale contents"));
    assert!(!doc.contains("## `snapshot.md`"));
    assert!(doc.contains("```go\npackage main\n```"));
}

#[test]
fn output_elsewhere_keeps_same_named_files_in_tree() {
    let dir = tempdir().unwrap();
    let elsewhere = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/notes.md"), "keep me").unwrap();
    let out = elsewhere.path().join("notes.md");
    let options = ReportBuilder::new(dir.path()).output(&out).build();

    let summary = run(&options, &NoOpProgress).unwrap();
    assert_eq!(summary.files, 1);
    let doc = fs::read_to_string(&out).unwrap();
    assert!(doc.contains("## `src/notes.md`\n\n### Content\n```markdown\nkeep me\n```"));
}

#[test]
fn git_metadata_adds_table_without_failing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("tool.sh"), "echo hi").unwrap();
    let options = ReportBuilder::new(dir.path()).git_metadata(true).build();
    let report = scan(&options, &NoOpProgress).unwrap();
    let doc = output::render_document(&report);
    assert!(doc.contains("| Size | 7 bytes |"));
    assert!(doc.contains("| Git Commit |"));
    assert!(doc.contains("```bash\necho hi\n```"));
}

#[test]
fn gitignore_is_opt_in() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".gitignore"), "*.tmp\n").unwrap();
    fs::write(dir.path().join("keep.txt"), "k").unwrap();
    fs::write(dir.path().join("scratch.tmp"), "s").unwrap();

    let default = scan(&ReportBuilder::new(dir.path()).build(), &NoOpProgress).unwrap();
    assert!(default.sections.iter().any(|s| s.relative_path == "scratch.tmp"));

    let options = ReportBuilder::new(dir.path()).respect_gitignore(true).build();
    let filtered = scan(&options, &NoOpProgress).unwrap();
    assert!(!filtered.sections.iter().any(|s| s.relative_path == "scratch.tmp"));
    assert!(filtered.sections.iter().any(|s| s.relative_path == "keep.txt"));
}

#[test]
fn unwritable_output_is_fatal() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    let options = ReportBuilder::new(dir.path())
        .output(dir.path().join("missing/dir/report.md"))
        .build();
    let err = run(&options, &NoOpProgress).unwrap_err();
    assert!(matches!(err, RepodumpError::Output { .. }));
}
