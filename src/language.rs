//! Extension to fenced-block language label lookup.

use std::path::Path;

/// Returns the label used to tag the fenced block of `path`, or `""` when the
/// extension is unknown (the block is then left untagged).
pub fn language_for_path(path: impl AsRef<Path>) -> &'static str {
    let ext = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    language_from_extension(&ext)
}

/// Looks up an already lowercased extension without the leading dot.
pub fn language_from_extension(ext: &str) -> &'static str {
    match ext {
        "py" | "pyi" => "python",
        "js" | "jsx" | "mjs" | "cjs" => "javascript",
        "ts" | "tsx" | "mts" | "cts" => "typescript",
        "html" | "htm" => "html",
        "css" => "css",
        "scss" => "scss",
        "json" => "json",
        "md" | "markdown" => "markdown",
        "yml" | "yaml" => "yaml",
        "toml" => "toml",
        "xml" => "xml",
        "sh" | "bash" => "bash",
        "svelte" => "svelte",
        "vue" => "vue",
        "sql" => "sql",
        "rs" => "rust",
        "go" => "go",
        "rb" => "ruby",
        "php" => "php",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "scala" => "scala",
        "swift" => "swift",
        "dart" => "dart",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" => "cpp",
        "cs" => "csharp",
        "txt" => "text",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions() {
        assert_eq!(language_for_path("a/b.py"), "python");
        assert_eq!(language_for_path("app/page.tsx"), "typescript");
        assert_eq!(language_for_path("next.config.js"), "javascript");
        assert_eq!(language_for_path("App.svelte"), "svelte");
    }

    #[test]
    fn extension_case_is_ignored() {
        assert_eq!(language_for_path("SCRIPT.PY"), "python");
        assert_eq!(language_for_path("Index.Html"), "html");
    }

    #[test]
    fn unknown_or_missing_extension_is_untagged() {
        assert_eq!(language_for_path("data.xyz"), "");
        assert_eq!(language_for_path("Makefile"), "");
        assert_eq!(language_for_path(".env"), "");
    }
}
