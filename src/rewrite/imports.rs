use crate::config::LoggerTarget;
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

/// Single-line `const x = require(...);` declarations, the only insertion anchors.
static REQUIRE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^const .+ = require\(.+\);$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The file already requires the logger module.
    AlreadyPresent,
    Inserted { spec: String },
    /// No single-line `const ... = require(...);` to anchor on; text left as is.
    NoAnchor,
}

/// Directories between `tree_root` and `file`.
///
/// Both paths are made absolute first, so a relative tree root works with
/// absolute file paths and vice versa. `src/a.js` under tree root `.` is one
/// level deep. Paths outside the tree root fall back to their own directory
/// count.
pub fn import_depth(file: &Path, tree_root: &Path) -> usize {
    fn absolute(p: &Path) -> PathBuf {
        std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf())
    }
    fn normal(p: &Path) -> Vec<Component<'_>> {
        p.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    }
    let file_abs = absolute(file);
    let root_abs = absolute(tree_root);
    let file_parts = normal(&file_abs);
    let root_parts = normal(&root_abs);
    let rel = if file_parts.starts_with(&root_parts) {
        &file_parts[root_parts.len()..]
    } else {
        tracing::debug!(
            "{} is outside tree root {}, counting from its own path",
            file.display(),
            tree_root.display()
        );
        &file_parts[..]
    };
    rel.iter()
        .filter(|c| matches!(c, Component::Normal(_)))
        .count()
        .saturating_sub(1)
}

/// Module specifier used in the inserted `require`, e.g. `../utils/logger`.
///
/// Always relative: a bare `utils/logger` would resolve through node_modules.
pub fn logger_spec(file: &Path, target: &LoggerTarget) -> String {
    match import_depth(file, &target.tree_root) {
        0 => format!("./{}", target.module),
        depth => format!("{}{}", "../".repeat(depth), target.module),
    }
}

/// Import insertion for one logger target; the reference matcher is built once.
#[derive(Debug, Clone)]
pub struct LoggerImport {
    target: LoggerTarget,
    existing: Regex,
}

impl LoggerImport {
    pub fn new(target: &LoggerTarget) -> Self {
        let m = regex::escape(&target.module);
        let existing = Regex::new(&format!(
            r#"require\(\s*(?:'(?:\.{{1,2}}/)*{m}(?:\.js)?'|"(?:\.{{1,2}}/)*{m}(?:\.js)?")\s*\)"#
        ))
        .unwrap();
        Self {
            target: target.clone(),
            existing,
        }
    }

    pub fn has_reference(&self, text: &str) -> bool {
        self.existing.is_match(text)
    }

    /// Make sure `text` requires the logger, inserting after the last
    /// single-line require declaration when it does not.
    pub fn ensure(&self, text: &str, file: &Path) -> (String, ImportOutcome) {
        if self.has_reference(text) {
            return (text.to_string(), ImportOutcome::AlreadyPresent);
        }

        let Some(last) = REQUIRE_LINE.find_iter(text).last() else {
            return (text.to_string(), ImportOutcome::NoAnchor);
        };

        let spec = logger_spec(file, &self.target);
        let line = format!("\nconst {} = require('{}');", self.target.binding, spec);
        let mut out = String::with_capacity(text.len() + line.len());
        out.push_str(&text[..last.end()]);
        out.push_str(&line);
        out.push_str(&text[last.end()..]);
        (out, ImportOutcome::Inserted { spec })
    }
}

/// One-off form of [`LoggerImport::ensure`].
pub fn ensure_logger_import(
    text: &str,
    file: &Path,
    target: &LoggerTarget,
) -> (String, ImportOutcome) {
    LoggerImport::new(target).ensure(text, file)
}
