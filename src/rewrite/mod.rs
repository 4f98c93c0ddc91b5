use std::path::Path;

pub mod imports;
pub mod rules;

pub use imports::{ImportOutcome, LoggerImport, ensure_logger_import};
pub use rules::{CallShape, Quote, Rewrite, Rewriter};

/// Result of converting one file's text in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEdit {
    pub text: String,
    pub import: ImportOutcome,
    /// Substitutions performed by the rules, not the line-count delta.
    pub rule_hits: usize,
}

impl FileEdit {
    pub fn changed_from(&self, original: &str) -> bool {
        self.text != original
    }
}

/// Import insertion followed by rule rewriting. No I/O.
pub fn convert_source(
    text: &str,
    path: &Path,
    importer: &LoggerImport,
    rewriter: &Rewriter,
) -> FileEdit {
    let (with_import, import) = importer.ensure(text, path);
    let Rewrite { text, replacements } = rewriter.apply(&with_import);
    FileEdit {
        text,
        import,
        rule_hits: replacements,
    }
}
