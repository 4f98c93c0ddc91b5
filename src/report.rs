use crate::rewrite::ImportOutcome;
use crate::verification::Remaining;
use std::fmt;
use std::path::PathBuf;

/// What happened to one candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub import: ImportOutcome,
    pub rule_hits: usize,
    /// Lines with console calls before and after conversion.
    pub before: usize,
    pub after: usize,
    /// The after-count query failed and `after` was taken from the new text.
    pub count_failed: bool,
}

impl FileOutcome {
    pub fn removed(&self) -> usize {
        self.before.saturating_sub(self.after)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunTotals {
    pub files_processed: usize,
    pub imports_added: usize,
    /// Sum of before/after line-count deltas.
    pub replacements: usize,
    pub rule_hits: usize,
    pub query_failures: usize,
    pub file_errors: usize,
}

impl RunTotals {
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.files_processed += 1;
        if matches!(outcome.import, ImportOutcome::Inserted { .. }) {
            self.imports_added += 1;
        }
        self.replacements += outcome.removed();
        self.rule_hits += outcome.rule_hits;
        if outcome.count_failed {
            self.query_failures += 1;
        }
    }
}

/// Human-readable end-of-run summary.
pub struct Summary<'a> {
    pub totals: &'a RunTotals,
    pub remaining: &'a Remaining,
    pub dry_run: bool,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.totals;
        if self.dry_run {
            writeln!(f, "Dry run complete (no files written)")?;
        } else {
            writeln!(f, "Complete!")?;
        }
        writeln!(f, "   Files processed: {}", t.files_processed)?;
        writeln!(f, "   Logger imports added: {}", t.imports_added)?;
        writeln!(f, "   Total replacements: {}", t.replacements)?;
        if t.rule_hits != t.replacements {
            writeln!(f, "   Rule substitutions: {}", t.rule_hits)?;
        }
        if t.query_failures > 0 {
            writeln!(f, "   Count queries failed: {}", t.query_failures)?;
        }
        if t.file_errors > 0 {
            writeln!(f, "   Files skipped on error: {}", t.file_errors)?;
        }

        writeln!(f)?;
        if self.remaining.files.is_empty() && t.files_processed == 0 {
            writeln!(f, "No console statements found!")?;
        } else if self.remaining.files.is_empty() {
            writeln!(f, "All console statements replaced!")?;
        } else {
            writeln!(f, "Remaining console statements (manual review):")?;
            writeln!(f, "   Files: {}", self.remaining.files.len())?;
            writeln!(f, "   Total: {}", self.remaining.total())?;
            for c in &self.remaining.files {
                writeln!(f, "   - {} ({})", c.path.display(), c.count)?;
            }
        }
        if self.remaining.unknown > 0 {
            writeln!(
                f,
                "   {} files could not be counted; see warnings above",
                self.remaining.unknown
            )?;
        }
        Ok(())
    }
}
