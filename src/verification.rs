use crate::locator::{Candidate, Discovery, Locator};
use crate::report::FileOutcome;
use anyhow::{Context, Result};

/// Statements still present after a run: the manual review targets.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Remaining {
    pub files: Vec<Candidate>,
    /// Files whose count could not be determined.
    pub unknown: usize,
}

impl Remaining {
    pub fn total(&self) -> usize {
        self.files.iter().map(|c| c.count).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.files.is_empty() && self.unknown == 0
    }

    /// Projection from in-memory results, for runs that wrote nothing.
    pub fn projected(outcomes: &[FileOutcome], unknown: usize) -> Self {
        Self {
            files: outcomes
                .iter()
                .filter(|o| o.after > 0)
                .map(|o| Candidate {
                    path: o.path.clone(),
                    count: o.after,
                })
                .collect(),
            unknown,
        }
    }
}

impl From<Discovery> for Remaining {
    fn from(d: Discovery) -> Self {
        Self {
            files: d.candidates,
            unknown: d.failures.len(),
        }
    }
}

/// Re-run discovery over the tree to find unconverted statements.
pub fn rescan(locator: &Locator) -> Result<Remaining> {
    let discovery = locator
        .discover()
        .context("final scan for remaining console statements failed")?;
    tracing::debug!(
        files = discovery.candidates.len(),
        total = discovery.total_statements(),
        "final scan"
    );
    Ok(discovery.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::ImportOutcome;
    use std::path::PathBuf;

    fn outcome(path: &str, after: usize) -> FileOutcome {
        FileOutcome {
            path: PathBuf::from(path),
            import: ImportOutcome::AlreadyPresent,
            rule_hits: 0,
            before: 3,
            after,
            count_failed: false,
        }
    }

    #[test]
    fn projected_keeps_files_with_statements_left() {
        let remaining = Remaining::projected(&[outcome("a.js", 0), outcome("b.js", 2)], 1);
        assert_eq!(
            remaining.files,
            vec![Candidate {
                path: PathBuf::from("b.js"),
                count: 2
            }]
        );
        assert_eq!(remaining.total(), 2);
        assert_eq!(remaining.unknown, 1);
        assert!(!remaining.is_clean());
        assert!(Remaining::default().is_clean());
    }
}
