use crate::config::{AppConfig, Overrides};
use crate::locator::{Candidate, Locator, count_in_text};
use crate::report::{FileOutcome, RunTotals, Summary};
use crate::rewrite::{ImportOutcome, LoggerImport, Rewriter, convert_source};
use crate::verification::{Remaining, rescan};
use anyhow::{Context, Result};
use std::fs;

#[derive(Debug)]
pub struct RunReport {
    pub totals: RunTotals,
    pub outcomes: Vec<FileOutcome>,
    pub remaining: Remaining,
}

/// Execute the run command
pub fn run(config: Option<&str>, overrides: &Overrides, dry_run: bool) -> Result<()> {
    let cfg = AppConfig::resolve(config, overrides)?;
    let report = convert_tree(&cfg, dry_run)?;
    print!(
        "{}",
        Summary {
            totals: &report.totals,
            remaining: &report.remaining,
            dry_run,
        }
    );
    Ok(())
}

/// Discover, convert and re-scan. Per-file failures are counted, not fatal.
pub fn convert_tree(cfg: &AppConfig, dry_run: bool) -> Result<RunReport> {
    convert_with(&Locator::new(cfg), cfg, dry_run)
}

fn convert_with(locator: &Locator, cfg: &AppConfig, dry_run: bool) -> Result<RunReport> {
    tracing::info!(
        backend = locator.backend().name(),
        root = %cfg.root.display(),
        "finding files with console statements"
    );
    let discovery = locator.discover()?;
    let mut totals = RunTotals {
        query_failures: discovery.failures.len(),
        ..RunTotals::default()
    };

    if discovery.candidates.is_empty() {
        tracing::info!("no console statements found");
    } else {
        tracing::info!(
            "found {} files with console statements",
            discovery.candidates.len()
        );
    }

    let importer = LoggerImport::new(&cfg.logger);
    let rewriter = Rewriter::new(&cfg.logger.binding);
    for rule in rewriter.rules() {
        tracing::trace!(shape = ?rule.shape, quote = ?rule.quote, "rule {}", rule.pattern());
    }

    let n = discovery.candidates.len();
    let mut outcomes = Vec::with_capacity(n);
    for (idx, candidate) in discovery.candidates.iter().enumerate() {
        tracing::info!("[{}/{}] processing {}", idx + 1, n, candidate.path.display());
        match convert_file(locator, &importer, &rewriter, candidate, dry_run) {
            Ok(outcome) => {
                totals.record(&outcome);
                outcomes.push(outcome);
            }
            Err(err) => {
                tracing::error!("{:#}", err);
                totals.file_errors += 1;
            }
        }
    }

    let remaining = if dry_run {
        Remaining::projected(&outcomes, discovery.failures.len())
    } else {
        // files are already written; keep the totals even if the tree can't be re-read
        rescan(locator).unwrap_or_else(|err| {
            tracing::warn!("{:#}", err);
            Remaining {
                files: Vec::new(),
                unknown: outcomes.len(),
            }
        })
    };

    Ok(RunReport {
        totals,
        outcomes,
        remaining,
    })
}

fn convert_file(
    locator: &Locator,
    importer: &LoggerImport,
    rewriter: &Rewriter,
    candidate: &Candidate,
    dry_run: bool,
) -> Result<FileOutcome> {
    let path = &candidate.path;
    let original =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let edit = convert_source(&original, path, importer, rewriter);
    match &edit.import {
        ImportOutcome::Inserted { spec } => tracing::info!("  added logger import ({})", spec),
        ImportOutcome::NoAnchor => {
            tracing::debug!("  no require declaration to anchor the logger import")
        }
        ImportOutcome::AlreadyPresent => {}
    }

    let mut count_failed = false;
    let after = if dry_run {
        count_in_text(&edit.text)
    } else {
        if edit.changed_from(&original) {
            fs::write(path, &edit.text)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        match locator.count(path) {
            Ok(count) => count,
            Err(err) => {
                tracing::warn!("count query failed for {}: {}", path.display(), err);
                count_failed = true;
                count_in_text(&edit.text)
            }
        }
    };

    if edit.rule_hits > 0 {
        tracing::info!(
            "  replaced {} console statements ({} remaining)",
            edit.rule_hits,
            after
        );
    }
    if after > 0 {
        tracing::warn!(
            "  manual review needed for {} remaining statements in {}",
            after,
            path.display()
        );
    }

    Ok(FileOutcome {
        path: path.clone(),
        import: edit.import,
        rule_hits: edit.rule_hits,
        before: candidate.count,
        after,
        count_failed,
    })
}
