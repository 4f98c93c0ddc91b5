use crate::config::{AppConfig, Backend};
use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub mod builtin;
pub mod grep;

pub use builtin::BuiltinBackend;
pub use grep::GrepBackend;

/// Any occurrence of a console output call, regardless of call shape.
pub(crate) static CONSOLE_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"console\.(log|error|warn)").unwrap());

/// Number of lines in `text` containing at least one console output call.
pub fn count_in_text(text: &str) -> usize {
    text.lines().filter(|l| CONSOLE_CALL.is_match(l)).count()
}

/// A count query that could not be answered. Distinct from a zero count.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with status {code:?}: {stderr}")]
    Status {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("unexpected output from {program}: {output:?}")]
    Parse { program: String, output: String },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub trait CountBackend {
    fn name(&self) -> &'static str;

    /// Files under `root` with the given extension, in enumeration order.
    fn enumerate(&self, root: &Path, extension: &str) -> Result<Vec<PathBuf>>;

    /// Line-oriented count of console output calls in one file.
    fn count(&self, path: &Path) -> Result<usize, QueryError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub count: usize,
}

#[derive(Debug)]
pub struct QueryFailure {
    pub path: PathBuf,
    pub error: QueryError,
}

#[derive(Debug, Default)]
pub struct Discovery {
    pub scanned: usize,
    pub candidates: Vec<Candidate>,
    pub failures: Vec<QueryFailure>,
}

impl Discovery {
    pub fn total_statements(&self) -> usize {
        self.candidates.iter().map(|c| c.count).sum()
    }
}

pub struct Locator {
    backend: Box<dyn CountBackend>,
    root: PathBuf,
    extension: String,
    exclude: Vec<glob::Pattern>,
}

impl Locator {
    pub fn new(cfg: &AppConfig) -> Self {
        let backend: Box<dyn CountBackend> = match cfg.backend {
            Backend::Builtin => Box::new(BuiltinBackend),
            Backend::Grep => Box::new(GrepBackend::default()),
        };
        Self::with_backend(backend, cfg)
    }

    pub fn with_backend(backend: Box<dyn CountBackend>, cfg: &AppConfig) -> Self {
        Self {
            backend,
            root: cfg.root.clone(),
            extension: cfg.extension.clone(),
            exclude: cfg.exclude.clone(),
        }
    }

    pub fn backend(&self) -> &dyn CountBackend {
        self.backend.as_ref()
    }

    /// Enumerate candidate files and keep those with at least one output call.
    ///
    /// Count failures are collected rather than treated as zero matches.
    pub fn discover(&self) -> Result<Discovery> {
        let files = self
            .backend
            .enumerate(&self.root, &self.extension)
            .with_context(|| {
                format!(
                    "failed to enumerate *.{} files under {}",
                    self.extension,
                    self.root.display()
                )
            })?;

        let mut discovery = Discovery::default();
        for path in files {
            if self.is_excluded(&path) {
                tracing::trace!("excluded {}", path.display());
                continue;
            }
            discovery.scanned += 1;
            match self.backend.count(&path) {
                Ok(0) => {}
                Ok(count) => {
                    tracing::debug!(count, "candidate {}", path.display());
                    discovery.candidates.push(Candidate { path, count });
                }
                Err(error) => {
                    tracing::warn!("count query failed for {}: {}", path.display(), error);
                    discovery.failures.push(QueryFailure { path, error });
                }
            }
        }
        Ok(discovery)
    }

    pub fn count(&self, path: &Path) -> Result<usize, QueryError> {
        self.backend.count(path)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        self.exclude.iter().any(|p| p.matches_path(rel))
    }
}
