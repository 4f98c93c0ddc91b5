use super::{CountBackend, QueryError, count_in_text};
use anyhow::{Result, bail};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Walks the tree with `walkdir` and counts matching lines in-process.
pub struct BuiltinBackend;

impl CountBackend for BuiltinBackend {
    fn name(&self) -> &'static str {
        "builtin"
    }

    fn enumerate(&self, root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            bail!("not a directory: {}", root.display());
        }
        let mut files = Vec::new();
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!("skipping unreadable entry: {}", err);
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_file() && path.extension() == Some(OsStr::new(extension)) {
                files.push(path.to_path_buf());
            }
        }
        Ok(files)
    }

    fn count(&self, path: &Path) -> Result<usize, QueryError> {
        let bytes = fs::read(path).map_err(|source| QueryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        // grep counts lines in non-UTF-8 files too
        Ok(count_in_text(&String::from_utf8_lossy(&bytes)))
    }
}
