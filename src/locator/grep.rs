use super::{CountBackend, QueryError};
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// grep BRE equivalent of `CONSOLE_CALL`.
const GREP_PATTERN: &str = r"console\.\(log\|error\|warn\)";

/// Shells out to `find` for enumeration and `grep -c` for counting.
pub struct GrepBackend {
    find: String,
    grep: String,
}

impl Default for GrepBackend {
    fn default() -> Self {
        Self {
            find: "find".to_string(),
            grep: "grep".to_string(),
        }
    }
}

impl GrepBackend {
    pub fn new(find: impl Into<String>, grep: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            grep: grep.into(),
        }
    }
}

fn run(program: &str, cmd: &mut Command) -> Result<Output, QueryError> {
    cmd.output().map_err(|source| QueryError::Spawn {
        program: program.to_string(),
        source,
    })
}

impl CountBackend for GrepBackend {
    fn name(&self) -> &'static str {
        "grep"
    }

    fn enumerate(&self, root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        let name = format!("*.{}", extension);
        let output = run(
            &self.find,
            Command::new(&self.find)
                .arg(root)
                .args(["-name", name.as_str(), "-type", "f"]),
        )?;
        if !output.status.success() {
            bail!(
                "{} failed (status {:?}): {}",
                self.find,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        let stdout = String::from_utf8(output.stdout)
            .with_context(|| format!("{} produced non UTF-8 paths", self.find))?;
        Ok(stdout
            .lines()
            .filter(|l| !l.is_empty())
            .map(PathBuf::from)
            .collect())
    }

    fn count(&self, path: &Path) -> Result<usize, QueryError> {
        let output = run(
            &self.grep,
            Command::new(&self.grep).args(["-c", GREP_PATTERN]).arg(path),
        )?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        match output.status.code() {
            Some(0) => stdout.trim().parse().map_err(|_| QueryError::Parse {
                program: self.grep.clone(),
                output: stdout.trim().to_string(),
            }),
            // selected no lines
            Some(1) => Ok(0),
            code => Err(QueryError::Status {
                program: self.grep.clone(),
                code,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
        }
    }
}
