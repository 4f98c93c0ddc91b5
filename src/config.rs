use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "console-to-logger.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// In-process directory walk and regex line count
    Builtin,
    /// External `find` + `grep -c`
    Grep,
}

impl Backend {
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "builtin" => Ok(Backend::Builtin),
            "grep" => Ok(Backend::Grep),
            other => bail!("unsupported backend: {}", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: Backend,
    pub root: PathBuf,
    pub extension: String,
    pub exclude: Vec<glob::Pattern>,
    pub logger: LoggerTarget,
}

/// Where the structured logger lives and how generated code refers to it.
#[derive(Debug, Clone)]
pub struct LoggerTarget {
    pub tree_root: PathBuf,
    pub module: String,
    pub binding: String,
}

impl Default for LoggerTarget {
    fn default() -> Self {
        Self {
            tree_root: PathBuf::from("."),
            module: "utils/logger".to_string(),
            binding: "logger".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Builtin,
            root: PathBuf::from("src"),
            extension: "js".to_string(),
            exclude: Vec::new(),
            logger: LoggerTarget::default(),
        }
    }
}

// --- Raw TOML structures ---
#[derive(Deserialize)]
struct ConfigFile {
    console_to_logger: Option<CodemodToml>,
}

#[derive(Deserialize)]
struct CodemodToml {
    backend: Option<String>,
    root: Option<String>,
    extension: Option<String>,
    tree_root: Option<String>,
    logger_module: Option<String>,
    logger_binding: Option<String>,
    exclude: Option<Vec<String>>, // globs relative to root
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `console-to-logger.toml` in the
    /// current directory is used when present, otherwise the defaults apply.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                default
            }
        };
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let root: ConfigFile = toml::from_str(content)?;
        let Some(raw) = root.console_to_logger else {
            bail!("[console_to_logger] not found");
        };

        let defaults = Self::default();
        let backend = match raw.backend.as_deref() {
            Some(name) => Backend::parse(name)?,
            None => defaults.backend,
        };

        let extension = raw
            .extension
            .map(|e| e.trim_start_matches('.').to_string())
            .unwrap_or(defaults.extension);
        if extension.is_empty() {
            bail!("extension must not be empty");
        }

        let exclude = raw
            .exclude
            .unwrap_or_default()
            .iter()
            .map(|g| {
                glob::Pattern::new(g).with_context(|| format!("invalid exclude glob: {}", g))
            })
            .collect::<Result<Vec<_>>>()?;

        let logger = LoggerTarget {
            tree_root: raw
                .tree_root
                .map(PathBuf::from)
                .unwrap_or(defaults.logger.tree_root),
            module: raw
                .logger_module
                .map(|m| {
                    let bare = m.strip_prefix("./").unwrap_or(&m);
                    bare.strip_suffix(".js").unwrap_or(bare).to_string()
                })
                .unwrap_or(defaults.logger.module),
            binding: raw.logger_binding.unwrap_or(defaults.logger.binding),
        };
        if !is_js_identifier(&logger.binding) {
            bail!("logger_binding is not a valid identifier: {}", logger.binding);
        }
        if logger.module.is_empty() {
            bail!("logger_module must not be empty");
        }

        Ok(Self {
            backend,
            root: raw.root.map(PathBuf::from).unwrap_or(defaults.root),
            extension,
            exclude,
            logger,
        })
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub backend: Option<String>,
    pub tree_root: Option<PathBuf>,
}

impl AppConfig {
    pub fn with_overrides(mut self, overrides: &Overrides) -> Result<Self> {
        if let Some(root) = &overrides.root {
            self.root = root.clone();
        }
        if let Some(backend) = &overrides.backend {
            self.backend = Backend::parse(backend)?;
        }
        if let Some(tree_root) = &overrides.tree_root {
            self.logger.tree_root = tree_root.clone();
        }
        Ok(self)
    }

    /// Load from `config_path` (or the default file) and apply CLI overrides.
    pub fn resolve(config_path: Option<&str>, overrides: &Overrides) -> Result<Self> {
        Self::load(config_path.map(Path::new))
            .context("failed to load config")?
            .with_overrides(overrides)
    }
}

fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
