use crate::config::{AppConfig, Backend, Overrides};
use anyhow::{Result, bail};
use which::which;

fn check(cmd: &str) -> Option<String> {
    which(cmd)
        .ok()
        .and_then(|p| p.to_str().map(|s| s.to_string()))
}

/// Environment diagnostics: external tools and the effective configuration.
pub fn doctor(config: Option<&str>, overrides: &Overrides) -> Result<()> {
    let tools = ["find", "grep", "node"];

    println!("== Tool presence ==");
    for t in tools {
        println!(
            "{:<10} : {}",
            t,
            check(t).unwrap_or_else(|| "not found".into())
        );
    }

    let cfg = AppConfig::resolve(config, overrides)?;
    println!();
    println!("== Configuration ==");
    println!("{:<10} : {:?}", "backend", cfg.backend);
    println!(
        "{:<10} : {} (*.{}{})",
        "root",
        cfg.root.display(),
        cfg.extension,
        if cfg.root.is_dir() { "" } else { ", missing" }
    );
    println!("{:<10} : {}", "tree root", cfg.logger.tree_root.display());
    println!(
        "{:<10} : const {} = require('<../>{}')",
        "logger", cfg.logger.binding, cfg.logger.module
    );
    if !cfg.exclude.is_empty() {
        let globs: Vec<&str> = cfg.exclude.iter().map(|p| p.as_str()).collect();
        println!("{:<10} : {}", "exclude", globs.join(", "));
    }

    if cfg.backend == Backend::Grep {
        let missing: Vec<&str> = ["find", "grep"]
            .into_iter()
            .filter(|t| check(t).is_none())
            .collect();
        if !missing.is_empty() {
            bail!(
                "grep backend selected but not found in PATH: {}",
                missing.join(", ")
            );
        }
    }

    Ok(())
}
