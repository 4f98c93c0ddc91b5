use crate::config::{AppConfig, Overrides};
use crate::locator::{Discovery, Locator};
use anyhow::Result;

/// Execute the check command: report console statements without rewriting.
pub fn check(config: Option<&str>, overrides: &Overrides) -> Result<()> {
    let cfg = AppConfig::resolve(config, overrides)?;
    let discovery = Locator::new(&cfg).discover()?;
    print!("{}", render(&discovery));
    Ok(())
}

fn render(discovery: &Discovery) -> String {
    let mut out = String::new();
    if discovery.candidates.is_empty() {
        out.push_str("No console statements found!\n");
    } else {
        out.push_str(&format!(
            "Console statements: {} in {} files (of {} scanned)\n",
            discovery.total_statements(),
            discovery.candidates.len(),
            discovery.scanned
        ));
        for c in &discovery.candidates {
            out.push_str(&format!("   {:>4}  {}\n", c.count, c.path.display()));
        }
    }
    for failure in &discovery.failures {
        out.push_str(&format!(
            "   count failed: {}: {}\n",
            failure.path.display(),
            failure.error
        ));
    }
    out
}
