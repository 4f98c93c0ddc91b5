use crate::commands;
use crate::config::Overrides;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "console-to-logger",
    version,
    about = "Rewrite console.log/error/warn calls into structured logger calls"
)]
struct Cli {
    /// Increase verbosity (-v, -vv). Uses RUST_LOG under the hood
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Environment diagnostics (find / grep / node) and effective configuration
    Doctor {
        /// Path to console-to-logger.toml (defaults to current directory)
        #[arg(long)]
        config: Option<String>,
        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Insert logger imports, rewrite console calls, report what remains
    Run {
        /// Path to console-to-logger.toml (defaults to current directory)
        #[arg(long)]
        config: Option<String>,
        #[command(flatten)]
        overrides: OverrideArgs,
        /// Compute the conversion without writing any file
        #[arg(long)]
        dry_run: bool,
    },
    /// Only count console statements without rewriting
    Check {
        #[arg(long)]
        config: Option<String>,
        #[command(flatten)]
        overrides: OverrideArgs,
    },
}

#[derive(Args, Debug)]
struct OverrideArgs {
    /// Directory to scan (overrides `root`)
    #[arg(long)]
    root: Option<PathBuf>,
    /// builtin | grep (overrides `backend`)
    #[arg(long)]
    backend: Option<String>,
    /// Directory the logger module path is relative to (overrides `tree_root`)
    #[arg(long)]
    tree_root: Option<PathBuf>,
}

impl From<OverrideArgs> for Overrides {
    fn from(a: OverrideArgs) -> Self {
        Overrides {
            root: a.root,
            backend: a.backend,
            tree_root: a.tree_root,
        }
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    // stdout carries the summary; a second init keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

pub fn run_cli() -> Result<()> {
    dispatch(Cli::parse())
}

pub fn run_cli_with<I, S>(args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    dispatch(Cli::try_parse_from(args)?)
}

fn dispatch(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Doctor { config, overrides } => {
            commands::doctor(config.as_deref(), &overrides.into())?
        }
        Commands::Run {
            config,
            overrides,
            dry_run,
        } => commands::run(config.as_deref(), &overrides.into(), dry_run)?,
        Commands::Check { config, overrides } => {
            commands::check(config.as_deref(), &overrides.into())?
        }
    }

    Ok(())
}
