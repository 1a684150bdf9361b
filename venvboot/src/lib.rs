//! venvboot CLI library.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use venvboot_core::config::BootstrapConfig;

/// Parse args, dispatch, and return the process exit code.
pub fn run_cli() -> Result<i32> {
    // .env must be applied before anything reads config.
    venvboot_core::config::load_dotenv();
    venvboot_core::observability::init_tracing();
    let cli = Cli::parse();

    let cfg = BootstrapConfig::from_env().with_cli_overrides(
        cli.env.env_dir,
        cli.env.requirements,
        cli.env.python,
    );
    tracing::debug!(?cfg, "Resolved config");

    match cli.command {
        None => commands::bootstrap::cmd_bootstrap(&cfg),
        Some(Commands::Status { json }) => {
            commands::status::cmd_status(&cfg, json)?;
            Ok(0)
        }
        Some(Commands::Clean { dry_run, force }) => {
            commands::clean::cmd_clean(&cfg, dry_run, force)
        }
    }
}
