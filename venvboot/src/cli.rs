use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// venvboot - create, activate and populate a Python virtual environment
///
/// With no subcommand: create the environment if missing, activate it,
/// upgrade pip, and install the requirements manifest if present.
#[derive(Parser, Debug)]
#[command(name = "venvboot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub env: EnvArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Overrides for values otherwise read from VENVBOOT_* env vars.
#[derive(Args, Debug, Clone, Default)]
pub struct EnvArgs {
    /// Environment directory (default: $VENVBOOT_ENV_DIR or "venv")
    #[arg(long, value_name = "DIR", global = true)]
    pub env_dir: Option<PathBuf>,

    /// Requirements manifest (default: $VENVBOOT_REQUIREMENTS or "requirements.txt")
    #[arg(long, value_name = "FILE", global = true)]
    pub requirements: Option<PathBuf>,

    /// Interpreter used to create the environment (default: python3, then python)
    #[arg(long, value_name = "PYTHON", global = true)]
    pub python: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show environment and manifest state without changing anything
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove the environment directory
    Clean {
        /// List what would be removed, remove nothing
        #[arg(long)]
        dry_run: bool,

        /// Skip confirmation; also remove directories without pyvenv.cfg
        #[arg(long, short = 'f')]
        force: bool,
    },
}
