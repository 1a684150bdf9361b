//! Environment variable keys and alias chains.
//!
//! Primary keys are `VENVBOOT_*`; the short aliases match the names commonly
//! used by hand-written bootstrap scripts.

/// Environment directory and manifest
pub mod bootstrap {
    pub const VENVBOOT_ENV_DIR: &str = "VENVBOOT_ENV_DIR";
    pub const ENV_DIR_ALIASES: &[&str] = &["VENV_DIR"];

    pub const VENVBOOT_REQUIREMENTS: &str = "VENVBOOT_REQUIREMENTS";
    pub const REQUIREMENTS_ALIASES: &[&str] = &["REQUIREMENTS_FILE"];

    pub const VENVBOOT_PYTHON: &str = "VENVBOOT_PYTHON";
    pub const PYTHON_ALIASES: &[&str] = &["PYTHON"];
}

/// Observability and logging
pub mod observability {
    pub const VENVBOOT_QUIET: &str = "VENVBOOT_QUIET";
    pub const VENVBOOT_LOG_LEVEL: &str = "VENVBOOT_LOG_LEVEL";
    pub const VENVBOOT_LOG_JSON: &str = "VENVBOOT_LOG_JSON";
}
