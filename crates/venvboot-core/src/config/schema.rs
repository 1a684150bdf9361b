//! Config structs grouped by concern, loaded from environment variables.

use super::env_keys::{bootstrap as boot_keys, observability as obv_keys};
use super::loader::{env_bool_in, env_optional_in, env_or_in};
use std::path::PathBuf;

/// Default environment directory, relative to the working directory.
pub const DEFAULT_ENV_DIR: &str = "venv";

/// Default requirements manifest name.
pub const DEFAULT_REQUIREMENTS: &str = "requirements.txt";

/// Where the environment lives and what gets installed into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    pub env_dir: PathBuf,
    pub requirements: PathBuf,
    /// Interpreter used for `-m venv`. `None` means auto-detect.
    pub python: Option<PathBuf>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            env_dir: PathBuf::from(DEFAULT_ENV_DIR),
            requirements: PathBuf::from(DEFAULT_REQUIREMENTS),
            python: None,
        }
    }
}

impl BootstrapConfig {
    /// Load from the process environment (loads `.env` first).
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<L>(lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        let env_dir = env_or_in(
            &lookup,
            boot_keys::VENVBOOT_ENV_DIR,
            boot_keys::ENV_DIR_ALIASES,
            || DEFAULT_ENV_DIR.to_string(),
        );
        let requirements = env_or_in(
            &lookup,
            boot_keys::VENVBOOT_REQUIREMENTS,
            boot_keys::REQUIREMENTS_ALIASES,
            || DEFAULT_REQUIREMENTS.to_string(),
        );
        let python = env_optional_in(
            &lookup,
            boot_keys::VENVBOOT_PYTHON,
            boot_keys::PYTHON_ALIASES,
        )
        .map(PathBuf::from);
        Self {
            env_dir: PathBuf::from(env_dir),
            requirements: PathBuf::from(requirements),
            python,
        }
    }

    /// CLI flags win over anything read from the environment.
    pub fn with_cli_overrides(
        mut self,
        env_dir: Option<PathBuf>,
        requirements: Option<PathBuf>,
        python: Option<PathBuf>,
    ) -> Self {
        if let Some(dir) = env_dir {
            self.env_dir = dir;
        }
        if let Some(req) = requirements {
            self.requirements = req;
        }
        if python.is_some() {
            self.python = python;
        }
        self
    }
}

/// Observability config: quiet, log_level, log_json
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| {
            super::loader::load_dotenv();
            Self::from_lookup(|k| std::env::var(k).ok())
        })
    }

    pub fn from_lookup<L>(lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        Self {
            quiet: env_bool_in(&lookup, obv_keys::VENVBOOT_QUIET, &[], false),
            log_level: env_or_in(&lookup, obv_keys::VENVBOOT_LOG_LEVEL, &[], || {
                "venvboot=info".to_string()
            }),
            log_json: env_bool_in(&lookup, obv_keys::VENVBOOT_LOG_JSON, &[], false),
        }
    }
}
