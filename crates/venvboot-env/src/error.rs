use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why sourcing the activation script did not yield an active environment.
#[derive(Debug, Error)]
pub enum ActivationError {
    #[error("activation script not found at {0}")]
    MissingScript(PathBuf),

    #[error("could not run sh to source {script}: {source}")]
    Shell {
        script: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("sourcing {script} failed ({status})")]
    ScriptFailed { script: PathBuf, status: String },

    #[error("VIRTUAL_ENV is empty after sourcing {0}")]
    NotActivated(PathBuf),
}

/// Errors reading a requirements manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Fatal bootstrap errors. Activation is the only checked step.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Failed to activate virtual environment: {0}")]
    Activation(#[from] ActivationError),
}

impl BootstrapError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            BootstrapError::Activation(_) => 1,
        }
    }
}
