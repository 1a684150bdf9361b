//! Python virtual environment bootstrap: locate-or-create, activate, upgrade
//! the installer, install the requirements manifest.
//!
//! Callers (the CLI) pass an [`layout::EnvLayout`] and a manifest path; every
//! external process goes through the [`toolchain::Toolchain`] seam.

pub mod bootstrap;
pub mod error;
pub mod layout;
pub mod manifest;
pub mod toolchain;

pub use bootstrap::{run_bootstrap, BootstrapReport};
pub use error::{ActivationError, BootstrapError, ManifestError};
pub use layout::EnvLayout;
pub use manifest::{Requirement, Requirements};
pub use toolchain::{Activation, HostToolchain, StepOutcome, Toolchain};
