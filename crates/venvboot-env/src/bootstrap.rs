//! The bootstrap procedure: locate-or-create, activate, upgrade installer,
//! install dependencies. Strictly sequential; activation is the only step
//! whose failure stops the run.

use std::path::Path;

use crate::error::BootstrapError;
use crate::layout::EnvLayout;
use crate::manifest::Requirements;
use crate::toolchain::{StepOutcome, Toolchain};

/// What each step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    /// `Skipped` when the environment directory already existed.
    pub create: StepOutcome,
    pub upgrade: StepOutcome,
    /// `Skipped` when the manifest was absent.
    pub install: StepOutcome,
    /// Entry count of the manifest, when it was present and readable.
    pub manifest_entries: Option<usize>,
}

impl BootstrapReport {
    pub fn created(&self) -> bool {
        self.create.ran()
    }

    pub fn manifest_found(&self) -> bool {
        self.install.ran()
    }
}

fn unchecked(step: &str, result: std::io::Result<StepOutcome>) -> StepOutcome {
    match result {
        Ok(StepOutcome::Failed { code }) => {
            tracing::warn!(step, ?code, "Step exited unsuccessfully, continuing");
            StepOutcome::Failed { code }
        }
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(step, error = %e, "Step could not be started, continuing");
            StepOutcome::Failed { code: None }
        }
    }
}

/// Run the four steps against `layout`, reading `manifest` if it exists.
pub fn run_bootstrap<T>(
    toolchain: &T,
    layout: &EnvLayout,
    manifest: &Path,
) -> Result<BootstrapReport, BootstrapError>
where
    T: Toolchain + ?Sized,
{
    let create = if layout.exists() {
        tracing::info!(env = %layout.root().display(), "Using existing virtual environment");
        StepOutcome::Skipped
    } else {
        tracing::info!(env = %layout.root().display(), "Creating virtual environment");
        // Creation failures surface at activation.
        unchecked("create", toolchain.create_env(layout))
    };

    let activation = toolchain.activate(layout)?;
    tracing::info!(virtual_env = %activation.virtual_env.display(), "Activated");

    tracing::info!("Upgrading pip");
    let upgrade = unchecked("upgrade", toolchain.upgrade_installer(layout, &activation));

    let (install, manifest_entries) = if manifest.is_file() {
        let entries = match Requirements::load(manifest) {
            Ok(reqs) => Some(reqs.len()),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read manifest, passing it to pip anyway");
                None
            }
        };
        tracing::info!(
            manifest = %manifest.display(),
            entries = ?entries,
            "Installing requirements"
        );
        let outcome = unchecked(
            "install",
            toolchain.install_requirements(layout, &activation, manifest),
        );
        (outcome, entries)
    } else {
        tracing::info!(manifest = %manifest.display(), "No requirements manifest");
        (StepOutcome::Skipped, None)
    };

    Ok(BootstrapReport {
        create,
        upgrade,
        install,
        manifest_entries,
    })
}
