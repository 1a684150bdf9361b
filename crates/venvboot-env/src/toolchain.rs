//! Toolchain trait: the seam between the bootstrap procedure and the host's
//! Python tooling (`python -m venv`, the activation script, `pip`).
//!
//! [`HostToolchain`] runs real processes with inherited stdio. Tests swap in
//! a recording implementation.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::error::ActivationError;
use crate::layout::EnvLayout;

/// Result of one side-effecting step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded,
    /// Non-zero exit, or `code: None` when the process could not be started
    /// or was killed by a signal.
    Failed { code: Option<i32> },
    Skipped,
}

impl StepOutcome {
    pub fn from_status(status: ExitStatus) -> Self {
        if status.success() {
            StepOutcome::Succeeded
        } else {
            StepOutcome::Failed {
                code: status.code(),
            }
        }
    }

    pub fn ran(&self) -> bool {
        !matches!(self, StepOutcome::Skipped)
    }
}

/// Process environment captured after sourcing the activation script.
///
/// The bootstrapper never mutates its own environment; this is applied to
/// each child command instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub virtual_env: PathBuf,
    pub path: OsString,
}

impl Activation {
    pub fn apply(&self, cmd: &mut Command) {
        cmd.env("VIRTUAL_ENV", &self.virtual_env)
            .env("PATH", &self.path)
            .env_remove("PYTHONHOME");
    }
}

/// The four external collaborators of the bootstrap procedure.
pub trait Toolchain {
    /// Create a fresh environment at `layout.root()`.
    fn create_env(&self, layout: &EnvLayout) -> io::Result<StepOutcome>;

    /// Source the activation script and capture the resulting environment.
    fn activate(&self, layout: &EnvLayout) -> Result<Activation, ActivationError>;

    /// `pip install --upgrade pip` inside the activated environment.
    fn upgrade_installer(
        &self,
        layout: &EnvLayout,
        activation: &Activation,
    ) -> io::Result<StepOutcome>;

    /// `pip install -r <manifest>` inside the activated environment.
    fn install_requirements(
        &self,
        layout: &EnvLayout,
        activation: &Activation,
        manifest: &Path,
    ) -> io::Result<StepOutcome>;
}

/// Sources `$1` and prints `VIRTUAL_ENV` and `PATH`, NUL-separated.
/// The script's own stdout is discarded; its stderr passes through.
const ACTIVATE_SCRIPT_CMD: &str = r#". "$1" >/dev/null && printf '%s\0%s' "${VIRTUAL_ENV:-}" "$PATH""#;

/// Runs the real host tools.
#[derive(Debug, Clone, Default)]
pub struct HostToolchain {
    python: Option<PathBuf>,
    work_dir: Option<PathBuf>,
}

impl HostToolchain {
    /// `python` is the interpreter for `-m venv`; `None` auto-detects.
    pub fn new(python: Option<PathBuf>) -> Self {
        Self {
            python,
            work_dir: None,
        }
    }

    /// Run every child process in `dir` instead of the current directory.
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }

    /// Configured interpreter, else the first of `python3`, `python` on PATH.
    pub fn resolve_python(&self) -> Option<PathBuf> {
        if let Some(ref p) = self.python {
            return Some(p.clone());
        }
        ["python3", "python"]
            .iter()
            .find_map(|name| which::which(name).ok())
    }

    fn command(&self, program: impl AsRef<std::ffi::OsStr>) -> Command {
        let mut cmd = Command::new(program);
        if let Some(ref dir) = self.work_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// `pip` from the activated PATH, falling back to `<env>/bin/python -m pip`.
    fn installer(&self, layout: &EnvLayout, activation: &Activation) -> Command {
        let cwd = self
            .work_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        let mut cmd = match which::which_in("pip", Some(&activation.path), &cwd) {
            Ok(pip) => self.command(pip),
            Err(_) => {
                tracing::debug!("pip not on activated PATH, using python -m pip");
                let mut c = self.command(layout.python());
                c.arg("-m").arg("pip");
                c
            }
        };
        activation.apply(&mut cmd);
        cmd
    }

    fn run(&self, step: &str, mut cmd: Command) -> io::Result<StepOutcome> {
        tracing::debug!(step, command = ?cmd, "Running");
        let status = cmd.status()?;
        Ok(StepOutcome::from_status(status))
    }
}

impl Toolchain for HostToolchain {
    fn create_env(&self, layout: &EnvLayout) -> io::Result<StepOutcome> {
        let python = self.resolve_python().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "python3 or python not found in PATH")
        })?;
        let mut cmd = self.command(&python);
        cmd.arg("-m").arg("venv").arg(layout.root());
        self.run("create", cmd)
    }

    fn activate(&self, layout: &EnvLayout) -> Result<Activation, ActivationError> {
        let script = layout.activate_script();
        if !script.is_file() {
            return Err(ActivationError::MissingScript(script));
        }
        let mut cmd = self.command("sh");
        cmd.arg("-c")
            .arg(ACTIVATE_SCRIPT_CMD)
            .arg("venvboot-activate")
            .arg(&script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        let out = cmd.output().map_err(|source| ActivationError::Shell {
            script: script.clone(),
            source,
        })?;
        if !out.status.success() {
            return Err(ActivationError::ScriptFailed {
                script,
                status: out.status.to_string(),
            });
        }
        parse_activation_output(&out.stdout).ok_or(ActivationError::NotActivated(script))
    }

    fn upgrade_installer(
        &self,
        layout: &EnvLayout,
        activation: &Activation,
    ) -> io::Result<StepOutcome> {
        let mut cmd = self.installer(layout, activation);
        cmd.args(["install", "--upgrade", "pip"]);
        self.run("upgrade", cmd)
    }

    fn install_requirements(
        &self,
        layout: &EnvLayout,
        activation: &Activation,
        manifest: &Path,
    ) -> io::Result<StepOutcome> {
        let mut cmd = self.installer(layout, activation);
        cmd.arg("install").arg("-r").arg(manifest);
        self.run("install", cmd)
    }
}

fn parse_activation_output(stdout: &[u8]) -> Option<Activation> {
    let text = String::from_utf8_lossy(stdout);
    let (virtual_env, path) = text.split_once('\0')?;
    if virtual_env.is_empty() {
        return None;
    }
    Some(Activation {
        virtual_env: PathBuf::from(virtual_env),
        path: OsString::from(path),
    })
}
