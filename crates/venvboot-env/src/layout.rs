//! On-disk layout of a virtual environment.

use std::path::{Path, PathBuf};

/// Paths inside a virtual environment rooted at `root`.
///
/// `bin/` is the POSIX layout; `Scripts/` is recognised when it is the only
/// one present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvLayout {
    root: PathBuf,
}

impl EnvLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve `env_dir` against `work_dir` (absolute `env_dir` is kept as is).
    pub fn in_dir(work_dir: &Path, env_dir: &Path) -> Self {
        Self::new(work_dir.join(env_dir))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    fn uses_scripts_dir(&self) -> bool {
        !self.root.join("bin").is_dir() && self.root.join("Scripts").is_dir()
    }

    pub fn bin_dir(&self) -> PathBuf {
        if self.uses_scripts_dir() {
            self.root.join("Scripts")
        } else {
            self.root.join("bin")
        }
    }

    pub fn activate_script(&self) -> PathBuf {
        self.bin_dir().join("activate")
    }

    pub fn python(&self) -> PathBuf {
        if self.uses_scripts_dir() {
            self.bin_dir().join("python.exe")
        } else {
            self.bin_dir().join("python")
        }
    }

    pub fn pyvenv_cfg(&self) -> PathBuf {
        self.root.join("pyvenv.cfg")
    }

    /// `pyvenv.cfg` is written by `python -m venv` and virtualenv alike.
    pub fn looks_like_venv(&self) -> bool {
        self.pyvenv_cfg().is_file()
    }
}
