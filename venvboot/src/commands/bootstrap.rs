//! `venvboot` (no subcommand)

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;
use venvboot_core::config::BootstrapConfig;
use venvboot_env::{run_bootstrap, EnvLayout, HostToolchain, Toolchain};

/// Run the bootstrap in the current directory; returns the exit code.
pub fn cmd_bootstrap(cfg: &BootstrapConfig) -> Result<i32> {
    let work_dir = std::env::current_dir().context("Resolve working directory")?;
    let toolchain = HostToolchain::new(cfg.python.clone()).with_work_dir(&work_dir);
    bootstrap_in(&work_dir, cfg, &toolchain, &mut io::stdout(), &mut io::stderr())
}

/// Bootstrap `cfg.env_dir` under `work_dir`. User-facing notices go to
/// `out`, the activation failure to `err`.
///
/// Exit code is 1 on activation failure, otherwise 0: installer failures
/// are reported by the installer itself.
pub fn bootstrap_in<T, O, E>(
    work_dir: &Path,
    cfg: &BootstrapConfig,
    toolchain: &T,
    out: &mut O,
    err: &mut E,
) -> Result<i32>
where
    T: Toolchain + ?Sized,
    O: Write,
    E: Write,
{
    let layout = EnvLayout::in_dir(work_dir, &cfg.env_dir);
    let manifest = work_dir.join(&cfg.requirements);

    match run_bootstrap(toolchain, &layout, &manifest) {
        Ok(report) => {
            if !report.manifest_found() {
                writeln!(
                    out,
                    "{} not found, skipping dependency installation",
                    cfg.requirements.display()
                )?;
            }
            tracing::debug!(?report, "Bootstrap finished");
            Ok(0)
        }
        Err(e) => {
            writeln!(err, "{}", e)?;
            Ok(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::ffi::OsString;
    use std::fs;
    use venvboot_env::{Activation, ActivationError, StepOutcome};

    /// Creates the env dir on `create_env`; activation fails when the
    /// activate script is absent, like the host toolchain.
    #[derive(Default)]
    struct FakeToolchain {
        calls: RefCell<Vec<&'static str>>,
        write_activate: bool,
        pip_exit: Option<i32>,
    }

    impl FakeToolchain {
        fn pip(&self, call: &'static str) -> io::Result<StepOutcome> {
            self.calls.borrow_mut().push(call);
            Ok(match self.pip_exit {
                Some(code) => StepOutcome::Failed { code: Some(code) },
                None => StepOutcome::Succeeded,
            })
        }
    }

    impl Toolchain for FakeToolchain {
        fn create_env(&self, layout: &EnvLayout) -> io::Result<StepOutcome> {
            self.calls.borrow_mut().push("create");
            fs::create_dir_all(layout.bin_dir())?;
            if self.write_activate {
                fs::write(layout.activate_script(), "")?;
            }
            Ok(StepOutcome::Succeeded)
        }

        fn activate(&self, layout: &EnvLayout) -> Result<Activation, ActivationError> {
            self.calls.borrow_mut().push("activate");
            if !layout.activate_script().is_file() {
                return Err(ActivationError::MissingScript(layout.activate_script()));
            }
            Ok(Activation {
                virtual_env: layout.root().to_path_buf(),
                path: OsString::from("/bin"),
            })
        }

        fn upgrade_installer(&self, _: &EnvLayout, _: &Activation) -> io::Result<StepOutcome> {
            self.pip("upgrade")
        }

        fn install_requirements(
            &self,
            _: &EnvLayout,
            _: &Activation,
            _: &Path,
        ) -> io::Result<StepOutcome> {
            self.pip("install")
        }
    }

    fn run(work_dir: &Path, tc: &FakeToolchain) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = bootstrap_in(work_dir, &BootstrapConfig::default(), tc, &mut out, &mut err)
            .unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_missing_manifest_prints_notice_and_exits_zero() {
        let tmp = tempfile::tempdir().unwrap();
        let tc = FakeToolchain {
            write_activate: true,
            ..Default::default()
        };
        let (code, out, err) = run(tmp.path(), &tc);
        assert_eq!(code, 0);
        assert_eq!(
            out,
            "requirements.txt not found, skipping dependency installation\n"
        );
        assert!(err.is_empty());
        assert_eq!(*tc.calls.borrow(), vec!["create", "activate", "upgrade"]);
    }

    #[test]
    fn test_manifest_present_installs_silently() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("requirements.txt"), "boto3\n").unwrap();
        let tc = FakeToolchain {
            write_activate: true,
            ..Default::default()
        };
        let (code, out, err) = run(tmp.path(), &tc);
        assert_eq!(code, 0);
        assert!(out.is_empty());
        assert!(err.is_empty());
        assert_eq!(
            *tc.calls.borrow(),
            vec!["create", "activate", "upgrade", "install"]
        );
    }

    #[test]
    fn test_activation_failure_exits_one() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("requirements.txt"), "boto3\n").unwrap();
        let tc = FakeToolchain::default();
        let (code, out, err) = run(tmp.path(), &tc);
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(err.starts_with("Failed to activate virtual environment"));
        assert_eq!(*tc.calls.borrow(), vec!["create", "activate"]);
    }

    #[test]
    fn test_installer_failure_still_exits_zero() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("requirements.txt"), "boto3\n").unwrap();
        let tc = FakeToolchain {
            write_activate: true,
            pip_exit: Some(1),
            ..Default::default()
        };
        let (code, _, err) = run(tmp.path(), &tc);
        assert_eq!(code, 0);
        assert!(err.is_empty());
    }
}
