//! `venvboot clean`: remove the environment directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use venvboot_core::config::BootstrapConfig;
use venvboot_env::EnvLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanOutcome {
    NotFound,
    /// Directory exists but has no pyvenv.cfg and `--force` was not given.
    NotAVenv,
    DryRun { bytes: u64 },
    Cancelled,
    Removed { bytes: u64 },
}

impl CleanOutcome {
    /// A refusal is the only outcome scripts need to tell apart from success.
    pub fn exit_code(&self) -> i32 {
        match self {
            CleanOutcome::NotAVenv => 1,
            _ => 0,
        }
    }
}

/// Remove `layout.root()`. `confirm` is asked only when not forced.
pub fn clean_env<F>(
    layout: &EnvLayout,
    dry_run: bool,
    force: bool,
    confirm: F,
) -> Result<CleanOutcome>
where
    F: FnOnce() -> Result<bool>,
{
    if !layout.exists() {
        return Ok(CleanOutcome::NotFound);
    }
    if !layout.looks_like_venv() && !force {
        return Ok(CleanOutcome::NotAVenv);
    }
    let bytes = dir_size(layout.root());
    if dry_run {
        return Ok(CleanOutcome::DryRun { bytes });
    }
    if !force && !confirm()? {
        return Ok(CleanOutcome::Cancelled);
    }
    fs::remove_dir_all(layout.root())
        .with_context(|| format!("Remove {}", layout.root().display()))?;
    tracing::info!(env = %layout.root().display(), bytes, "Removed virtual environment");
    Ok(CleanOutcome::Removed { bytes })
}

fn ask_confirmation(root: &Path) -> Result<bool> {
    eprint!("Remove {}? [y/N] ", root.display());
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Returns the exit code: 1 when the directory was refused, else 0.
pub fn cmd_clean(cfg: &BootstrapConfig, dry_run: bool, force: bool) -> Result<i32> {
    let work_dir = std::env::current_dir().context("Resolve working directory")?;
    let layout = EnvLayout::in_dir(&work_dir, &cfg.env_dir);
    let root = layout.root().display().to_string();

    let outcome = clean_env(&layout, dry_run, force, || ask_confirmation(layout.root()))?;
    match outcome {
        CleanOutcome::NotFound => eprintln!("No virtual environment at {}", root),
        CleanOutcome::NotAVenv => eprintln!(
            "{} has no pyvenv.cfg; refusing to remove it (use --force to override)",
            root
        ),
        CleanOutcome::DryRun { bytes } => {
            eprintln!("Would remove {} ({})", root, format_size(bytes));
            eprintln!("(Dry run, nothing removed. Drop --dry-run to delete.)");
        }
        CleanOutcome::Cancelled => eprintln!("Cancelled."),
        CleanOutcome::Removed { bytes } => {
            eprintln!("✓ Removed {}, freed {}", root, format_size(bytes))
        }
    }
    Ok(outcome.exit_code())
}

/// Total size of regular files under `path`. Symlinks are not followed.
fn dir_size(path: &Path) -> u64 {
    let mut total: u64 = 0;
    if let Ok(entries) = fs::read_dir(path) {
        for entry in entries.flatten() {
            let Ok(ft) = entry.file_type() else { continue };
            if ft.is_dir() {
                total += dir_size(&entry.path());
            } else if ft.is_file() {
                if let Ok(meta) = entry.metadata() {
                    total += meta.len();
                }
            }
        }
    }
    total
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venv(tmp: &Path) -> EnvLayout {
        let layout = EnvLayout::new(tmp.join("venv"));
        fs::create_dir_all(layout.bin_dir()).unwrap();
        fs::write(layout.pyvenv_cfg(), "home = /usr/bin\n").unwrap();
        fs::write(layout.bin_dir().join("python"), vec![0u8; 2048]).unwrap();
        layout
    }

    #[test]
    fn test_clean_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = EnvLayout::new(tmp.path().join("venv"));
        let out = clean_env(&layout, false, true, || Ok(true)).unwrap();
        assert_eq!(out, CleanOutcome::NotFound);
        assert_eq!(out.exit_code(), 0);
    }

    #[test]
    fn test_clean_dry_run_keeps_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = venv(tmp.path());
        let out = clean_env(&layout, true, false, || panic!("no prompt on dry run")).unwrap();
        assert!(matches!(out, CleanOutcome::DryRun { bytes } if bytes >= 2048));
        assert!(layout.exists());
    }

    #[test]
    fn test_clean_cancelled() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = venv(tmp.path());
        let out = clean_env(&layout, false, false, || Ok(false)).unwrap();
        assert_eq!(out, CleanOutcome::Cancelled);
        assert!(layout.exists());
    }

    #[test]
    fn test_clean_confirmed_removes() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = venv(tmp.path());
        let out = clean_env(&layout, false, false, || Ok(true)).unwrap();
        assert!(matches!(out, CleanOutcome::Removed { .. }));
        assert_eq!(out.exit_code(), 0);
        assert!(!layout.exists());
    }

    #[test]
    fn test_clean_refuses_non_venv_without_force() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = EnvLayout::new(tmp.path().join("venv"));
        fs::create_dir_all(layout.root()).unwrap();
        let refused = clean_env(&layout, false, false, || Ok(true)).unwrap();
        assert_eq!(refused, CleanOutcome::NotAVenv);
        assert_eq!(refused.exit_code(), 1);
        assert!(layout.exists());
        assert!(matches!(
            clean_env(&layout, false, true, || panic!("forced")).unwrap(),
            CleanOutcome::Removed { .. }
        ));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }
}
