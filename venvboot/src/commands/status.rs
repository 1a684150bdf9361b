//! `venvboot status`: read-only view of the environment and manifest.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use venvboot_core::config::BootstrapConfig;
use venvboot_env::{EnvLayout, Requirements};

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub env_dir: PathBuf,
    pub env_exists: bool,
    pub is_venv: bool,
    pub has_activate_script: bool,
    pub has_python: bool,
    pub manifest: PathBuf,
    pub manifest_found: bool,
    pub requirements: Option<Requirements>,
}

pub fn collect_status(work_dir: &Path, cfg: &BootstrapConfig) -> Result<StatusReport> {
    let layout = EnvLayout::in_dir(work_dir, &cfg.env_dir);
    let manifest = work_dir.join(&cfg.requirements);
    let manifest_found = manifest.is_file();
    let requirements = if manifest_found {
        Some(Requirements::load(&manifest)?)
    } else {
        None
    };
    Ok(StatusReport {
        env_dir: layout.root().to_path_buf(),
        env_exists: layout.exists(),
        is_venv: layout.looks_like_venv(),
        has_activate_script: layout.activate_script().is_file(),
        has_python: layout.python().exists(),
        manifest,
        manifest_found,
        requirements,
    })
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

pub fn cmd_status(cfg: &BootstrapConfig, json: bool) -> Result<()> {
    let work_dir = std::env::current_dir().context("Resolve working directory")?;
    let report = collect_status(&work_dir, cfg)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Serialize status")?
        );
        return Ok(());
    }

    println!("Environment: {}", report.env_dir.display());
    println!("  exists:          {}", yes_no(report.env_exists));
    println!("  pyvenv.cfg:      {}", yes_no(report.is_venv));
    println!("  activate script: {}", yes_no(report.has_activate_script));
    println!("  python:          {}", yes_no(report.has_python));
    match report.requirements {
        Some(ref reqs) => {
            println!("Manifest: {} ({} entries)", report.manifest.display(), reqs.len());
            for req in reqs.iter() {
                println!("  • {}", req.line);
            }
        }
        None => println!("Manifest: {} (not found)", report.manifest.display()),
    }
    Ok(())
}
