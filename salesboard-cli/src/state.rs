use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn salesboard_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".salesboard"))
}

pub fn ensure_salesboard_home() -> Result<PathBuf> {
    let dir = salesboard_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Root for the file-backed account/vote store
pub fn local_backend_root() -> Result<PathBuf> {
    Ok(ensure_salesboard_home()?.join("backend"))
}
