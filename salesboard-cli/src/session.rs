use anyhow::{Context, Result};
use salesboard_backend::AuthSession;
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_salesboard_home;

fn session_path() -> Result<PathBuf> {
    Ok(ensure_salesboard_home()?.join("session.json"))
}

/// Cached session from the last sign-in, if any
pub fn load_session() -> Result<Option<AuthSession>> {
    let p = session_path()?;
    if !p.exists() {
        return Ok(None);
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(Some(serde_json::from_str(&s)?))
}

pub fn save_session(session: &AuthSession) -> Result<()> {
    let p = session_path()?;
    let s = serde_json::to_string_pretty(session)?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn clear_session() -> Result<()> {
    let p = session_path()?;
    if p.exists() {
        fs::remove_file(&p).with_context(|| format!("remove {}", p.display()))?;
    }
    Ok(())
}
