use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_salesboard_home;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataSection,
    pub backend: BackendSection,
    pub ui: UiSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSection {
    /// Default CSV source: a local path or an http(s) URL
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSection {
    /// Account/vote store base URL; unset means the local file store
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSection {
    /// Metric shown on startup (retail-sales, retail-transfers, warehouse-sales)
    pub metric: String,
    /// Draw all three series on startup
    pub show_all: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataSection {
                // Resolves when run from the workspace root; point this at
                // your own export or URL
                source: "salesboard-ingest/data/warehouse_and_retail_sales_sample.csv".to_string(),
            },
            backend: BackendSection { base_url: None },
            ui: UiSection {
                metric: "retail-sales".to_string(),
                show_all: false,
            },
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_salesboard_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let cfg = Config::default();
    save_config(&cfg)?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let cfg = load_config()?;
    let s = toml::to_string_pretty(&cfg).context("serialize config")?;
    print!("{s}");
    Ok(())
}
