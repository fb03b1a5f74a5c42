use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Primary catalog document.
    pub stock_file: PathBuf,
    /// One `stock_backup_<timestamp>.json` per save lands here.
    pub backup_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            stock_file: std::env::var("STOCK_FILE")
                .unwrap_or_else(|_| "data/stock.json".to_string())
                .into(),
            backup_dir: std::env::var("BACKUP_DIR")
                .unwrap_or_else(|_| "data/backups".to_string())
                .into(),
        })
    }
}
