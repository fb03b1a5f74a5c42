use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::Catalog;
use crate::seed;

/// File-backed catalog persistence.
///
/// Every call reads or rewrites the whole document. Only the physical
/// backup+write step is serialized; a load → modify → save cycle is not,
/// so two concurrent writers can still lose one another's update.
#[derive(Debug)]
pub struct Store {
    stock_file: PathBuf,
    backup_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl Store {
    /// Creates the data and backup directories if they are missing.
    pub async fn open(config: &Config) -> AppResult<Self> {
        Self::with_paths(&config.stock_file, &config.backup_dir).await
    }

    pub async fn with_paths(
        stock_file: impl AsRef<Path>,
        backup_dir: impl AsRef<Path>,
    ) -> AppResult<Self> {
        let stock_file = stock_file.as_ref().to_path_buf();
        let backup_dir = backup_dir.as_ref().to_path_buf();

        if let Some(parent) = stock_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(AppError::load_io)?;
        }
        fs::create_dir_all(&backup_dir).await.map_err(AppError::load_io)?;

        Ok(Self {
            stock_file,
            backup_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn stock_file(&self) -> &Path {
        &self.stock_file
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Reads the catalog, writing the seed catalog first if no document exists.
    pub async fn load(&self) -> AppResult<Catalog> {
        let bytes = match fs::read(&self.stock_file).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    path = %self.stock_file.display(),
                    "No stock file found, writing seed catalog"
                );
                let catalog = seed::default_catalog();
                self.save(&catalog).await?;
                return Ok(catalog);
            }
            Err(e) => return Err(AppError::load_io(e)),
        };

        let catalog: Catalog = serde_json::from_slice(&bytes)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Backs up the current document (if any) and overwrites it with `catalog`.
    pub async fn save(&self, catalog: &Catalog) -> AppResult<()> {
        let body =
            serde_json::to_vec_pretty(catalog).map_err(|e| AppError::save_io(e.into()))?;

        let _guard = self.write_lock.lock().await;

        if fs::try_exists(&self.stock_file).await.map_err(AppError::save_io)? {
            let backup = self.backup_path();
            fs::copy(&self.stock_file, &backup).await.map_err(AppError::save_io)?;
            debug!(backup = %backup.display(), "Backed up stock file");
        }

        write_replacing(&self.stock_file, &body)
            .await
            .map_err(AppError::save_io)?;

        debug!(
            path = %self.stock_file.display(),
            bytes = body.len(),
            "Saved stock file"
        );
        Ok(())
    }

    fn backup_path(&self) -> PathBuf {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        self.backup_dir.join(format!("stock_backup_{}.json", stamp))
    }
}

/// Writes `body` to a sibling temp file and renames it over `dest`, so
/// readers never see a half-written document. The temp file is removed if
/// the rename fails.
async fn write_replacing(dest: &Path, body: &[u8]) -> std::io::Result<()> {
    let tmp = dest.with_extension("json.tmp");
    fs::write(&tmp, body).await?;
    if let Err(e) = fs::rename(&tmp, dest).await {
        if let Err(cleanup) = fs::remove_file(&tmp).await {
            warn!(tmp = %tmp.display(), error = %cleanup, "Could not remove temp stock file");
        }
        return Err(e);
    }
    Ok(())
}
