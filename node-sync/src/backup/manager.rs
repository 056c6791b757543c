// File: node-sync/src/backup/manager.rs
use chrono::{DateTime, Local, NaiveDateTime};
use glob::{glob, Pattern};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::fs;
use tokio::process::Command as AsyncCommand;
use tracing::{debug, error, info, warn};

use crate::config::SyncConfig;
use crate::constants::backup::{FILE_PREFIX, FILE_SUFFIX, RETENTION_SECONDS, TIMESTAMP_FORMAT};
use crate::errors::BackupError;

#[derive(Debug, Clone, Serialize)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub created_at: NaiveDateTime,
    #[serde(skip)]
    pub modified: SystemTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct BackupStats {
    pub total_backups: usize,
    pub total_size_bytes: u64,
    pub oldest_backup: Option<NaiveDateTime>,
    pub newest_backup: Option<NaiveDateTime>,
}

#[derive(Clone)]
pub struct BackupManager {
    config: Arc<SyncConfig>,
}

impl BackupManager {
    pub fn new(config: Arc<SyncConfig>) -> Self {
        Self { config }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.config.backup_dir
    }

    /// Archive the data directory and prune old bundles.
    ///
    /// Returns the new bundle path, or `None` when backups are disabled or
    /// the archive could not be written (already logged).
    pub async fn backup(&self) -> Option<PathBuf> {
        if !self.config.backup_before_sync {
            debug!("Backup before sync disabled, skipping backup");
            return None;
        }

        match self.create_bundle().await {
            Ok(bundle) => {
                info!("Data backup completed: {}", bundle.display());
                self.cleanup_old_backups().await;
                Some(bundle)
            }
            Err(e) => {
                error!("Failed to back up data: {}", e);
                None
            }
        }
    }

    async fn create_bundle(&self) -> Result<PathBuf, BackupError> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let filename = format!("{}{}{}", FILE_PREFIX, timestamp, FILE_SUFFIX);
        let relative = self.config.backup_dir.join(&filename);
        let bundle = std::path::absolute(&relative).map_err(|e| BackupError::BundlePathFailed {
            bundle: relative.clone(),
            reason: e.to_string(),
        })?;

        let (archive_root, archive_entry) = archive_root(&self.config.data_dir);
        debug!(
            "Archiving {} from {} into {}",
            archive_entry.display(),
            archive_root.display(),
            bundle.display()
        );

        let output = AsyncCommand::new("tar")
            .arg("-czf")
            .arg(&bundle)
            .arg("-C")
            .arg(&archive_root)
            .arg(&archive_entry)
            .output()
            .await
            .map_err(|e| BackupError::SpawnFailed {
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            // Don't leave a truncated bundle behind for retention to count
            let _ = fs::remove_file(&bundle).await;
            return Err(BackupError::ArchiveFailed { bundle, stderr });
        }

        Ok(bundle)
    }

    /// Delete bundles older than the retention window. Returns how many were deleted.
    pub async fn cleanup_old_backups(&self) -> usize {
        self.cleanup_old_backups_at(SystemTime::now()).await
    }

    /// Same as [`cleanup_old_backups`](Self::cleanup_old_backups) with an explicit "now".
    pub async fn cleanup_old_backups_at(&self, now: SystemTime) -> usize {
        let retention = Duration::from_secs(RETENTION_SECONDS);

        let bundles = match self.bundle_paths() {
            Ok(bundles) => bundles,
            Err(e) => {
                warn!("Failed to clean up old backups: {}", e);
                return 0;
            }
        };

        let mut deleted_count = 0;
        for bundle in bundles {
            let modified = match fs::metadata(&bundle).await.and_then(|m| m.modified()) {
                Ok(modified) => modified,
                Err(e) => {
                    warn!("Could not read mtime of {}: {}", bundle.display(), e);
                    continue;
                }
            };

            // A bundle from the future has age zero
            let age = now.duration_since(modified).unwrap_or_default();
            if age <= retention {
                continue;
            }

            match fs::remove_file(&bundle).await {
                Ok(()) => {
                    info!("Deleted old backup: {}", bundle.display());
                    deleted_count += 1;
                }
                Err(e) => {
                    let err = BackupError::DeleteFailed {
                        bundle: bundle.clone(),
                        reason: e.to_string(),
                    };
                    warn!("Failed to clean up old backups: {}", err);
                }
            }
        }

        deleted_count
    }

    /// All bundles in the backup directory, newest first.
    pub async fn list_backups(&self) -> Result<Vec<BackupInfo>, BackupError> {
        let mut backups = Vec::new();

        for path in self.bundle_paths()? {
            let metadata = match fs::metadata(&path).await {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!("Skipping unreadable bundle {}: {}", path.display(), e);
                    continue;
                }
            };

            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();
            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);

            // Name carries the creation time; mtime is the fallback
            let created_at = parse_bundle_timestamp(&filename)
                .unwrap_or_else(|| DateTime::<Local>::from(modified).naive_local());

            backups.push(BackupInfo {
                filename,
                path,
                size_bytes: metadata.len(),
                created_at,
                modified,
            });
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(backups)
    }

    pub async fn backup_stats(&self) -> Result<BackupStats, BackupError> {
        let backups = self.list_backups().await?;

        Ok(BackupStats {
            total_backups: backups.len(),
            total_size_bytes: backups.iter().map(|b| b.size_bytes).sum(),
            oldest_backup: backups.iter().map(|b| b.created_at).min(),
            newest_backup: backups.iter().map(|b| b.created_at).max(),
        })
    }

    fn bundle_paths(&self) -> Result<Vec<PathBuf>, BackupError> {
        let backup_dir = &self.config.backup_dir;
        let dir_str = backup_dir.to_str().ok_or_else(|| BackupError::ListFailed {
            path: backup_dir.clone(),
            reason: "path is not valid UTF-8".to_string(),
        })?;

        let pattern = format!(
            "{}/{}*{}",
            Pattern::escape(dir_str),
            FILE_PREFIX,
            FILE_SUFFIX
        );

        let entries = glob(&pattern).map_err(|e| BackupError::ListFailed {
            path: backup_dir.clone(),
            reason: e.to_string(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => paths.push(path),
                Ok(_) => {}
                Err(e) => warn!("Glob entry error in {}: {}", backup_dir.display(), e),
            }
        }
        Ok(paths)
    }
}

/// Directory to `tar -C` into and the entry to archive from there, so the
/// bundle contains the data directory under its own name.
fn archive_root(data_dir: &Path) -> (PathBuf, PathBuf) {
    match (data_dir.parent(), data_dir.file_name()) {
        (Some(parent), Some(name)) if parent.as_os_str().is_empty() => {
            (PathBuf::from("."), PathBuf::from(name))
        }
        (Some(parent), Some(name)) => (parent.to_path_buf(), PathBuf::from(name)),
        _ => (data_dir.to_path_buf(), PathBuf::from(".")),
    }
}

fn parse_bundle_timestamp(filename: &str) -> Option<NaiveDateTime> {
    let ts = filename.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
    NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).ok()
}
