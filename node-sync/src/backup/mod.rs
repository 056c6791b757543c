// File: node-sync/src/backup/mod.rs

//! Timestamped backups of the data directory with age-based retention
//!
//! # Bundle Naming
//!
//! `backup_YYYYMMDD_HHMMSS.tar.gz` in the backup directory, local time,
//! second resolution. Two backups in the same second share a name and the
//! later one replaces the earlier.
//!
//! # Backup Process
//!
//! 1. Skip entirely when `backup_before_sync` is off
//! 2. `tar -czf` the whole data directory into a new bundle
//! 3. Delete every bundle whose mtime is more than 7 days old
//!
//! Nothing in here propagates a failure to the scheduler: a failed backup is
//! logged and the handoff it precedes carries on.

pub mod manager;

pub use manager::{BackupInfo, BackupManager, BackupStats};
