// File: node-sync/src/config/mod.rs
pub mod manager;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
pub use manager::ConfigManager;

use crate::constants::defaults;

/// Which side of the pair this process runs on. Fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Primary,
    Secondary,
}

impl Role {
    pub fn is_primary(self) -> bool {
        matches!(self, Role::Primary)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Primary => write!(f, "primary"),
            Role::Secondary => write!(f, "secondary"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncConfig {
    pub data_dir: PathBuf,
    pub backup_dir: PathBuf,
    pub role: Role,
    pub sync_port: u16,
    pub sync_interval: u64,
    pub auto_shutdown: bool,
    pub shutdown_delay: u64,
    pub backup_before_sync: bool,
    pub secondary_ip: String,
    pub secondary_mac: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(defaults::DATA_DIR),
            backup_dir: PathBuf::from(defaults::BACKUP_DIR),
            role: Role::Secondary,
            sync_port: defaults::SYNC_PORT,
            sync_interval: defaults::SYNC_INTERVAL_SECONDS,
            auto_shutdown: defaults::AUTO_SHUTDOWN,
            shutdown_delay: defaults::SHUTDOWN_DELAY_SECONDS,
            backup_before_sync: defaults::BACKUP_BEFORE_SYNC,
            secondary_ip: defaults::SECONDARY_IP.to_string(),
            secondary_mac: None,
        }
    }
}

/// Keys as they appear in a configuration file. Every key is optional and
/// unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub data_dir: Option<PathBuf>,
    pub backup_dir: Option<PathBuf>,
    pub role: Option<Role>,
    // Legacy spelling of `role`
    pub is_primary: Option<bool>,
    pub sync_port: Option<u16>,
    pub sync_interval: Option<u64>,
    pub auto_shutdown: Option<bool>,
    pub shutdown_delay: Option<u64>,
    pub backup_before_sync: Option<bool>,
    pub secondary_ip: Option<String>,
    pub secondary_mac: Option<String>,
}

impl SyncConfig {
    /// Overlay the keys present in `file` on top of `self`.
    pub fn merged_with(mut self, file: ConfigFile) -> Self {
        if let Some(data_dir) = file.data_dir {
            self.data_dir = data_dir;
        }
        if let Some(backup_dir) = file.backup_dir {
            self.backup_dir = backup_dir;
        }

        let legacy_role = file
            .is_primary
            .map(|primary| if primary { Role::Primary } else { Role::Secondary });
        if let Some(role) = file.role.or(legacy_role) {
            self.role = role;
        }

        if let Some(sync_port) = file.sync_port {
            self.sync_port = sync_port;
        }
        if let Some(sync_interval) = file.sync_interval {
            self.sync_interval = sync_interval;
        }
        if let Some(auto_shutdown) = file.auto_shutdown {
            self.auto_shutdown = auto_shutdown;
        }
        if let Some(shutdown_delay) = file.shutdown_delay {
            self.shutdown_delay = shutdown_delay;
        }
        if let Some(backup_before_sync) = file.backup_before_sync {
            self.backup_before_sync = backup_before_sync;
        }
        if let Some(secondary_ip) = file.secondary_ip {
            self.secondary_ip = secondary_ip;
        }
        if file.secondary_mac.is_some() {
            self.secondary_mac = file.secondary_mac;
        }
        self
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(crate::constants::files::SNAPSHOT_FILE)
    }
}
