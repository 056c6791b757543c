//! Test configuration builder backed by a temporary directory

use node_sync::{Role, SyncConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Builder for a configuration whose directories live in a temp dir
pub struct TestConfigBuilder {
    temp_dir: TempDir,
    config: SyncConfig,
}

impl TestConfigBuilder {
    /// Secondary node, backups on, auto shutdown on, temp data/backup dirs
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = SyncConfig {
            data_dir: temp_dir.path().join("data"),
            backup_dir: temp_dir.path().join("backup"),
            ..SyncConfig::default()
        };
        Self { temp_dir, config }
    }

    pub fn role(mut self, role: Role) -> Self {
        self.config.role = role;
        self
    }

    pub fn backup_before_sync(mut self, enabled: bool) -> Self {
        self.config.backup_before_sync = enabled;
        self
    }

    pub fn auto_shutdown(mut self, enabled: bool) -> Self {
        self.config.auto_shutdown = enabled;
        self
    }

    pub fn shutdown_delay(mut self, seconds: u64) -> Self {
        self.config.shutdown_delay = seconds;
        self
    }

    pub fn secondary_mac(mut self, mac: Option<&str>) -> Self {
        self.config.secondary_mac = mac.map(str::to_string);
        self
    }

    pub fn data_dir(mut self, data_dir: PathBuf) -> Self {
        self.config.data_dir = data_dir;
        self
    }

    /// Build and create the data and backup directories
    pub fn build(self) -> TestEnv {
        fs::create_dir_all(&self.config.data_dir).ok();
        fs::create_dir_all(&self.config.backup_dir).expect("Failed to create backup dir");
        TestEnv {
            temp_dir: self.temp_dir,
            config: Arc::new(self.config),
        }
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TestEnv {
    pub temp_dir: TempDir,
    pub config: Arc<SyncConfig>,
}

impl TestEnv {
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    pub fn backup_dir(&self) -> &Path {
        &self.config.backup_dir
    }

    /// Write a config file into the temp dir and return its path
    pub fn write_config_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, content).expect("Failed to write config file");
        path
    }
}
