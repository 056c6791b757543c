//! Error types for the sync agent
//!
//! Every component logs and swallows its own failures at its public
//! boundary; these types carry the context into that log line and let
//! callers and tests tell failure kinds apart.

use std::fmt;
use std::path::PathBuf;

/// Main error type for the sync agent
#[derive(Debug)]
pub enum SyncError {
    /// Configuration-related errors
    Config(ConfigError),

    /// Snapshot document errors
    Store(StoreError),

    /// Backup bundle errors
    Backup(BackupError),

    /// Shutdown and wake errors
    Power(PowerError),
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    LoadFailed { path: PathBuf, reason: String },

    /// Configuration parsing error
    ParseError { path: PathBuf, reason: String },

    /// Could not create a configured directory
    DirectoryFailed { path: PathBuf, reason: String },
}

/// Snapshot document error variants
#[derive(Debug)]
pub enum StoreError {
    /// Persisted document could not be read
    ReadFailed { path: PathBuf, reason: String },

    /// Persisted document is not a valid snapshot
    Corrupt { path: PathBuf, reason: String },

    /// Snapshot could not be written
    WriteFailed { path: PathBuf, reason: String },
}

/// Backup bundle error variants
#[derive(Debug)]
pub enum BackupError {
    /// Archiver could not be started
    SpawnFailed { reason: String },

    /// Bundle location could not be made absolute
    BundlePathFailed { bundle: PathBuf, reason: String },

    /// Archiver exited with a failure status
    ArchiveFailed { bundle: PathBuf, stderr: String },

    /// Bundle directory could not be enumerated
    ListFailed { path: PathBuf, reason: String },

    /// A bundle could not be removed
    DeleteFailed { bundle: PathBuf, reason: String },
}

/// Power control error variants
#[derive(Debug)]
pub enum PowerError {
    /// Shutdown command could not be run or was refused
    ShutdownFailed { reason: String },

    /// No hardware address available for the wake signal
    MissingMac,

    /// Hardware address is not a 48-bit MAC
    InvalidMac { mac: String },

    /// Wake packet could not be sent
    WakeFailed { mac: String, reason: String },
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Config(e) => write!(f, "Configuration error: {}", e),
            SyncError::Store(e) => write!(f, "Data store error: {}", e),
            SyncError::Backup(e) => write!(f, "Backup error: {}", e),
            SyncError::Power(e) => write!(f, "Power control error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to read config '{}': {}", path.display(), reason)
            }
            ConfigError::ParseError { path, reason } => {
                write!(f, "Failed to parse config '{}': {}", path.display(), reason)
            }
            ConfigError::DirectoryFailed { path, reason } => {
                write!(f, "Failed to create directory '{}': {}", path.display(), reason)
            }
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::ReadFailed { path, reason } => {
                write!(f, "Failed to read '{}': {}", path.display(), reason)
            }
            StoreError::Corrupt { path, reason } => {
                write!(f, "Invalid snapshot in '{}': {}", path.display(), reason)
            }
            StoreError::WriteFailed { path, reason } => {
                write!(f, "Failed to write '{}': {}", path.display(), reason)
            }
        }
    }
}

impl fmt::Display for BackupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupError::SpawnFailed { reason } => {
                write!(f, "Failed to start tar: {}", reason)
            }
            BackupError::BundlePathFailed { bundle, reason } => {
                write!(f, "Cannot resolve bundle path '{}': {}", bundle.display(), reason)
            }
            BackupError::ArchiveFailed { bundle, stderr } => {
                write!(f, "tar failed for '{}': {}", bundle.display(), stderr)
            }
            BackupError::ListFailed { path, reason } => {
                write!(f, "Failed to list bundles in '{}': {}", path.display(), reason)
            }
            BackupError::DeleteFailed { bundle, reason } => {
                write!(f, "Failed to delete '{}': {}", bundle.display(), reason)
            }
        }
    }
}

impl fmt::Display for PowerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerError::ShutdownFailed { reason } => {
                write!(f, "Shutdown request failed: {}", reason)
            }
            PowerError::MissingMac => write!(f, "No secondary MAC address configured"),
            PowerError::InvalidMac { mac } => write!(f, "Invalid MAC address: '{}'", mac),
            PowerError::WakeFailed { mac, reason } => {
                write!(f, "Failed to send wake packet to {}: {}", mac, reason)
            }
        }
    }
}

impl std::error::Error for SyncError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for StoreError {}
impl std::error::Error for BackupError {}
impl std::error::Error for PowerError {}

impl From<ConfigError> for SyncError {
    fn from(err: ConfigError) -> Self {
        SyncError::Config(err)
    }
}

impl From<StoreError> for SyncError {
    fn from(err: StoreError) -> Self {
        SyncError::Store(err)
    }
}

impl From<BackupError> for SyncError {
    fn from(err: BackupError) -> Self {
        SyncError::Backup(err)
    }
}

impl From<PowerError> for SyncError {
    fn from(err: PowerError) -> Self {
        SyncError::Power(err)
    }
}
