pub mod backup;
pub mod config;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod scheduler;
pub mod services;
pub mod store;

// Re-export commonly used types
pub use backup::BackupManager;
pub use config::{ConfigManager, Role, SyncConfig};
pub use scheduler::{Checkpoint, CheckpointReport, Clock, SyncScheduler, SystemClock};
pub use services::{LocalTransfer, PowerControl, SystemPower, Transfer};
pub use store::{DataStore, PlayerSnapshot};
