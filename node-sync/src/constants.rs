//! Fixed intervals, delays, file names and configuration defaults
//!
//! Grouped by the component that consumes them so there is a single place
//! to look up every magic number used by the agent.

use std::time::Duration;

/// Scheduler timing
pub mod schedule {
    use super::Duration;

    /// How often the wall clock is checked for a checkpoint
    pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

    /// Wait after a successful noon handoff before asking the OS to shut down,
    /// and the boot grace period before a midnight handoff
    pub const HANDOFF_GRACE_PERIOD: Duration = Duration::from_secs(60);

    /// Hour of the noon checkpoint (minute is always 0)
    pub const NOON_HOUR: u32 = 12;

    /// Hour of the midnight checkpoint (minute is always 0)
    pub const MIDNIGHT_HOUR: u32 = 0;
}

/// Backup bundle naming and retention
pub mod backup {
    /// Bundles older than this many seconds are deleted
    pub const RETENTION_SECONDS: u64 = 7 * 24 * 3600;

    /// Prefix shared by every bundle filename
    pub const FILE_PREFIX: &str = "backup_";

    /// Suffix shared by every bundle filename
    pub const FILE_SUFFIX: &str = ".tar.gz";

    /// chrono format of the timestamp embedded in the bundle name
    pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
}

/// On-disk layout
pub mod files {
    /// Snapshot document inside the data directory
    pub const SNAPSHOT_FILE: &str = "player_data.json";

    /// Append-only log file, relative to the working directory
    pub const LOG_FILE: &str = "sync.log";

    /// Configuration file used when none is given on the command line
    pub const DEFAULT_CONFIG_FILE: &str = "sync_config.toml";
}

/// Network constants for local address discovery and wake signals
pub mod network {
    /// Well-known external address used to discover the outbound interface.
    /// Nothing is ever sent to it.
    pub const IP_PROBE_ADDRESS: &str = "8.8.8.8:80";

    /// Address reported when the outbound interface cannot be determined
    pub const LOOPBACK_ADDRESS: &str = "127.0.0.1";

    /// Broadcast target for Wake-on-LAN magic packets (discard port)
    pub const WAKE_BROADCAST_ADDRESS: &str = "255.255.255.255:9";
}

/// Platform shutdown delays
pub mod shutdown {
    /// `shutdown /t` argument on Windows, in seconds
    pub const WINDOWS_DELAY_SECONDS: u32 = 30;

    /// `shutdown -h` argument on Unix-like systems
    pub const UNIX_DELAY_ARG: &str = "+1";
}

/// Default configuration values
pub mod defaults {
    pub const DATA_DIR: &str = "./data";
    pub const BACKUP_DIR: &str = "./backup";
    pub const SYNC_PORT: u16 = 9999;
    pub const SYNC_INTERVAL_SECONDS: u64 = 60;
    pub const AUTO_SHUTDOWN: bool = true;
    pub const SHUTDOWN_DELAY_SECONDS: u64 = 60;
    pub const BACKUP_BEFORE_SYNC: bool = true;

    /// Peer address used when the configuration does not name one
    pub const SECONDARY_IP: &str = "192.168.1.100";
}
