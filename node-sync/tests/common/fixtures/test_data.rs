//! Common test data and helpers

use serde_json::{json, Value};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const DAY: Duration = Duration::from_secs(24 * 3600);

/// Common peer addresses
pub mod peers {
    pub const SECONDARY_IP: &str = "192.168.1.100";
    pub const SECONDARY_MAC: &str = "00:1a:2b:3c:4d:5e";
}

/// Current time truncated to whole seconds, so mtimes set from it survive
/// filesystems with coarse timestamps unchanged
pub fn whole_second_now() -> SystemTime {
    let secs = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();
    UNIX_EPOCH + Duration::from_secs(secs)
}

/// Create a file whose mtime is `age` before `now`
pub fn write_file_with_age(dir: &Path, name: &str, now: SystemTime, age: Duration) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"bundle").unwrap();
    File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(now - age)
        .unwrap();
    path
}

/// A persisted snapshot document with one player, one stat and one message
pub fn sample_snapshot_document() -> Value {
    json!({
        "timestamp": "2025-01-24T23:59:30",
        "server_ip": "10.0.0.1",
        "players": {
            "player-1": { "name": "Ана", "level": 12 }
        },
        "game_stats": { "matches_played": 42 },
        "messages": [
            { "from": "player-1", "text": "привет" }
        ]
    })
}

pub fn write_snapshot_document(data_dir: &Path, document: &Value) -> PathBuf {
    let path = data_dir.join("player_data.json");
    fs::write(&path, serde_json::to_string_pretty(document).unwrap()).unwrap();
    path
}
