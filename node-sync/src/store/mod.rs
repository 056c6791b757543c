//! Local player data store.
//!
//! A single JSON document (`player_data.json`) in the data directory holds
//! the node's view of player/game state. It is read when a snapshot is
//! collected and overwritten whenever synced data is applied.

mod records;

pub use records::PlayerSnapshot;

use serde_json::{Map, Value};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::net::UdpSocket;
use tracing::{debug, error, info, warn};

use crate::constants::{files, network};
use crate::errors::StoreError;

#[derive(Debug, Clone)]
pub struct DataStore {
    data_dir: PathBuf,
}

impl DataStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(files::SNAPSHOT_FILE)
    }

    /// Build a fresh snapshot and overlay the persisted document, if any.
    /// A missing or unusable document leaves the fresh snapshot as is.
    pub async fn collect(&self) -> PlayerSnapshot {
        let skeleton = PlayerSnapshot::skeleton(local_ip().await);

        let persisted = match self.read_persisted().await {
            Ok(Some(persisted)) => persisted,
            Ok(None) => {
                debug!("No persisted snapshot at {}", self.snapshot_path().display());
                return skeleton;
            }
            Err(e) => {
                warn!("Failed to collect player data: {}", e);
                return skeleton;
            }
        };

        match skeleton.clone().merged_with(persisted) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(
                    "Failed to collect player data: {}",
                    StoreError::Corrupt {
                        path: self.snapshot_path(),
                        reason: e.to_string(),
                    }
                );
                skeleton
            }
        }
    }

    /// The persisted snapshot exactly as stored, without a fresh overlay.
    pub async fn load(&self) -> Result<Option<PlayerSnapshot>, StoreError> {
        let Some(persisted) = self.read_persisted().await? else {
            return Ok(None);
        };

        serde_json::from_value(Value::Object(persisted))
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                path: self.snapshot_path(),
                reason: e.to_string(),
            })
    }

    /// Overwrite the persisted document. The failure is logged here; the
    /// result only tells callers whether the write happened.
    pub async fn save(&self, snapshot: &PlayerSnapshot) -> Result<(), StoreError> {
        let path = self.snapshot_path();

        let result = match serde_json::to_string_pretty(snapshot) {
            Ok(content) => fs::write(&path, content).await.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match result {
            Ok(()) => {
                info!("Player data saved to {}", path.display());
                Ok(())
            }
            Err(reason) => {
                let err = StoreError::WriteFailed { path, reason };
                error!("Failed to save player data: {}", err);
                Err(err)
            }
        }
    }

    async fn read_persisted(&self) -> Result<Option<Map<String, Value>>, StoreError> {
        let path = self.snapshot_path();
        match fs::try_exists(&path).await {
            Ok(true) => {}
            Ok(false) => return Ok(None),
            Err(e) => {
                return Err(StoreError::ReadFailed {
                    path,
                    reason: e.to_string(),
                })
            }
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| StoreError::ReadFailed {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(fields)) => Ok(Some(fields)),
            Ok(other) => Err(StoreError::Corrupt {
                path,
                reason: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
            Err(e) => Err(StoreError::Corrupt {
                path,
                reason: e.to_string(),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Address of the interface used for outbound traffic.
///
/// Connecting a UDP socket only selects a route, so no packet leaves the
/// host. Falls back to loopback when there is no route.
pub async fn local_ip() -> String {
    match probe_local_addr().await {
        Ok(addr) => addr.ip().to_string(),
        Err(e) => {
            debug!("Local IP discovery failed, using loopback: {}", e);
            network::LOOPBACK_ADDRESS.to_string()
        }
    }
}

async fn probe_local_addr() -> std::io::Result<SocketAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    socket.connect(network::IP_PROBE_ADDRESS).await?;
    socket.local_addr()
}
