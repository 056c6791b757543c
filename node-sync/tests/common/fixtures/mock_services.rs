//! Transfer and power collaborators that record calls instead of acting

use node_sync::{PlayerSnapshot, PowerControl, Transfer};
use std::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum TransferCall {
    Push { peer: String, port: Option<u16> },
    Receive,
    Apply { server_ip: String },
}

/// Returns canned results and remembers when each method was called
pub struct RecordingTransfer {
    succeed: bool,
    calls: Mutex<Vec<(TransferCall, Instant)>>,
}

impl RecordingTransfer {
    pub fn succeeding() -> Self {
        Self::with_result(true)
    }

    pub fn failing() -> Self {
        Self::with_result(false)
    }

    pub fn with_result(succeed: bool) -> Self {
        Self {
            succeed,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<TransferCall> {
        self.calls.lock().unwrap().iter().map(|(c, _)| c.clone()).collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }

    fn record(&self, call: TransferCall) -> bool {
        self.calls.lock().unwrap().push((call, Instant::now()));
        self.succeed
    }
}

impl Transfer for RecordingTransfer {
    async fn sync_to_secondary(&self, peer_address: &str, peer_port: Option<u16>) -> bool {
        self.record(TransferCall::Push {
            peer: peer_address.to_string(),
            port: peer_port,
        })
    }

    async fn receive_from_primary(&self) -> bool {
        self.record(TransferCall::Receive)
    }

    async fn apply_synced_data(&self, snapshot: PlayerSnapshot) -> bool {
        self.record(TransferCall::Apply {
            server_ip: snapshot.server_ip,
        })
    }
}

/// Counts shutdown requests and wake attempts without touching the host
#[derive(Default)]
pub struct RecordingPower {
    shutdowns: Mutex<Vec<Instant>>,
    wakes: Mutex<Vec<Option<String>>>,
}

impl RecordingPower {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shutdown_count(&self) -> usize {
        self.shutdowns.lock().unwrap().len()
    }

    pub fn shutdown_times(&self) -> Vec<Instant> {
        self.shutdowns.lock().unwrap().clone()
    }

    pub fn wakes(&self) -> Vec<Option<String>> {
        self.wakes.lock().unwrap().clone()
    }
}

impl PowerControl for RecordingPower {
    async fn shutdown(&self) -> bool {
        self.shutdowns.lock().unwrap().push(Instant::now());
        true
    }

    async fn wake_peer(&self, mac: Option<&str>) -> bool {
        self.wakes.lock().unwrap().push(mac.map(str::to_string));
        mac.is_some()
    }
}
