// File: node-sync/src/services/power_service.rs
use std::future::Future;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::process::Command as AsyncCommand;
use tracing::{error, info, warn};

use crate::config::SyncConfig;
use crate::constants::{network, shutdown};
use crate::errors::PowerError;

pub const MAGIC_PACKET_LEN: usize = 102;

/// Host power management: delayed shutdown of this node and waking the peer.
pub trait PowerControl {
    /// Ask the OS to power off after its fixed delay. Returns whether the
    /// request was issued; a disabled auto-shutdown counts as not issued.
    fn shutdown(&self) -> impl Future<Output = bool> + Send;

    /// Wake the peer identified by `mac`, or by the configured secondary MAC.
    fn wake_peer(&self, mac: Option<&str>) -> impl Future<Output = bool> + Send;
}

#[derive(Clone)]
pub struct SystemPower {
    config: Arc<SyncConfig>,
}

impl SystemPower {
    pub fn new(config: Arc<SyncConfig>) -> Self {
        Self { config }
    }

    async fn request_shutdown(&self) -> Result<(), PowerError> {
        let output = shutdown_command()
            .output()
            .await
            .map_err(|e| PowerError::ShutdownFailed {
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PowerError::ShutdownFailed {
                reason: format!("exit {}: {}", output.status, stderr.trim()),
            });
        }
        Ok(())
    }

    async fn send_wake_packet(&self, mac: &str) -> Result<(), PowerError> {
        let packet = magic_packet(mac)?;
        let wake_failed = |e: std::io::Error| PowerError::WakeFailed {
            mac: mac.to_string(),
            reason: e.to_string(),
        };

        let socket = UdpSocket::bind("0.0.0.0:0").await.map_err(wake_failed)?;
        socket.set_broadcast(true).map_err(wake_failed)?;
        socket
            .send_to(&packet, network::WAKE_BROADCAST_ADDRESS)
            .await
            .map_err(wake_failed)?;
        Ok(())
    }
}

impl PowerControl for SystemPower {
    async fn shutdown(&self) -> bool {
        if !self.config.auto_shutdown {
            info!("Auto shutdown disabled");
            return false;
        }

        info!("Preparing to shut down server...");
        match self.request_shutdown().await {
            Ok(()) => {
                info!("Shutdown command issued, powering off in {}", shutdown_delay_label());
                true
            }
            Err(e) => {
                error!("Shutdown failed: {}", e);
                false
            }
        }
    }

    async fn wake_peer(&self, mac: Option<&str>) -> bool {
        let Some(mac) = resolve_mac(mac, self.config.secondary_mac.as_deref()) else {
            warn!("{}, cannot wake secondary", PowerError::MissingMac);
            return false;
        };

        info!("Attempting to wake secondary server: {}", mac);
        match self.send_wake_packet(mac).await {
            Ok(()) => {
                info!("Wake packet sent to {}", mac);
                true
            }
            Err(e) => {
                error!("Failed to wake secondary server: {}", e);
                false
            }
        }
    }
}

#[cfg(windows)]
fn shutdown_command() -> AsyncCommand {
    let mut command = AsyncCommand::new("shutdown");
    command
        .arg("/s")
        .arg("/t")
        .arg(shutdown::WINDOWS_DELAY_SECONDS.to_string());
    command
}

#[cfg(not(windows))]
fn shutdown_command() -> AsyncCommand {
    let mut command = AsyncCommand::new("sudo");
    command
        .arg("shutdown")
        .arg("-h")
        .arg(shutdown::UNIX_DELAY_ARG);
    command
}

#[cfg(windows)]
fn shutdown_delay_label() -> String {
    format!("{} seconds", shutdown::WINDOWS_DELAY_SECONDS)
}

#[cfg(not(windows))]
fn shutdown_delay_label() -> String {
    "1 minute".to_string()
}

/// An explicit MAC wins unless it is blank; then the configured one is used.
fn resolve_mac<'a>(explicit: Option<&'a str>, configured: Option<&'a str>) -> Option<&'a str> {
    let present = |mac: &&str| !mac.trim().is_empty();
    explicit.filter(present).or(configured.filter(present))
}

/// Parse a 48-bit MAC written as six hex octets separated by `:` or `-`.
pub fn parse_mac(mac: &str) -> Result<[u8; 6], PowerError> {
    let invalid = || PowerError::InvalidMac {
        mac: mac.to_string(),
    };

    let separator = if mac.contains('-') { '-' } else { ':' };
    let octets: Vec<&str> = mac.trim().split(separator).collect();
    if octets.len() != 6 {
        return Err(invalid());
    }

    let mut bytes = [0u8; 6];
    for (byte, octet) in bytes.iter_mut().zip(octets) {
        if octet.len() != 2 {
            return Err(invalid());
        }
        *byte = u8::from_str_radix(octet, 16).map_err(|_| invalid())?;
    }
    Ok(bytes)
}

/// Wake-on-LAN payload: six 0xFF bytes, then the MAC sixteen times.
pub fn magic_packet(mac: &str) -> Result<[u8; MAGIC_PACKET_LEN], PowerError> {
    let mac_bytes = parse_mac(mac)?;

    let mut packet = [0xFFu8; MAGIC_PACKET_LEN];
    for chunk in packet[6..].chunks_exact_mut(6) {
        chunk.copy_from_slice(&mac_bytes);
    }
    Ok(packet)
}
