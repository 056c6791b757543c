// File: node-sync/src/scheduler/operations.rs
use std::future::Future;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{error, info, instrument};

use super::{Checkpoint, CheckpointReport, Clock, SystemClock};
use crate::config::{Role, SyncConfig};
use crate::constants::schedule::{HANDOFF_GRACE_PERIOD, POLL_INTERVAL};
use crate::services::{PowerControl, Transfer};

pub struct SyncScheduler<T, P, C = SystemClock> {
    config: Arc<SyncConfig>,
    transfer: Arc<T>,
    power: Arc<P>,
    clock: C,
}

impl<T, P> SyncScheduler<T, P, SystemClock>
where
    T: Transfer,
    P: PowerControl,
{
    pub fn new(config: Arc<SyncConfig>, transfer: Arc<T>, power: Arc<P>) -> Self {
        Self::with_clock(config, transfer, power, SystemClock)
    }
}

impl<T, P, C> SyncScheduler<T, P, C>
where
    T: Transfer,
    P: PowerControl,
    C: Clock,
{
    pub fn with_clock(config: Arc<SyncConfig>, transfer: Arc<T>, power: Arc<P>, clock: C) -> Self {
        Self {
            config,
            transfer,
            power,
            clock,
        }
    }

    /// Poll until `interrupt` resolves, then return. The interrupt also
    /// abandons a handler that is in progress.
    pub async fn run_until<F>(&self, interrupt: F)
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            _ = self.run() => {}
            _ = interrupt => {
                info!("Interrupt received, stopping sync service");
            }
        }
    }

    #[instrument(skip(self), fields(role = %self.config.role))]
    async fn run(&self) {
        info!("Sync service started");
        info!("Role: {}", self.config.role);
        info!("Data directory: {}", self.config.data_dir.display());
        info!("Backup directory: {}", self.config.backup_dir.display());
        info!(
            "Peer: {}:{} (sync interval {}s, shutdown delay {}s)",
            self.config.secondary_ip,
            self.config.sync_port,
            self.config.sync_interval,
            self.config.shutdown_delay
        );

        loop {
            self.poll_once().await;
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Read the clock once and run the matching handler, if any.
    pub async fn poll_once(&self) -> Option<CheckpointReport> {
        let checkpoint = Checkpoint::at(self.clock.now().time())?;
        Some(self.handle_checkpoint(checkpoint).await)
    }

    pub async fn handle_checkpoint(&self, checkpoint: Checkpoint) -> CheckpointReport {
        match checkpoint {
            Checkpoint::Noon => self.handle_noon().await,
            Checkpoint::Midnight => self.handle_midnight().await,
        }
    }

    async fn handle_noon(&self) -> CheckpointReport {
        info!("=== Starting noon sync ===");

        let handoff_succeeded = self.handoff().await;
        let mut shutdown_attempted = false;

        if handoff_succeeded {
            info!(
                "✓ Noon {} complete, shutting down in {}s",
                self.handoff_label(),
                HANDOFF_GRACE_PERIOD.as_secs()
            );
            sleep(HANDOFF_GRACE_PERIOD).await;
            self.power.shutdown().await;
            shutdown_attempted = true;
        } else {
            error!("✗ Noon {} failed, not shutting down", self.handoff_label());
        }

        CheckpointReport {
            checkpoint: Checkpoint::Noon,
            role: self.config.role,
            handoff_succeeded,
            shutdown_attempted,
        }
    }

    async fn handle_midnight(&self) -> CheckpointReport {
        info!("=== Starting midnight sync ===");
        info!(
            "Waiting {}s for the peer to boot before {}",
            HANDOFF_GRACE_PERIOD.as_secs(),
            self.handoff_label()
        );
        sleep(HANDOFF_GRACE_PERIOD).await;

        let handoff_succeeded = self.handoff().await;
        if !handoff_succeeded {
            error!("✗ Midnight {} failed", self.handoff_label());
        }

        CheckpointReport {
            checkpoint: Checkpoint::Midnight,
            role: self.config.role,
            handoff_succeeded,
            shutdown_attempted: false,
        }
    }

    async fn handoff(&self) -> bool {
        match self.config.role {
            Role::Primary => {
                self.transfer
                    .sync_to_secondary(&self.config.secondary_ip, None)
                    .await
            }
            Role::Secondary => self.transfer.receive_from_primary().await,
        }
    }

    fn handoff_label(&self) -> &'static str {
        match self.config.role {
            Role::Primary => "push to secondary",
            Role::Secondary => "receive from primary",
        }
    }
}
