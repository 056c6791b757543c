// File: node-sync/src/services/mod.rs

pub mod power_service;
pub mod transfer_service;

pub use power_service::{PowerControl, SystemPower};
pub use transfer_service::{LocalTransfer, Transfer};
