//! This module provides reusable test utilities:
//! - Temp-dir backed configuration builder
//! - Recording transfer and power collaborators
//! - Fixed and ticking clocks
//! - Captured log output
//! - Common test data

// Not every test binary uses every fixture
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod log_capture;
pub mod mock_services;
pub mod test_clock;
pub mod test_config;
pub mod test_data;

// Re-export commonly used items
pub use log_capture::CapturedLogs;
pub use mock_services::{RecordingPower, RecordingTransfer, TransferCall};
pub use test_clock::{FixedClock, TickingClock};
pub use test_config::{TestConfigBuilder, TestEnv};
pub use test_data::*;
