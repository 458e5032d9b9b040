// src/receiver/mod.rs

pub mod sync_receiver;

#[cfg(feature = "alloc")]
pub mod curves;

pub use sync_receiver::{FirmwareVersion, ReceiverConfig, Reply, SyncReceiver};

#[cfg(feature = "alloc")]
pub use curves::{Curve, CurveCollector};
#[cfg(feature = "alloc")]
pub use sync_receiver::ScriptOutput;
