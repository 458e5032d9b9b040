// src/lib.rs

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod common;
pub mod receiver;

#[cfg(feature = "std")]
pub mod std_io;

// Re-export key types for convenience
pub use common::{DeviceType, Package, ReadError, ReplyKind, SubValue, VarType};
pub use receiver::SyncReceiver;
