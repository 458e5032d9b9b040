// src/receiver/sync_receiver/mod.rs

mod io_helpers;
mod protocol_helpers;

#[cfg(test)]
pub(crate) mod mock;

pub use protocol_helpers::{FirmwareVersion, Reply};
#[cfg(feature = "alloc")]
pub use protocol_helpers::ScriptOutput;

use crate::common::{
    device::DeviceType,
    hal_traits::{ByteSource, Clock},
    response::{ParserConfig, SubValue},
    tables::range_to_str,
    timing,
};
use core::time::Duration;

/// Runtime options of a [`SyncReceiver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiverConfig {
    /// Time allowed for one complete line in [`SyncReceiver::receive`].
    pub line_timeout: Duration,
    /// Time allowed for each line of the firmware version reply.
    pub version_line_timeout: Duration,
    /// Delay between polls while the byte source has nothing to read.
    pub poll_interval_us: u32,
    pub parser: ParserConfig,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        ReceiverConfig {
            line_timeout: timing::DEFAULT_LINE_TIMEOUT,
            version_line_timeout: timing::FIRMWARE_VERSION_LINE_TIMEOUT,
            poll_interval_us: timing::POLL_INTERVAL_US,
            parser: ParserConfig::default(),
        }
    }
}

/// Receiving side of one MethodSCRIPT session, SYNCHRONOUS (polling) flavour.
///
/// Owns the byte source for the lifetime of the session. The device type
/// is fixed when the receiver is built and only used to name range codes.
#[derive(Debug)]
pub struct SyncReceiver<IF>
where
    IF: ByteSource + Clock,
{
    interface: IF,
    device_type: DeviceType,
    config: ReceiverConfig,
}

impl<IF> SyncReceiver<IF>
where
    IF: ByteSource + Clock,
{
    pub fn new(interface: IF) -> Self {
        Self::with_config(interface, ReceiverConfig::default())
    }

    pub fn with_config(interface: IF, config: ReceiverConfig) -> Self {
        SyncReceiver { interface, device_type: DeviceType::Unknown, config }
    }

    /// Sets the device type of the session, usually from
    /// [`FirmwareVersion::device_type`].
    pub fn with_device_type(mut self, device_type: DeviceType) -> Self {
        self.device_type = device_type;
        self
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    /// Gives access to the interface, e.g. to write the next script.
    pub fn interface_mut(&mut self) -> &mut IF {
        &mut self.interface
    }

    /// Ends the session and returns the interface.
    pub fn into_inner(self) -> IF {
        self.interface
    }

    /// Human-readable range of a sub-value for this session's device.
    pub fn range_name(&self, sub_value: &SubValue) -> &'static str {
        range_to_str(&self.device_type, sub_value.variable_type, sub_value.metadata.range)
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::mock::MockInterface;
    use super::*;
    use crate::common::types::{Metadata, VarType};

    #[test]
    fn test_default_config() {
        let receiver = SyncReceiver::new(MockInterface::new());
        assert_eq!(receiver.config().line_timeout, Duration::from_millis(5000));
        assert_eq!(receiver.config().version_line_timeout, Duration::from_millis(100));
        assert_eq!(receiver.config().poll_interval_us, 100);
        assert_eq!(receiver.device_type(), DeviceType::Unknown);
    }

    #[test]
    fn test_range_name_uses_session_device() {
        let mut sub_value = SubValue::new(VarType::CURRENT, 1e-6);
        sub_value.metadata = Metadata { status: 0, range: 9 };

        let receiver = SyncReceiver::new(MockInterface::new());
        assert_eq!(receiver.range_name(&sub_value), "Unknown/invalid range value");

        let receiver = receiver.with_device_type(DeviceType::EmStatPico);
        assert_eq!(receiver.range_name(&sub_value), "500 uA");

        let receiver = receiver.with_device_type(DeviceType::EmStat4LR);
        assert_eq!(receiver.range_name(&sub_value), "100 nA");
    }

    #[test]
    fn test_into_inner() {
        let mut mock_if = MockInterface::new();
        mock_if.stage(b"e\n");
        let receiver = SyncReceiver::new(mock_if);
        assert_eq!(receiver.into_inner().pending(), 2);
    }

    #[test]
    fn test_config_without_line_timeout() {
        let mut mock_if = MockInterface::new();
        mock_if.stage(b"T").stall(60_000_000).stage(b"late\n");
        let config = ReceiverConfig { line_timeout: Duration::MAX, ..ReceiverConfig::default() };
        let mut receiver = SyncReceiver::with_config(mock_if, config);
        let mut buffer = [0u8; 16];
        let reply: Reply = receiver.receive(&mut buffer).unwrap();
        assert_eq!(reply.kind(), crate::common::response::ReplyKind::TextMessage);
    }
}
