// src/receiver/sync_receiver/protocol_helpers.rs

use super::SyncReceiver;
use crate::common::{
    device::DeviceType,
    error::ReadError,
    hal_traits::{ByteSource, Clock},
    response::{parse_package_with, ClassifiedLine, Package, ReplyKind},
    timing::{DEFAULT_MAX_SUB_VALUES, FIRMWARE_VERSION_CAPACITY},
};
use arrayvec::ArrayString;
use core::fmt;
use log::{debug, warn};

#[cfg(feature = "alloc")]
use {
    crate::receiver::curves::{Curve, CurveCollector},
    alloc::{string::String, vec::Vec},
};

/// One received reply: a parsed data package or any other line.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<'buf, const N: usize = DEFAULT_MAX_SUB_VALUES> {
    Data(Package<N>),
    Line(ClassifiedLine<'buf>),
}

impl<const N: usize> Reply<'_, N> {
    pub fn kind(&self) -> ReplyKind {
        match self {
            Reply::Data(_) => ReplyKind::DataPackage,
            Reply::Line(line) => line.kind,
        }
    }
}

/// Reply to the `t` (version) command, with its lines joined by spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FirmwareVersion<const N: usize = FIRMWARE_VERSION_CAPACITY> {
    text: ArrayString<N>,
    device_type: DeviceType,
}

impl<const N: usize> FirmwareVersion<N> {
    /// Parses an already joined version text, e.g. `"espico1.2 #2021-11-11"`.
    pub fn from_text(text: ArrayString<N>) -> Self {
        let device_type = DeviceType::from_firmware_version(&text);
        FirmwareVersion { text, device_type }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Device type derived from the version prefix.
    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }
}

impl<const N: usize> fmt::Display for FirmwareVersion<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Everything a script sent until it finished. Requires the `alloc` feature.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScriptOutput<const N: usize = DEFAULT_MAX_SUB_VALUES> {
    pub curves: Vec<Curve<N>>,
    /// Text of the `T` lines, in order.
    pub messages: Vec<String>,
    /// Text of the error line that ended the script, if any.
    pub error: Option<String>,
}

impl<IF> SyncReceiver<IF>
where
    IF: ByteSource + Clock,
{
    /// Reads the next line and parses it if it is a data package.
    ///
    /// Uses the configured line timeout. Unrecognized lines are logged and
    /// returned like any other line.
    pub fn receive<'buf, const N: usize>(
        &mut self,
        buffer: &'buf mut [u8],
    ) -> Result<Reply<'buf, N>, ReadError<IF::Error>> {
        let timeout = self.config.line_timeout;
        let parser = self.config.parser;
        let line = self.read_line(buffer, timeout)?;

        match line.kind {
            ReplyKind::DataPackage => match line.line.as_str() {
                Ok(text) => return Ok(Reply::Data(parse_package_with(text, &parser))),
                Err(_) => {
                    warn!("Data package is not valid text: {}", line.line.as_bytes().escape_ascii())
                }
            },
            ReplyKind::ErrorMessage => {
                warn!("Device reported an error: {}", line.message().unwrap_or_default())
            }
            ReplyKind::Unrecognized => {
                warn!("Unrecognized reply line: {}", line.line.trimmed().escape_ascii())
            }
            _ => {}
        }
        Ok(Reply::Line(line))
    }

    /// Reads the reply to a `t` command that was already sent.
    ///
    /// The first line must start with `t`. Lines are read until one ends
    /// with `*`, and joined with a space; the `t` and the `*` are not part
    /// of the text. A text longer than `N` bytes fails with
    /// [`ReadError::BufferOverflow`].
    pub fn read_firmware_version<const N: usize>(
        &mut self,
        buffer: &mut [u8],
    ) -> Result<FirmwareVersion<N>, ReadError<IF::Error>> {
        let timeout = self.config.version_line_timeout;
        let mut text = ArrayString::<N>::new();
        let mut first = true;
        loop {
            let line = self.read_line(buffer, timeout)?;
            let content = if first {
                if line.kind != ReplyKind::FirmwareVersion {
                    warn!("Unexpected reply to version request: {:?}", line.kind);
                    return Err(ReadError::UnexpectedReply(line.kind));
                }
                line.line.trimmed().get(1..).unwrap_or_default()
            } else {
                line.line.trimmed()
            };
            let (content, last) = match content.strip_suffix(b"*") {
                Some(content) => (content, true),
                None => (content, false),
            };

            let separator: &[u8] = if first { b"" } else { b" " };
            separator
                .iter()
                .chain(content)
                .try_for_each(|&byte| text.try_push(char::from(byte)))
                .map_err(|_| ReadError::BufferOverflow { capacity: N })?;

            if last {
                break;
            }
            first = false;
        }

        let version = FirmwareVersion::from_text(text);
        debug!("Firmware version {:?} ({})", version.as_str(), version.device_type());
        Ok(version)
    }

    /// Receives the output of a running script until its end-of-script
    /// line or an error line, grouping the data packages into curves.
    /// Requires the `alloc` feature.
    #[cfg(feature = "alloc")]
    pub fn collect_script_output<const N: usize>(
        &mut self,
        buffer: &mut [u8],
    ) -> Result<ScriptOutput<N>, ReadError<IF::Error>> {
        let mut collector = CurveCollector::new();
        let mut messages = Vec::new();
        let error = loop {
            match self.receive::<N>(buffer)? {
                Reply::Data(package) => collector.push(package),
                Reply::Line(line) => match line.kind {
                    kind if kind.is_end_of_curve() => collector.end_curve(),
                    ReplyKind::TextMessage => {
                        messages.push(String::from(line.message().unwrap_or_default()))
                    }
                    kind if kind.is_terminal() => {
                        break (kind == ReplyKind::ErrorMessage)
                            .then(|| String::from(line.message().unwrap_or_default()))
                    }
                    _ => {}
                },
            }
        };
        Ok(ScriptOutput { curves: collector.finish(), messages, error })
    }
}
