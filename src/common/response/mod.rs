// src/common/response/mod.rs

mod classify;
mod data;
mod error;
pub mod parse;
mod tokenize;
pub mod value;

pub use classify::classify;
pub use data::{Package, SubValue};
pub use error::DecodeError;
pub use parse::{parse_package, parse_package_with, ParserConfig, UnknownPrefixPolicy};
pub use tokenize::{next_token, tokens, Tokens};
pub use value::{decode_value, try_decode_value};

use core::str::Utf8Error;

// --- Reply Kind Definition ---

/// Kind of a complete reply line, decided by its leading character(s).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReplyKind {
    /// Reply to the `t` command (`t<version>...`).
    FirmwareVersion,
    /// Data package (`P<field>;<field>...`).
    DataPackage,
    /// Start of a measurement loop (`M...`).
    MeasurementLoopStart,
    /// End of a measurement loop (`*`).
    MeasurementLoopEnd,
    /// Start of a scan on devices that report one (`C...`).
    ScanStart,
    /// End of a scan (`-`).
    ScanEnd,
    /// Device accepted the script and starts executing it (`e`).
    ScriptExecuteAck,
    /// Empty line after the last reply of a script.
    EndOfScript,
    /// Text sent by the script (`T...`).
    TextMessage,
    /// Error reported by the device (`!...`).
    ErrorMessage,
    /// Start of a generic loop (`L...`).
    LoopStart,
    /// End of a generic loop (`+`).
    LoopEnd,
    /// Anything else. Not an error.
    Unrecognized,
}

impl ReplyKind {
    /// Returns `true` for the lines that close a curve: loop, scan or measurement loop end.
    pub fn is_end_of_curve(&self) -> bool {
        matches!(
            self,
            ReplyKind::MeasurementLoopEnd | ReplyKind::ScanEnd | ReplyKind::LoopEnd
        )
    }

    /// Returns `true` when no further output of the running script is expected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReplyKind::EndOfScript | ReplyKind::ErrorMessage)
    }
}

// --- Raw Line ---

/// A complete reply line as read from the device, including the trailing `\n`.
///
/// Borrows the caller's read buffer, so its length never exceeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a>(&'a [u8]);

impl<'a> RawLine<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        RawLine(bytes)
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// The line as text. MethodSCRIPT replies are ASCII, so this only fails on garbage.
    pub fn as_str(&self) -> Result<&'a str, Utf8Error> {
        core::str::from_utf8(self.0)
    }

    /// The line without its line terminator (`\n` or `\r\n`).
    pub fn trimmed(&self) -> &'a [u8] {
        let line = self.0.strip_suffix(b"\n").unwrap_or(self.0);
        line.strip_suffix(b"\r").unwrap_or(line)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A reply line together with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    pub kind: ReplyKind,
    pub line: RawLine<'a>,
}

impl<'a> ClassifiedLine<'a> {
    /// Classifies a complete line.
    pub fn new(bytes: &'a [u8]) -> Self {
        ClassifiedLine { kind: classify(bytes), line: RawLine::new(bytes) }
    }

    /// The text after the leading marker character of text and error
    /// lines, e.g. `"Hello"` for `"THello\n"`. `None` for other kinds or
    /// when the line is not valid UTF-8.
    pub fn message(&self) -> Option<&'a str> {
        match self.kind {
            ReplyKind::TextMessage | ReplyKind::ErrorMessage => {
                let text = self.line.trimmed().get(1..)?;
                core::str::from_utf8(text).ok()
            }
            _ => None,
        }
    }
}
