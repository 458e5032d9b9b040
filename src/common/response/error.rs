// src/common/response/error.rs

/// Errors detected while decoding the value part of a data package field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Value field too short: {len} bytes, expected 8")]
    Truncated { len: usize },

    #[error("Value field contains non-hexadecimal digits")]
    InvalidDigits,

    /// The value itself was valid; only the scale is unknown.
    #[error("Unknown SI prefix {0:?}")]
    UnknownPrefix(char),
}
