// src/common/error.rs

use crate::common::response::ReplyKind;

/// Errors returned while reading reply lines from a byte source.
#[derive(Debug, thiserror::Error)]
pub enum ReadError<E = ()>
where
    E: core::fmt::Debug,
{
    /// No line terminator arrived within the time budget of the call.
    #[error("Timed out waiting for end of line ({received} bytes received)")]
    Timeout { received: usize },

    /// The line did not fit in the read buffer. Nothing was written past
    /// the buffer; the rest of the line is still pending on the source.
    #[error("Line exceeds read buffer of {capacity} bytes")]
    BufferOverflow { capacity: usize },

    /// Underlying I/O error from the byte source.
    #[error("Byte source error: {0:?}")]
    Source(E),

    /// A complete line was read, but not the kind the operation expects.
    #[error("Unexpected reply: {0:?}")]
    UnexpectedReply(ReplyKind),
}

impl<E: core::fmt::Debug> ReadError<E> {
    /// Returns `true` for errors after which reading can simply continue.
    ///
    /// A timeout is retried by calling again, an overflow after
    /// discarding the remainder of the line. Source errors usually end the
    /// session.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ReadError::Source(_))
    }
}
