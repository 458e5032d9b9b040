// src/receiver/sync_receiver/io_helpers.rs

use super::SyncReceiver;
use crate::common::{
    error::ReadError,
    hal_traits::{ByteSource, Clock},
    response::ClassifiedLine,
};
use core::time::Duration;
use log::{debug, trace};

impl<IF> SyncReceiver<IF>
where
    IF: ByteSource + Clock,
{
    /// Polls a non-blocking operation (`f`) until it stops returning
    /// `WouldBlock` or `timeout` has elapsed since `start`.
    ///
    /// A timeout is reported as `Timeout { received: 0 }`; callers that
    /// track progress fill in their own count.
    pub(super) fn execute_blocking_io_until<FN, T>(
        &mut self,
        start: IF::Instant,
        timeout: Duration,
        mut f: FN,
    ) -> Result<T, ReadError<IF::Error>>
    where
        FN: FnMut(&mut IF) -> nb::Result<T, IF::Error>,
    {
        loop {
            match f(&mut self.interface) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if self.elapsed_since(start) >= timeout {
                        return Err(ReadError::Timeout { received: 0 });
                    }
                    self.interface.delay_us(self.config.poll_interval_us);
                }
                Err(nb::Error::Other(e)) => return Err(ReadError::Source(e)),
            }
        }
    }

    // `Duration::MAX` must not overflow the instant type.
    fn elapsed_since(&self, start: IF::Instant) -> Duration {
        self.interface.now() - start
    }

    /// Reads one complete reply line (up to and including `\n`) into
    /// `buffer` and classifies it.
    ///
    /// `timeout` bounds the whole line, measured from the call;
    /// `Duration::MAX` waits indefinitely. The maximum line length is
    /// `buffer.len()`; a longer line fails with
    /// [`ReadError::BufferOverflow`] without consuming its remaining bytes,
    /// use [`SyncReceiver::discard_line`] to skip them.
    pub fn read_line<'buf>(
        &mut self,
        buffer: &'buf mut [u8],
        timeout: Duration,
    ) -> Result<ClassifiedLine<'buf>, ReadError<IF::Error>> {
        let start = self.interface.now();
        let mut received = 0;
        loop {
            if received >= buffer.len() {
                return Err(ReadError::BufferOverflow { capacity: buffer.len() });
            }

            let byte = match self.execute_blocking_io_until(start, timeout, |i| i.read_byte()) {
                Ok(byte) => byte,
                Err(ReadError::Timeout { .. }) => return Err(ReadError::Timeout { received }),
                Err(e) => return Err(e),
            };
            buffer[received] = byte;
            received += 1;

            if byte == b'\n' {
                let line = ClassifiedLine::new(&buffer[..received]);
                trace!("Received {:?} line ({} bytes)", line.kind, received);
                return Ok(line);
            }
            // A source that never stalls must still respect the timeout.
            if self.elapsed_since(start) >= timeout {
                return Err(ReadError::Timeout { received });
            }
        }
    }

    /// Drops bytes up to and including the next `\n`.
    ///
    /// Resynchronises the stream after a [`ReadError::BufferOverflow`].
    /// Returns the number of bytes dropped.
    pub fn discard_line(&mut self, timeout: Duration) -> Result<usize, ReadError<IF::Error>> {
        let start = self.interface.now();
        let mut discarded = 0;
        loop {
            let byte = match self.execute_blocking_io_until(start, timeout, |i| i.read_byte()) {
                Ok(byte) => byte,
                Err(ReadError::Timeout { .. }) => {
                    return Err(ReadError::Timeout { received: discarded })
                }
                Err(e) => return Err(e),
            };
            discarded += 1;
            if byte == b'\n' {
                debug!("Discarded {} bytes to resynchronise", discarded);
                return Ok(discarded);
            }
            if self.elapsed_since(start) >= timeout {
                return Err(ReadError::Timeout { received: discarded });
            }
        }
    }
}
