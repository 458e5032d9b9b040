// src/std_io.rs

//! Adapter from `std::io::Read` to the receiver traits. Requires the `std` feature.
//!
//! Works with anything readable, e.g. a serial port handle opened at
//! [`DEFAULT_BAUD_RATE`](crate::common::timing::DEFAULT_BAUD_RATE) with a
//! short read timeout, or a `TcpStream`.

use crate::common::hal_traits::{ByteSource, Clock};
use std::io::{self, ErrorKind, Read};
use std::thread;
use std::time::{Duration, Instant};

/// Byte source and clock backed by a `std::io::Read` and `std::time::Instant`.
///
/// Reads that return no data (`Ok(0)`, `WouldBlock`, `TimedOut`,
/// `Interrupted`) count as "no byte yet", so the receiver's timeouts
/// apply. A reader at end of stream therefore times out rather than failing.
#[derive(Debug)]
pub struct StdInterface<R: Read> {
    reader: R,
}

impl<R: Read> StdInterface<R> {
    pub fn new(reader: R) -> Self {
        StdInterface { reader }
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Gives access to the reader, e.g. to write commands to a serial port.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> ByteSource for StdInterface<R> {
    type Error = io::Error;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        let mut byte = [0u8; 1];
        match self.reader.read(&mut byte) {
            Ok(1) => Ok(byte[0]),
            Ok(_) => Err(nb::Error::WouldBlock),
            Err(e) => match e.kind() {
                ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted => {
                    Err(nb::Error::WouldBlock)
                }
                _ => Err(nb::Error::Other(e)),
            },
        }
    }
}

impl<R: Read> Clock for StdInterface<R> {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn delay_us(&mut self, us: u32) {
        thread::sleep(Duration::from_micros(us as u64));
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{ReadError, ReplyKind};
    use crate::receiver::{Reply, SyncReceiver};
    use std::io::Cursor;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::BrokenPipe, "port closed"))
        }
    }

    #[test]
    fn test_read_bytes() {
        let mut interface = StdInterface::new(Cursor::new(b"e\n".to_vec()));
        assert_eq!(interface.read_byte().ok(), Some(b'e'));
        assert_eq!(interface.read_byte().ok(), Some(b'\n'));
        assert!(matches!(interface.read_byte(), Err(nb::Error::WouldBlock)));
    }

    #[test]
    fn test_receiver_over_cursor() {
        let data = b"e\nPba8000001m\n\n".to_vec();
        let mut receiver = SyncReceiver::new(StdInterface::new(Cursor::new(data)));
        let mut buffer = [0u8; 64];

        let reply: Reply = receiver.receive(&mut buffer).unwrap();
        assert_eq!(reply.kind(), ReplyKind::ScriptExecuteAck);
        match receiver.receive::<8>(&mut buffer).unwrap() {
            Reply::Data(package) => assert_eq!(package[0].value, 1e-3),
            Reply::Line(line) => panic!("Expected data, got {:?}", line),
        }
        let reply: Reply = receiver.receive(&mut buffer).unwrap();
        assert_eq!(reply.kind(), ReplyKind::EndOfScript);

        // End of stream waits for the timeout
        let result = receiver.read_line(&mut buffer, Duration::from_millis(5));
        assert!(matches!(result, Err(ReadError::Timeout { received: 0 })));
    }

    #[test]
    fn test_unbounded_timeout() {
        let mut receiver = SyncReceiver::new(StdInterface::new(Cursor::new(b"e\n".to_vec())));
        let mut buffer = [0u8; 16];
        let line = receiver.read_line(&mut buffer, Duration::MAX).unwrap();
        assert_eq!(line.kind, ReplyKind::ScriptExecuteAck);
    }

    #[test]
    fn test_hard_error_is_propagated() {
        let mut receiver = SyncReceiver::new(StdInterface::new(FailingReader));
        let mut buffer = [0u8; 16];
        match receiver.read_line(&mut buffer, Duration::from_millis(5)) {
            Err(ReadError::Source(e)) => assert_eq!(e.kind(), ErrorKind::BrokenPipe),
            other => panic!("Expected source error, got {:?}", other),
        }
    }
}
