// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// A point in time as reported by a [`Clock`].
///
/// Anything that can be offset by a `Duration` and subtracted to get one
/// back qualifies, e.g. `std::time::Instant` or a tick counter wrapper.
pub trait ClockInstant:
    Copy + Ord + Add<Duration, Output = Self> + Sub<Self, Output = Duration>
{
}

impl<T> ClockInstant for T where
    T: Copy + Ord + Add<Duration, Output = T> + Sub<T, Output = Duration>
{
}

/// Abstraction for the monotonic time and delay operations used while
/// waiting for reply bytes.
pub trait Clock {
    /// The instant type produced by [`Clock::now`].
    type Instant: ClockInstant;

    /// Returns the current monotonic time.
    fn now(&self) -> Self::Instant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);
}

/// Abstraction for the receiving half of a MethodSCRIPT connection.
///
/// The transport is usually a serial port (230400 baud, 8N1), but anything
/// that can hand out bytes one at a time works.
pub trait ByteSource {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to read a single byte from the connection.
    ///
    /// Returns `Ok(byte)` if a byte was read, or `Err(nb::Error::WouldBlock)`
    /// if no byte is available yet. Hard failures are returned as
    /// `Err(nb::Error::Other(Self::Error))`.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;
}
