// src/common/timing.rs

use core::time::Duration;

// Defaults follow the PalmSens reference examples. All of them can be
// overridden per receiver through `ReceiverConfig`.

// === Serial Link ===

/// Baud rate used by EmStat Pico and EmStat4 instruments (8 data bits, no parity, 1 stop bit).
pub const DEFAULT_BAUD_RATE: u32 = 230_400;

// === Buffer Sizes ===

/// Size of the read buffer in bytes, which is also the longest line accepted.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 1000;

/// Sub-values kept per data package before the rest of the line is dropped.
pub const DEFAULT_MAX_SUB_VALUES: usize = 8;

/// Capacity of a joined firmware version string.
pub const FIRMWARE_VERSION_CAPACITY: usize = 128;

// === Read Timeouts ===

/// Time allowed for one complete reply line while a script is running.
pub const DEFAULT_LINE_TIMEOUT: Duration = Duration::from_millis(5000);

/// Time allowed for each line of the reply to the `t` (version) command.
pub const FIRMWARE_VERSION_LINE_TIMEOUT: Duration = Duration::from_millis(100);

/// Delay between polls of a byte source that has no byte ready.
pub const POLL_INTERVAL_US: u32 = 100;
