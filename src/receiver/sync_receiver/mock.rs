// src/receiver/sync_receiver/mock.rs

//! Scripted byte source with a simulated clock, shared by the receiver tests.

use crate::common::hal_traits::{ByteSource, Clock};
use core::time::Duration;

// --- Mock Instant ---
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct MockInstant(pub u64);

impl core::ops::Add<Duration> for MockInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

impl core::ops::Sub<MockInstant> for MockInstant {
    type Output = Duration;
    fn sub(self, rhs: MockInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

// --- Mock Comm Error ---
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct MockCommError;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    Byte(u8),
    /// No byte for this many microseconds.
    Stall(u64),
    Fail,
}

// --- Mock Interface ---
pub(crate) struct MockInterface {
    pub current_time_us: u64,
    pub read_calls: usize,
    steps: heapless::Deque<Step, 1024>,
}

impl MockInterface {
    pub fn new() -> Self {
        MockInterface { current_time_us: 0, read_calls: 0, steps: heapless::Deque::new() }
    }

    pub fn stage(&mut self, data: &[u8]) -> &mut Self {
        for byte in data {
            self.push(Step::Byte(*byte));
        }
        self
    }

    pub fn stall(&mut self, us: u64) -> &mut Self {
        self.push(Step::Stall(us));
        self
    }

    pub fn fail(&mut self) -> &mut Self {
        self.push(Step::Fail);
        self
    }

    pub fn pending(&self) -> usize {
        self.steps.len()
    }

    fn push(&mut self, step: Step) {
        assert!(self.steps.push_back(step).is_ok(), "mock read queue full");
    }
}

impl Clock for MockInterface {
    type Instant = MockInstant;
    fn now(&self) -> Self::Instant {
        MockInstant(self.current_time_us)
    }
    fn delay_us(&mut self, us: u32) {
        self.current_time_us = self.current_time_us.saturating_add(us as u64);
    }
}

impl ByteSource for MockInterface {
    type Error = MockCommError;
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        self.read_calls += 1;
        match self.steps.pop_front() {
            Some(Step::Byte(byte)) => Ok(byte),
            Some(Step::Stall(us)) => {
                self.current_time_us = self.current_time_us.saturating_add(us);
                Err(nb::Error::WouldBlock)
            }
            Some(Step::Fail) => Err(nb::Error::Other(MockCommError)),
            None => Err(nb::Error::WouldBlock),
        }
    }
}
