//! Error handling.

use heapless::spsc::Queue;

/// All possible error types
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum Error {
    InvalidChannel,
    ConversionTimeout,
    SampleOutOfRange,
    InvalidResolution,
    InvalidDebounceRange,
    InvalidVoltage,
    InvalidPollLimit,
    GpioWriteError,
    GpioReadError,
}

impl Error {
    pub fn log<const N: usize>(&self, queue: &mut Queue<Self, N>) {
        match queue.enqueue(*self) {
            Ok(()) => { /* Enqueued */ }
            Err(e) => {
                // Queue full, drop the oldest value and try again
                queue.dequeue();
                queue.enqueue(e).ok();
            }
        }
    }

    pub fn to_bytes(&self) -> &'static [u8] {
        match self {
            Self::InvalidChannel => b"ADC: Channel is not wired",
            Self::ConversionTimeout => b"ADC: Conversion did not complete",
            Self::SampleOutOfRange => b"ADC: Sample exceeds converter resolution",
            Self::InvalidResolution => b"Config: ADC resolution must be 1..=16 bits",
            Self::InvalidDebounceRange => b"Config: Debounce trigger must lie inside 0..max",
            Self::InvalidVoltage => b"Config: Voltages must be finite and the supply positive",
            Self::InvalidPollLimit => b"Config: Conversion poll limit must be non-zero",
            Self::GpioWriteError => b"GPIO: Driving output failed",
            Self::GpioReadError => b"GPIO: Reading override switch failed",
        }
    }
}
