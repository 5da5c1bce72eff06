//! Single-shot reads from the analog front end.
//!
//! A sample opens the front end, selects one input, starts a conversion and
//! busy-waits until the result is ready. There is no timeout unless a poll
//! limit is configured: a converter that never signals completion blocks the
//! caller forever.
//!
//! The front end is borrowed mutably for the whole acquisition, so only one
//! conversion can be in flight at a time.

use crate::errors::Error;

/// Physically wired analog inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    An0,
    An1,
    An2,
    An3,
    An4,
}

impl TryFrom<u8> for Channel {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::An0),
            1 => Ok(Self::An1),
            2 => Ok(Self::An2),
            3 => Ok(Self::An3),
            4 => Ok(Self::An4),
            _ => Err(Error::InvalidChannel),
        }
    }
}

/// Capability interface of an ADC unit.
///
/// Implementations are not reentrant: callers must finish one
/// open/convert/stop cycle before starting the next.
pub trait AnalogFrontEnd {
    fn open(&mut self);
    fn select_input(&mut self, channel: Channel);
    fn start_conversion(&mut self);
    fn samples_available(&mut self) -> bool;
    fn read_sample(&mut self) -> u16;
    fn stop(&mut self);
}

pub struct AnalogSampler<F> {
    front_end: F,
    max_code: u16,
    poll_limit: Option<u32>,
}

impl<F: AnalogFrontEnd> AnalogSampler<F> {
    pub fn new(front_end: F, max_code: u16) -> Self {
        Self {
            front_end,
            max_code,
            poll_limit: None,
        }
    }

    /// Give up after `polls` unsuccessful completion checks.
    pub fn with_poll_limit(mut self, polls: u32) -> Self {
        self.poll_limit = Some(polls);
        self
    }

    /// Take one raw reading from `channel`.
    ///
    /// Unknown channels are rejected before the hardware is touched.
    pub fn sample(&mut self, channel: u8) -> Result<u16, Error> {
        let channel = Channel::try_from(channel)?;

        self.front_end.open();
        self.front_end.select_input(channel);
        self.front_end.start_conversion();
        let ready = self.wait();
        self.front_end.stop();
        ready?;

        let code = self.front_end.read_sample();
        if code > self.max_code {
            return Err(Error::SampleOutOfRange);
        }
        Ok(code)
    }

    fn conversion_done(&mut self) -> nb::Result<(), Error> {
        if self.front_end.samples_available() {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    fn wait(&mut self) -> Result<(), Error> {
        match self.poll_limit {
            None => nb::block!(self.conversion_done()),
            Some(limit) => {
                for _ in 0..limit {
                    if self.conversion_done().is_ok() {
                        return Ok(());
                    }
                }
                Err(Error::ConversionTimeout)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{FrontEndCall, MockFrontEnd};

    #[test]
    fn test_channel_mapping() {
        assert_eq!(Channel::try_from(0), Ok(Channel::An0));
        assert_eq!(Channel::try_from(4), Ok(Channel::An4));
        assert_eq!(Channel::try_from(5), Err(Error::InvalidChannel));
    }

    #[test]
    fn test_sample_sequence() {
        let (front_end, stimulus) = MockFrontEnd::new(512);
        stimulus.set_busy_polls(2);
        let mut sampler = AnalogSampler::new(front_end, 1023);

        assert_eq!(sampler.sample(2), Ok(512));
        assert_eq!(
            stimulus.calls(),
            [
                FrontEndCall::Open,
                FrontEndCall::Select(Channel::An2),
                FrontEndCall::Start,
                FrontEndCall::Poll,
                FrontEndCall::Poll,
                FrontEndCall::Poll,
                FrontEndCall::Stop,
                FrontEndCall::Read,
            ]
        );
    }

    #[test]
    fn test_invalid_channel_skips_hardware() {
        let (front_end, stimulus) = MockFrontEnd::new(512);
        let mut sampler = AnalogSampler::new(front_end, 1023);

        assert_eq!(sampler.sample(7), Err(Error::InvalidChannel));
        assert!(stimulus.calls().is_empty());
    }

    #[test]
    fn test_code_above_resolution() {
        let (front_end, _stimulus) = MockFrontEnd::new(1024);
        let mut sampler = AnalogSampler::new(front_end, 1023);

        assert_eq!(sampler.sample(0), Err(Error::SampleOutOfRange));
    }

    #[test]
    fn test_poll_limit() {
        let (front_end, stimulus) = MockFrontEnd::new(100);
        stimulus.set_stuck(true);
        let mut sampler = AnalogSampler::new(front_end, 1023).with_poll_limit(3);

        assert_eq!(sampler.sample(0), Err(Error::ConversionTimeout));
        let calls = stimulus.calls();
        assert_eq!(calls.iter().filter(|c| **c == FrontEndCall::Poll).count(), 3);
        // The front end is released even when the conversion never finished
        assert_eq!(calls.last(), Some(&FrontEndCall::Stop));
        assert!(!calls.contains(&FrontEndCall::Read));
    }

    #[test]
    fn test_poll_limit_not_reached() {
        let (front_end, stimulus) = MockFrontEnd::new(100);
        stimulus.set_busy_polls(2);
        let mut sampler = AnalogSampler::new(front_end, 1023).with_poll_limit(3);

        assert_eq!(sampler.sample(1), Ok(100));
    }
}
