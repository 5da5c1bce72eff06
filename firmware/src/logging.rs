//! Helpers for writing log lines to an RTT up channel.

use core::convert::Infallible;

use rtt_target::UpChannel;

/// Wrapper for an `UpChannel` that supports ufmt
pub struct RttWriter<'a>(pub &'a mut UpChannel);

impl<'a> RttWriter<'a> {
    /// Write a raw message followed by a newline.
    pub fn write_line(&mut self, bytes: &[u8]) {
        self.0.write(bytes);
        self.0.write(b"\n");
    }
}

impl<'a> ufmt::uWrite for RttWriter<'a> {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.0.write(s.as_bytes());
        Ok(())
    }
}
