//! The manual override switch.

use embedded_hal::digital::v2::InputPin;

use crate::{errors::Error, outputs::ActiveLevel};

pub struct OverrideSwitch<P> {
    pin: P,
    active: ActiveLevel,
}

impl<P: InputPin> OverrideSwitch<P> {
    pub fn new(pin: P, active: ActiveLevel) -> Self {
        Self { pin, active }
    }

    /// Query whether the switch is currently engaged.
    pub fn is_engaged(&self) -> Result<bool, Error> {
        // The switch is wired against a pull-up on the board, so engaging it
        // pulls the input low. The active level decides which one counts.
        let level = match self.active {
            ActiveLevel::High => self.pin.is_high(),
            ActiveLevel::Low => self.pin.is_low(),
        };
        level.map_err(|_| Error::GpioReadError)
    }
}
