//! The relay and the two status indicators.

use embedded_hal::digital::v2::{OutputPin, PinState};

use crate::errors::Error;

/// Pin level that corresponds to "energized" / "engaged".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveLevel {
    High,
    Low,
}

impl ActiveLevel {
    pub fn pin_state(self, active: bool) -> PinState {
        match (self, active) {
            (Self::High, true) | (Self::Low, false) => PinState::High,
            (Self::High, false) | (Self::Low, true) => PinState::Low,
        }
    }
}

/// A single binary output line.
pub struct Line<P> {
    pin: P,
    active: ActiveLevel,
}

impl<P: OutputPin> Line<P> {
    pub fn new(pin: P, active: ActiveLevel) -> Self {
        Self { pin, active }
    }

    pub fn set(&mut self, energized: bool) -> Result<(), Error> {
        self.pin
            .set_state(self.active.pin_state(energized))
            .map_err(|_| Error::GpioWriteError)
    }
}

/// Logical level of every output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Levels {
    pub day: bool,
    pub night: bool,
    pub relay: bool,
}

impl Levels {
    pub const DAY: Self = Self {
        day: true,
        night: false,
        relay: false,
    };
    pub const NIGHT: Self = Self {
        day: false,
        night: true,
        relay: true,
    };
    pub const OVERRIDE: Self = Self {
        day: true,
        night: true,
        relay: true,
    };
}

pub struct Outputs<D, N, R> {
    day: Line<D>,
    night: Line<N>,
    relay: Line<R>,
    /// Last commanded levels
    levels: Levels,
}

impl<D, N, R> Outputs<D, N, R>
where
    D: OutputPin,
    N: OutputPin,
    R: OutputPin,
{
    pub fn new(day: Line<D>, night: Line<N>, relay: Line<R>) -> Self {
        Self {
            day,
            night,
            relay,
            levels: Levels::default(),
        }
    }

    /// Drive all three lines. A failing line does not keep the others
    /// from being driven; the first failure is reported.
    pub fn apply(&mut self, levels: Levels) -> Result<(), Error> {
        self.levels = levels;
        let day = self.day.set(levels.day);
        let night = self.night.set(levels.night);
        let relay = self.relay.set(levels.relay);
        day.and(night).and(relay)
    }

    pub fn relay_off(&mut self) -> Result<(), Error> {
        self.levels.relay = false;
        self.relay.set(false)
    }

    pub fn levels(&self) -> Levels {
        self.levels
    }
}
