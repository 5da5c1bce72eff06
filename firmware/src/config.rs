//! Controller configuration.

use crate::{errors::Error, sampler::Channel};

/// Supply voltage of the ADC reference in volts
const SUPPLY_VOLTAGE: f32 = 3.28;
/// Resolution of the ADC in bits
const RESOLUTION_BITS: u8 = 10;
/// Number of ticks between two light samples
const SAMPLE_TICK_THRESHOLD: u32 = 5_000;
/// Sensor voltages above this value count towards "dark"
const DARK_THRESHOLD_VOLTS: f32 = 3.15;
/// Upper bound of the debounce counter
const DEBOUNCE_MAX: u8 = 10;
/// Debounce counter values above this are considered "dark"
const DEBOUNCE_TRIGGER: u8 = 4;
/// ADC input the light sensor is wired to (AN0)
const LIGHT_SENSOR_CHANNEL: u8 = 0;

/// Fixed parameters of the light controller.
///
/// All values are set once at boot and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub supply_voltage: f32,
    pub resolution_bits: u8,
    pub sample_tick_threshold: u32,
    pub dark_threshold_volts: f32,
    pub debounce_max: u8,
    pub debounce_trigger: u8,
    pub light_sensor_channel: u8,
    /// Bound on the conversion busy-wait. `None` waits forever.
    pub conversion_poll_limit: Option<u32>,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            supply_voltage: SUPPLY_VOLTAGE,
            resolution_bits: RESOLUTION_BITS,
            sample_tick_threshold: SAMPLE_TICK_THRESHOLD,
            dark_threshold_volts: DARK_THRESHOLD_VOLTS,
            debounce_max: DEBOUNCE_MAX,
            debounce_trigger: DEBOUNCE_TRIGGER,
            light_sensor_channel: LIGHT_SENSOR_CHANNEL,
            conversion_poll_limit: None,
        }
    }

    /// Volts per ADC count.
    pub fn step_volts(&self) -> f32 {
        self.supply_voltage / (1u32 << self.resolution_bits) as f32
    }

    /// Largest code the ADC can return at the configured resolution.
    pub fn max_code(&self) -> u16 {
        ((1u32 << self.resolution_bits) - 1) as u16
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(1..=16).contains(&self.resolution_bits) {
            return Err(Error::InvalidResolution);
        }
        if self.debounce_trigger == 0 || self.debounce_trigger >= self.debounce_max {
            return Err(Error::InvalidDebounceRange);
        }
        if !self.supply_voltage.is_finite()
            || self.supply_voltage <= 0.0
            || !self.dark_threshold_volts.is_finite()
        {
            return Err(Error::InvalidVoltage);
        }
        if self.conversion_poll_limit == Some(0) {
            return Err(Error::InvalidPollLimit);
        }
        Channel::try_from(self.light_sensor_channel)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
