//! Ambient light detector with a debounce counter.
//!
//! Each sample above the threshold voltage moves the counter one step
//! towards "dark", each sample below it one step towards "day". Samples
//! exactly at the threshold leave the counter alone. The counter saturates
//! at `0` and `debounce_max`, and only values above `debounce_trigger` are
//! considered "dark", so flipping the decision takes sustained readings in
//! one direction.
//!
//! The default detector is all-zero and reports "day" for every sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AmbientLight {
    /// Sensor voltages above this value count towards "dark"
    threshold_volts: f32,
    /// Upper bound of the debounce counter
    debounce_max: u8,
    /// Counter values above this are considered "dark"
    debounce_trigger: u8,
    /// Current counter value, always within `0..=debounce_max`
    count: u8,
}

impl AmbientLight {
    pub fn new(threshold_volts: f32, debounce_max: u8, debounce_trigger: u8) -> Self {
        Self {
            threshold_volts,
            debounce_max,
            debounce_trigger,
            count: 0,
        }
    }

    pub fn update(&mut self, volts: f32) -> Brightness {
        if volts > self.threshold_volts && self.count < self.debounce_max {
            self.count += 1;
        } else if volts < self.threshold_volts && self.count > 0 {
            self.count -= 1;
        }
        self.brightness()
    }

    pub fn brightness(&self) -> Brightness {
        Brightness {
            debounce_count: self.count,
            is_dark: self.count > self.debounce_trigger,
        }
    }

    pub fn threshold_volts(&self) -> f32 {
        self.threshold_volts
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brightness {
    /// Debounce counter after the latest update
    pub debounce_count: u8,
    /// Whether darkness was detected
    is_dark: bool,
}

impl Brightness {
    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn is_day(&self) -> bool {
        !self.is_dark
    }
}
