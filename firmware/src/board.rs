//! ADC1 of the STM32F411 as analog front end.
//!
//! AN0..AN4 are wired to PA0..PA4.

use stm32f4xx_hal::{
    adc::{
        config::{SampleTime, Sequence},
        Adc,
    },
    gpio::{gpioa, Analog},
    pac,
};

use crate::sampler::{AnalogFrontEnd, Channel};

/// Sample time per conversion. The light sensor sits behind a high-impedance
/// divider, so use the longest one.
const SAMPLE_TIME: SampleTime = SampleTime::Cycles_480;

pub struct AnalogInputs {
    pub an0: gpioa::PA0<Analog>,
    pub an1: gpioa::PA1<Analog>,
    pub an2: gpioa::PA2<Analog>,
    pub an3: gpioa::PA3<Analog>,
    pub an4: gpioa::PA4<Analog>,
}

pub struct AdcFrontEnd {
    adc: Adc<pac::ADC1>,
    inputs: AnalogInputs,
}

impl AdcFrontEnd {
    pub fn new(adc: Adc<pac::ADC1>, inputs: AnalogInputs) -> Self {
        Self { adc, inputs }
    }
}

impl AnalogFrontEnd for AdcFrontEnd {
    fn open(&mut self) {
        self.adc.enable();
    }

    fn select_input(&mut self, channel: Channel) {
        let inputs = &self.inputs;
        match channel {
            Channel::An0 => self.adc.configure_channel(&inputs.an0, Sequence::One, SAMPLE_TIME),
            Channel::An1 => self.adc.configure_channel(&inputs.an1, Sequence::One, SAMPLE_TIME),
            Channel::An2 => self.adc.configure_channel(&inputs.an2, Sequence::One, SAMPLE_TIME),
            Channel::An3 => self.adc.configure_channel(&inputs.an3, Sequence::One, SAMPLE_TIME),
            Channel::An4 => self.adc.configure_channel(&inputs.an4, Sequence::One, SAMPLE_TIME),
        }
    }

    fn start_conversion(&mut self) {
        self.adc.start_conversion();
    }

    fn samples_available(&mut self) -> bool {
        // SAFETY: read-only access to the status register of the ADC this
        // struct owns.
        unsafe { (*pac::ADC1::ptr()).sr.read().eoc().bit_is_set() }
    }

    fn read_sample(&mut self) -> u16 {
        self.adc.current_sample()
    }

    fn stop(&mut self) {
        self.adc.disable();
    }
}
