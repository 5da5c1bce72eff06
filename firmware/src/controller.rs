//! The light controller state machine.
//!
//! ```text
//!   Init ──▶ Automatic ◀──▶ Override
//! ```
//!
//! The scheduler creates one [`ControllerContext`] at boot with
//! [`ControllerContext::initialize`] and then calls
//! [`LightController::tick`] with it forever. Ticks never fail: errors end
//! up in the error queue and the outputs keep their last state.

use embedded_hal::digital::v2::{InputPin, OutputPin};
use heapless::spsc::Queue;

use crate::{
    ambient_light::AmbientLight,
    config::Config,
    errors::Error,
    events::Event,
    outputs::{Levels, Outputs},
    override_switch::OverrideSwitch,
    sampler::{AnalogFrontEnd, AnalogSampler},
    states::ControllerState,
};

/// Capacity of the event queue (heapless keeps one slot free)
const EVENT_QUEUE_LEN: usize = 16;
/// Capacity of the error queue
const ERROR_QUEUE_LEN: usize = 8;

/// Mutable state of the controller, owned by the scheduler.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerContext {
    state: ControllerState,
    /// Ticks since the last sample
    sample_ticks: u32,
    light: AmbientLight,
    is_dark: bool,
    last_raw_sample: Option<u16>,
    /// Volts per ADC count, set in `Init`
    step_volts: f32,
}

impl ControllerContext {
    /// A zeroed context in the `Init` state.
    pub fn initialize() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn sample_ticks(&self) -> u32 {
        self.sample_ticks
    }

    pub fn debounce_count(&self) -> u8 {
        self.light.brightness().debounce_count
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn last_raw_sample(&self) -> Option<u16> {
        self.last_raw_sample
    }

    pub fn last_volts(&self) -> Option<f32> {
        self.last_raw_sample.map(|raw| f32::from(raw) * self.step_volts)
    }

    pub fn step_volts(&self) -> f32 {
        self.step_volts
    }

    pub fn threshold_volts(&self) -> f32 {
        self.light.threshold_volts()
    }
}

pub struct LightController<F, D, N, R, S> {
    config: Config,
    sampler: AnalogSampler<F>,
    outputs: Outputs<D, N, R>,
    switch: OverrideSwitch<S>,
    events: Queue<Event, EVENT_QUEUE_LEN>,
    errors: Queue<Error, ERROR_QUEUE_LEN>,
}

impl<F, D, N, R, S> LightController<F, D, N, R, S>
where
    F: AnalogFrontEnd,
    D: OutputPin,
    N: OutputPin,
    R: OutputPin,
    S: InputPin,
{
    pub fn new(
        config: Config,
        front_end: F,
        outputs: Outputs<D, N, R>,
        switch: OverrideSwitch<S>,
    ) -> Result<Self, Error> {
        config.validate()?;
        let mut sampler = AnalogSampler::new(front_end, config.max_code());
        if let Some(polls) = config.conversion_poll_limit {
            sampler = sampler.with_poll_limit(polls);
        }
        Ok(Self {
            config,
            sampler,
            outputs,
            switch,
            events: Queue::new(),
            errors: Queue::new(),
        })
    }

    /// Run one iteration of the state machine.
    pub fn tick(&mut self, ctx: &mut ControllerContext) {
        let from = ctx.state;
        let to = match from {
            ControllerState::Init => self.init(ctx),
            ControllerState::Automatic => self.automatic(ctx),
            ControllerState::Override => self.manual_override(),
        };
        if to != from {
            ctx.state = to;
            Event::Transition { from, to }.log(&mut self.events);
        }
    }

    fn init(&mut self, ctx: &mut ControllerContext) -> ControllerState {
        ctx.step_volts = self.config.step_volts();
        ctx.sample_ticks = 0;
        ctx.light = AmbientLight::new(
            self.config.dark_threshold_volts,
            self.config.debounce_max,
            self.config.debounce_trigger,
        );
        ctx.is_dark = false;
        if let Err(e) = self.outputs.relay_off() {
            e.log(&mut self.errors);
        }
        ControllerState::Automatic
    }

    fn automatic(&mut self, ctx: &mut ControllerContext) -> ControllerState {
        ctx.sample_ticks = ctx.sample_ticks.saturating_add(1);
        if ctx.sample_ticks > self.config.sample_tick_threshold {
            ctx.sample_ticks = 0;
            self.take_sample(ctx);
        }

        let is_dark = ctx.light.brightness().is_dark();
        if is_dark != ctx.is_dark {
            Event::Darkness { is_dark }.log(&mut self.events);
        }
        ctx.is_dark = is_dark;
        self.drive(if is_dark { Levels::NIGHT } else { Levels::DAY });

        match self.switch.is_engaged() {
            Ok(true) => ControllerState::Override,
            Ok(false) => ControllerState::Automatic,
            Err(e) => {
                e.log(&mut self.errors);
                ControllerState::Automatic
            }
        }
    }

    fn manual_override(&mut self) -> ControllerState {
        self.drive(Levels::OVERRIDE);

        match self.switch.is_engaged() {
            Ok(true) => ControllerState::Override,
            Ok(false) => ControllerState::Automatic,
            Err(e) => {
                e.log(&mut self.errors);
                ControllerState::Override
            }
        }
    }

    /// Sample the light sensor and feed the debounce counter. On failure the
    /// counter is left alone, so the day/night decision holds.
    fn take_sample(&mut self, ctx: &mut ControllerContext) {
        match self.sampler.sample(self.config.light_sensor_channel) {
            Ok(raw) => {
                ctx.last_raw_sample = Some(raw);
                let volts = f32::from(raw) * ctx.step_volts;
                let brightness = ctx.light.update(volts);
                Event::Sample {
                    raw,
                    millivolts: (volts * 1000.0) as u16,
                    debounce_count: brightness.debounce_count,
                }
                .log(&mut self.events);
            }
            Err(e) => e.log(&mut self.errors),
        }
    }

    fn drive(&mut self, levels: Levels) {
        if let Err(e) = self.outputs.apply(levels) {
            e.log(&mut self.errors);
        }
    }

    /// Last commanded output levels.
    pub fn outputs(&self) -> Levels {
        self.outputs.levels()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pop_event(&mut self) -> Option<Event> {
        self.events.dequeue()
    }

    pub fn pop_error(&mut self) -> Option<Error> {
        self.errors.dequeue()
    }
}
