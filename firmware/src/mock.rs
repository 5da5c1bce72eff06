//! Test doubles for the hardware the controller talks to.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    convert::Infallible,
    rc::Rc,
};

use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::sampler::{AnalogFrontEnd, Channel};

/// A GPIO pin whose level is shared between all clones.
///
/// Hand one clone to the code under test and keep another to inspect or
/// drive the level.
#[derive(Clone, Default)]
pub struct MockPin(Rc<Cell<bool>>);

impl MockPin {
    pub fn new(high: bool) -> Self {
        Self(Rc::new(Cell::new(high)))
    }

    pub fn level(&self) -> bool {
        self.0.get()
    }

    pub fn set_level(&self, high: bool) {
        self.0.set(high);
    }
}

impl OutputPin for MockPin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

impl InputPin for MockPin {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}

/// A pin that fails every access.
pub struct BrokenPin;

impl OutputPin for BrokenPin {
    type Error = ();

    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(())
    }
}

impl InputPin for BrokenPin {
    type Error = ();

    fn is_high(&self) -> Result<bool, Self::Error> {
        Err(())
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Err(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontEndCall {
    Open,
    Select(Channel),
    Start,
    Poll,
    Read,
    Stop,
}

#[derive(Default)]
struct FrontEndState {
    calls: Vec<FrontEndCall>,
    /// Codes returned by the next reads, in order
    queued: VecDeque<u16>,
    /// Code returned once the queue is empty
    level: u16,
    /// Number of polls that report "busy" before each conversion completes
    busy_polls: u32,
    remaining_busy: u32,
    stuck: bool,
}

/// Scripted analog front end.
pub struct MockFrontEnd(Rc<RefCell<FrontEndState>>);

/// Handle for steering a [`MockFrontEnd`] from the test.
#[derive(Clone)]
pub struct FrontEndStimulus(Rc<RefCell<FrontEndState>>);

impl MockFrontEnd {
    pub fn new(level: u16) -> (Self, FrontEndStimulus) {
        let state = Rc::new(RefCell::new(FrontEndState {
            level,
            ..FrontEndState::default()
        }));
        (Self(Rc::clone(&state)), FrontEndStimulus(state))
    }
}

impl FrontEndStimulus {
    /// Code returned by every read that has no queued value.
    pub fn set(&self, level: u16) {
        self.0.borrow_mut().level = level;
    }

    pub fn push(&self, code: u16) {
        self.0.borrow_mut().queued.push_back(code);
    }

    pub fn set_busy_polls(&self, polls: u32) {
        self.0.borrow_mut().busy_polls = polls;
    }

    /// Never report a finished conversion.
    pub fn set_stuck(&self, stuck: bool) {
        self.0.borrow_mut().stuck = stuck;
    }

    pub fn calls(&self) -> Vec<FrontEndCall> {
        self.0.borrow().calls.clone()
    }

    pub fn conversions(&self) -> usize {
        self.0
            .borrow()
            .calls
            .iter()
            .filter(|c| **c == FrontEndCall::Start)
            .count()
    }
}

impl AnalogFrontEnd for MockFrontEnd {
    fn open(&mut self) {
        self.0.borrow_mut().calls.push(FrontEndCall::Open);
    }

    fn select_input(&mut self, channel: Channel) {
        self.0.borrow_mut().calls.push(FrontEndCall::Select(channel));
    }

    fn start_conversion(&mut self) {
        let mut state = self.0.borrow_mut();
        state.calls.push(FrontEndCall::Start);
        state.remaining_busy = state.busy_polls;
    }

    fn samples_available(&mut self) -> bool {
        let mut state = self.0.borrow_mut();
        state.calls.push(FrontEndCall::Poll);
        if state.stuck {
            return false;
        }
        if state.remaining_busy > 0 {
            state.remaining_busy -= 1;
            return false;
        }
        true
    }

    fn read_sample(&mut self) -> u16 {
        let mut state = self.0.borrow_mut();
        state.calls.push(FrontEndCall::Read);
        match state.queued.pop_front() {
            Some(code) => code,
            None => state.level,
        }
    }

    fn stop(&mut self) {
        self.0.borrow_mut().calls.push(FrontEndCall::Stop);
    }
}
