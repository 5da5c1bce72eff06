//! Notable things that happened during a tick.
//!
//! The controller never prints. It queues events, and the scheduler drains
//! and formats them after each tick.

use heapless::spsc::Queue;
use ufmt::{uDisplay, uWrite};

use crate::states::ControllerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Transition {
        from: ControllerState,
        to: ControllerState,
    },
    Sample {
        raw: u16,
        millivolts: u16,
        debounce_count: u8,
    },
    Darkness {
        is_dark: bool,
    },
}

impl Event {
    pub fn log<const N: usize>(&self, queue: &mut Queue<Self, N>) {
        if let Err(e) = queue.enqueue(*self) {
            // Keep the most recent history
            queue.dequeue();
            queue.enqueue(e).ok();
        }
    }
}

impl uDisplay for Event {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match self {
            Self::Transition { from, to } => {
                ufmt::uwrite!(f, ":: State transition: {} -> {}", from, to)
            }
            Self::Sample {
                raw,
                millivolts,
                debounce_count,
            } => ufmt::uwrite!(
                f,
                ":: Sample [Raw={}] [mV={}] [Debounce={}]",
                raw,
                millivolts,
                debounce_count
            ),
            Self::Darkness { is_dark } => {
                let light = if *is_dark { "Night" } else { "Day" };
                ufmt::uwrite!(f, ":: Light changed [Light={}]", light)
            }
        }
    }
}
