//! State machine.

use ufmt::{uDisplay, uWrite};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    /// Entered once at boot, left on the first tick
    #[default]
    Init,
    /// Ambient light drives the relay and indicators
    Automatic,
    /// Manual switch forces everything on
    Override,
}

impl ControllerState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "Init",
            Self::Automatic => "Automatic",
            Self::Override => "Override",
        }
    }
}

impl uDisplay for ControllerState {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_str(self.name())
    }
}
