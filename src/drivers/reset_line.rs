//! Reset output line driver.
//!
//! Wraps any `embedded-hal` [`OutputPin`] and tracks the level last
//! commanded, so the controller can report the line state without reading
//! the pin back.
//!
//! The tracked level follows the *command*, not the driver result: a failed
//! write still records the requested level.

use embedded_hal::digital::OutputPin;
use log::debug;

use crate::error::{Error, Result};

/// Logical line level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

pub struct ResetLine<P> {
    pin: P,
    level: Level,
}

impl<P: OutputPin> ResetLine<P> {
    /// Take ownership of `pin` and drive it to idle (HIGH).
    ///
    /// Returns the line even if the first write fails, so the caller can
    /// keep polling; the error is handed back alongside.
    pub fn new(mut pin: P) -> (Self, Result<()>) {
        let res = pin.set_high().map_err(Error::pin);
        (
            Self {
                pin,
                level: Level::High,
            },
            res,
        )
    }

    /// Release the line to its idle level.
    pub fn release(&mut self) -> Result<()> {
        self.level = Level::High;
        debug!("reset line: HIGH");
        self.pin.set_high().map_err(Error::pin)
    }

    /// Pull the line to its active level.
    pub fn assert(&mut self) -> Result<()> {
        self.level = Level::Low;
        debug!("reset line: LOW");
        self.pin.set_low().map_err(Error::pin)
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Give the pin back (tests use this to inspect a mock).
    pub fn into_inner(self) -> P {
        self.pin
    }
}
