//! Reset pulse controller — the whole of the firmware's behaviour.
//!
//! [`ResetController`] owns the reset line, the pulse delay, and the pulse
//! counter. The serial port and event sink are passed in at each call so
//! the same controller runs against the ESP-IDF UART on target and against
//! in-memory mocks on the host.
//!
//! ```text
//!  SerialPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │    ResetController     │
//!                 │ guard · decode · pulse │ ──▶ ResetLine (OutputPin)
//!                 └────────────────────────┘
//! ```
//!
//! ## Read guard
//!
//! A byte is read only while *more than* `rx_guard_bytes` bytes are
//! buffered (default 1, i.e. at least two). A lone sentinel is therefore
//! held until any second byte arrives. Hosts rely on this timing, so the
//! guard is kept as-is rather than relaxed to "at least one".

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{info, warn};

use crate::config::ResetterConfig;
use crate::drivers::reset_line::{Level, ResetLine};
use crate::error::{Error, Result};
use crate::pins;

use super::commands::Command;
use super::events::ResetEvent;
use super::ports::{EventSink, SerialPort};

/// What a single [`ResetController::poll`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Guard not satisfied; nothing was read.
    Waiting,
    /// A non-command byte was consumed and dropped.
    Ignored(u8),
    /// The sentinel was consumed and a pulse was emitted.
    Pulsed,
}

// ───────────────────────────────────────────────────────────────
// ResetController
// ───────────────────────────────────────────────────────────────

pub struct ResetController<P, D> {
    line: ResetLine<P>,
    delay: D,
    config: ResetterConfig,
    pulses: u32,
}

impl<P: OutputPin, D: DelayNs> ResetController<P, D> {
    /// Validate `config`, take the pin, and drive it to idle HIGH.
    ///
    /// A pin fault during the idle write is logged and reported to `sink`
    /// but does not fail construction: the controller keeps serving
    /// commands regardless.
    pub fn new(
        pin: P,
        delay: D,
        config: ResetterConfig,
        sink: &mut impl EventSink,
    ) -> Result<Self> {
        config.validate()?;

        let (line, init) = ResetLine::new(pin);
        if let Err(e) = init {
            report_pin_fault(e, sink);
        }

        info!(
            "Resetter ready: GPIO{} idle HIGH, sentinel=0x{:02X}, pulse={}ms",
            pins::RESET_OUT_GPIO, config.sentinel, config.pulse_width_ms
        );
        sink.emit(&ResetEvent::Started(line.level()));

        Ok(Self {
            line,
            delay,
            config,
            pulses: 0,
        })
    }

    // ── Polling ───────────────────────────────────────────────

    /// Run one polling step: guard, read one byte, act on it.
    pub fn poll(&mut self, serial: &mut impl SerialPort, sink: &mut impl EventSink) -> PollOutcome {
        if serial.available() <= self.config.rx_guard_bytes {
            return PollOutcome::Waiting;
        }
        let Some(byte) = serial.read_byte() else {
            return PollOutcome::Waiting;
        };

        match Command::decode(byte, self.config.sentinel) {
            Some(Command::ResetPulse) => {
                self.pulse(sink);
                PollOutcome::Pulsed
            }
            None => {
                sink.emit(&ResetEvent::ByteIgnored(byte));
                PollOutcome::Ignored(byte)
            }
        }
    }

    /// One iteration of [`run`](Self::run): poll, then call `on_idle` if
    /// the guard was not satisfied.
    pub fn step(
        &mut self,
        serial: &mut impl SerialPort,
        sink: &mut impl EventSink,
        on_idle: &mut impl FnMut(),
    ) -> PollOutcome {
        let outcome = self.poll(serial, sink);
        if outcome == PollOutcome::Waiting {
            on_idle();
        }
        outcome
    }

    /// Poll forever.
    ///
    /// `on_idle` runs after every poll that found the guard unsatisfied.
    /// On an RTOS it must yield (the idle task watchdog fires otherwise);
    /// bare-metal hosts can pass a no-op.
    pub fn run(
        &mut self,
        serial: &mut impl SerialPort,
        sink: &mut impl EventSink,
        mut on_idle: impl FnMut(),
    ) -> ! {
        info!("Entering poll loop");
        loop {
            self.step(serial, sink, &mut on_idle);
        }
    }

    // ── Pulse ─────────────────────────────────────────────────

    /// Drive the line LOW, hold for the pulse width, drive it HIGH.
    ///
    /// The hold and the release happen even if driving LOW failed, so the
    /// line never stays asserted.
    pub fn pulse(&mut self, sink: &mut impl EventSink) {
        if let Err(e) = self.line.assert() {
            report_pin_fault(e, sink);
        }
        self.delay.delay_ms(self.config.pulse_width_ms);
        if let Err(e) = self.line.release() {
            report_pin_fault(e, sink);
        }

        self.pulses = self.pulses.wrapping_add(1);
        sink.emit(&ResetEvent::PulseEmitted {
            width_ms: self.config.pulse_width_ms,
            total: self.pulses,
        });
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn level(&self) -> Level {
        self.line.level()
    }

    /// Pulses emitted since construction (wrapping).
    pub fn pulse_count(&self) -> u32 {
        self.pulses
    }

    /// Tear down and hand back the pin and delay.
    pub fn into_parts(self) -> (P, D) {
        (self.line.into_inner(), self.delay)
    }
}

fn report_pin_fault(e: Error, sink: &mut impl EventSink) {
    warn!("Reset line write failed: {}", e);
    if let Error::Pin(kind) = e {
        sink.emit(&ResetEvent::PinFault(kind));
    }
}
