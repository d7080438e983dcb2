//! Fuzz target: `ResetController::poll`
//!
//! Feeds arbitrary byte streams, in arbitrary chunk sizes, through
//! `SimSerial` into the controller and asserts that the reset line is
//! always back at idle after each poll and that the pulse count matches
//! the sentinels consumed.
//!
//! cargo fuzz run fuzz_poll_stream

#![no_main]

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use libfuzzer_sys::fuzz_target;
use resetter::adapters::serial::SimSerial;
use resetter::app::ports::NullSink;
use resetter::app::service::{PollOutcome, ResetController};
use resetter::config::{ResetterConfig, SENTINEL};
use resetter::drivers::reset_line::Level;

struct NoopPin;

impl ErrorType for NoopPin {
    type Error = Infallible;
}

impl OutputPin for NoopPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fuzz_target!(|data: &[u8]| {
    let Some((&chunk, stream)) = data.split_first() else {
        return;
    };
    let chunk = usize::from(chunk.max(1));

    let mut ctl =
        ResetController::new(NoopPin, NoopDelay, ResetterConfig::default(), &mut NullSink)
            .expect("default config is valid");
    let mut rx = SimSerial::new();
    let mut sentinels_read = 0u32;

    for piece in stream.chunks(chunk) {
        rx.inject(piece);
        loop {
            match ctl.poll(&mut rx, &mut NullSink) {
                PollOutcome::Waiting => break,
                PollOutcome::Pulsed => sentinels_read += 1,
                PollOutcome::Ignored(b) => assert_ne!(b, SENTINEL),
            }
            assert_eq!(ctl.level(), Level::High);
        }
    }

    assert_eq!(ctl.pulse_count(), sentinels_read);
});
