//! Integration tests for the serial → controller → reset line pipeline.
//!
//! These run on the host and drive the controller with `SimSerial` and
//! the tracing mocks, checking the exact pin/delay sequence it produces.

use super::mock_hw::{
    MockDelay, MockPin, RecordingSink, Trace, TraceBus, ever_low, trace_bus, writes,
};

use embedded_hal::digital::ErrorKind;
use resetter::adapters::log_sink::LogEventSink;
use resetter::adapters::serial::SimSerial;
use resetter::app::commands::encode_reset_request;
use resetter::app::events::ResetEvent;
use resetter::app::ports::SerialPort;
use resetter::app::service::{PollOutcome, ResetController};
use resetter::config::{ResetterConfig, SENTINEL};
use resetter::drivers::reset_line::Level;

const PULSE_NS: u64 = 10_000_000;

fn make() -> (
    ResetController<MockPin, MockDelay>,
    TraceBus,
    RecordingSink,
) {
    let bus = trace_bus();
    let mut sink = RecordingSink::new();
    let ctl = ResetController::new(
        MockPin::new(&bus),
        MockDelay::new(&bus),
        ResetterConfig::default(),
        &mut sink,
    )
    .unwrap();
    (ctl, bus, sink)
}

/// Poll until the guard stops the controller.
fn drain(
    ctl: &mut ResetController<MockPin, MockDelay>,
    rx: &mut SimSerial,
    sink: &mut RecordingSink,
) -> Vec<PollOutcome> {
    let mut out = Vec::new();
    loop {
        match ctl.poll(rx, sink) {
            PollOutcome::Waiting => return out,
            o => out.push(o),
        }
    }
}

// ── Initialisation ────────────────────────────────────────────

#[test]
fn init_drives_pin_high_and_reports_start() {
    let (ctl, bus, sink) = make();
    assert_eq!(*bus.borrow(), vec![Trace::High]);
    assert_eq!(ctl.level(), Level::High);
    assert_eq!(sink.events, vec![ResetEvent::Started(Level::High)]);
}

// ── End-to-end scenarios ──────────────────────────────────────

#[test]
fn sentinel_then_pad_pulses_once() {
    let (mut ctl, bus, mut sink) = make();
    let mut rx = SimSerial::new();
    rx.inject(&[0x33, 0x00]);
    bus.borrow_mut().clear();

    let outcomes = drain(&mut ctl, &mut rx, &mut sink);

    assert_eq!(outcomes, vec![PollOutcome::Pulsed]);
    assert_eq!(
        *bus.borrow(),
        vec![Trace::Low, Trace::DelayNs(PULSE_NS), Trace::High]
    );
    assert_eq!(ctl.level(), Level::High);
    // The pad byte stays buffered until something follows it.
    assert_eq!(rx.available(), 1);
}

#[test]
fn single_non_sentinel_byte_never_read() {
    let (mut ctl, bus, mut sink) = make();
    let mut rx = SimSerial::new();
    rx.inject(&[0x41]);

    for _ in 0..100 {
        assert_eq!(ctl.poll(&mut rx, &mut sink), PollOutcome::Waiting);
    }
    assert!(!ever_low(&bus));
    assert_eq!(rx.available(), 1);
}

#[test]
fn lone_sentinel_is_held_until_second_byte() {
    let (mut ctl, bus, mut sink) = make();
    let mut rx = SimSerial::new();
    rx.inject(&[SENTINEL]);

    for _ in 0..10 {
        assert_eq!(ctl.poll(&mut rx, &mut sink), PollOutcome::Waiting);
    }
    assert!(!ever_low(&bus));

    rx.inject(&[0x7F]);
    assert_eq!(ctl.poll(&mut rx, &mut sink), PollOutcome::Pulsed);
    assert_eq!(ctl.pulse_count(), 1);
    assert_eq!(rx.read_byte(), Some(0x7F));
}

#[test]
fn two_sentinels_give_two_separate_pulses() {
    let (mut ctl, bus, mut sink) = make();
    let mut rx = SimSerial::new();
    rx.inject(&[SENTINEL, SENTINEL, 0x00]);
    bus.borrow_mut().clear();

    let outcomes = drain(&mut ctl, &mut rx, &mut sink);

    assert_eq!(outcomes, vec![PollOutcome::Pulsed, PollOutcome::Pulsed]);
    assert_eq!(
        *bus.borrow(),
        vec![
            Trace::Low,
            Trace::DelayNs(PULSE_NS),
            Trace::High,
            Trace::Low,
            Trace::DelayNs(PULSE_NS),
            Trace::High,
        ]
    );
    assert_eq!(
        sink.events[1..],
        [
            ResetEvent::PulseEmitted {
                width_ms: 10,
                total: 1
            },
            ResetEvent::PulseEmitted {
                width_ms: 10,
                total: 2
            },
        ]
    );
}

#[test]
fn bytes_consumed_in_fifo_order() {
    let (mut ctl, _bus, mut sink) = make();
    let mut rx = SimSerial::new();
    rx.inject(&[0x01, 0x02, SENTINEL, 0x03, 0x04]);

    let outcomes = drain(&mut ctl, &mut rx, &mut sink);

    assert_eq!(
        outcomes,
        vec![
            PollOutcome::Ignored(0x01),
            PollOutcome::Ignored(0x02),
            PollOutcome::Pulsed,
            PollOutcome::Ignored(0x03),
        ]
    );
    assert_eq!(rx.read_byte(), Some(0x04));
}

#[test]
fn noise_without_sentinel_keeps_pin_high() {
    let (mut ctl, bus, mut sink) = make();
    let mut rx = SimSerial::new();
    let noise: Vec<u8> = (0u8..=255).filter(|b| *b != SENTINEL).take(60).collect();
    rx.inject(&noise);
    bus.borrow_mut().clear();

    let outcomes = drain(&mut ctl, &mut rx, &mut sink);

    assert_eq!(outcomes.len(), noise.len() - 1);
    assert!(bus.borrow().is_empty());
    assert_eq!(ctl.pulse_count(), 0);
}

#[test]
fn encoded_request_yields_requested_pulses() {
    let (mut ctl, bus, mut sink) = make();
    let mut rx = SimSerial::new();
    rx.inject(&encode_reset_request(3, SENTINEL).unwrap());
    bus.borrow_mut().clear();

    drain(&mut ctl, &mut rx, &mut sink);

    assert_eq!(ctl.pulse_count(), 3);
    assert_eq!(sink.pulses(), 3);
    assert_eq!(writes(&bus).last(), Some(&Trace::High));

    // Leftover pad is discarded once the next request arrives.
    rx.inject(&encode_reset_request(1, SENTINEL).unwrap());
    let outcomes = drain(&mut ctl, &mut rx, &mut sink);
    assert_eq!(outcomes, vec![PollOutcome::Ignored(0x00), PollOutcome::Pulsed]);
}

// ── Configuration variants ────────────────────────────────────

#[test]
fn custom_sentinel_and_width() {
    let bus = trace_bus();
    let mut sink = RecordingSink::new();
    let cfg = ResetterConfig {
        sentinel: 0xA5,
        pulse_width_ms: 25,
        ..ResetterConfig::default()
    };
    let mut ctl =
        ResetController::new(MockPin::new(&bus), MockDelay::new(&bus), cfg, &mut sink).unwrap();
    let mut rx = SimSerial::new();
    rx.inject(&[SENTINEL, 0xA5, 0x00]);
    bus.borrow_mut().clear();

    let outcomes = drain(&mut ctl, &mut rx, &mut sink);

    assert_eq!(outcomes, vec![PollOutcome::Ignored(SENTINEL), PollOutcome::Pulsed]);
    assert_eq!(
        *bus.borrow(),
        vec![Trace::Low, Trace::DelayNs(25_000_000), Trace::High]
    );
}

#[test]
fn zero_guard_reads_single_byte() {
    let bus = trace_bus();
    let mut sink = RecordingSink::new();
    let cfg = ResetterConfig {
        rx_guard_bytes: 0,
        ..ResetterConfig::default()
    };
    let mut ctl =
        ResetController::new(MockPin::new(&bus), MockDelay::new(&bus), cfg, &mut sink).unwrap();
    let mut rx = SimSerial::new();
    rx.inject(&[SENTINEL]);

    assert_eq!(ctl.poll(&mut rx, &mut sink), PollOutcome::Pulsed);
    assert_eq!(rx.available(), 0);
}

// ── Fault handling ────────────────────────────────────────────

#[test]
fn failed_low_write_still_releases_line() {
    let bus = trace_bus();
    let mut sink = RecordingSink::new();
    let mut ctl = ResetController::new(
        MockPin::failing_low(&bus),
        MockDelay::new(&bus),
        ResetterConfig::default(),
        &mut sink,
    )
    .unwrap();
    let mut rx = SimSerial::new();
    rx.inject(&[SENTINEL, 0x00]);
    bus.borrow_mut().clear();

    assert_eq!(ctl.poll(&mut rx, &mut sink), PollOutcome::Pulsed);

    assert_eq!(
        *bus.borrow(),
        vec![Trace::Low, Trace::DelayNs(PULSE_NS), Trace::High]
    );
    assert_eq!(ctl.level(), Level::High);
    assert!(sink.events.contains(&ResetEvent::PinFault(ErrorKind::Other)));
}

#[test]
fn log_sink_accepts_every_event() {
    let bus = trace_bus();
    let mut sink = LogEventSink::new();
    let mut ctl = ResetController::new(
        MockPin::new(&bus),
        MockDelay::new(&bus),
        ResetterConfig::default(),
        &mut sink,
    )
    .unwrap();
    let mut rx = SimSerial::new();
    rx.inject(&[0x10, SENTINEL, 0x00]);

    assert_eq!(ctl.poll(&mut rx, &mut sink), PollOutcome::Ignored(0x10));
    assert_eq!(ctl.poll(&mut rx, &mut sink), PollOutcome::Pulsed);
    assert_eq!(ctl.pulse_count(), 1);
}
