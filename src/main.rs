//! Resetter Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │  UartSerial (UART1, 9600 8N1)   LogEventSink (console) │
//! │                                                        │
//! │  ──────────────── Port Trait Boundary ───────────────  │
//! │                                                        │
//! │  ┌──────────────────────────────────────────────────┐  │
//! │  │ ResetController: guard · decode · pulse          │  │
//! │  └──────────────────────────────────────────────────┘  │
//! │                                                        │
//! │  PinDriver<GPIO18, Output> (idle HIGH)   Delay         │
//! └────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::info;

use esp_idf_hal::delay::{Delay, FreeRtos};
use esp_idf_hal::gpio::{AnyIOPin, PinDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::{config::Config as UartConfig, UartDriver};
use esp_idf_hal::units::Hertz;

use resetter::adapters::log_sink::LogEventSink;
use resetter::adapters::serial::UartSerial;
use resetter::app::service::ResetController;
use resetter::config::ResetterConfig;
use resetter::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Resetter v{}", env!("CARGO_PKG_VERSION"));

    let config = ResetterConfig::default();
    let config_json =
        serde_json::to_string(&config).map_err(|e| anyhow::anyhow!("config encode: {e}"))?;
    info!("Config: {}", config_json);

    let peripherals = Peripherals::take().context("peripherals already taken")?;

    // ── 2. Reset output ───────────────────────────────────────
    // GPIO18 is pins::RESET_OUT_GPIO; the HAL needs the typed peripheral.
    let reset_pin = PinDriver::output(peripherals.pins.gpio18)?;

    // ── 3. Command UART ───────────────────────────────────────
    let uart_cfg = UartConfig::new()
        .baudrate(Hertz(config.baud_rate))
        .rx_fifo_size(pins::UART_RX_BUFFER_BYTES);
    let uart = UartDriver::new(
        peripherals.uart1,
        peripherals.pins.gpio17,
        peripherals.pins.gpio16,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &uart_cfg,
    )?;
    info!(
        "UART1 open: TX=GPIO{} RX=GPIO{} @ {} baud",
        pins::UART_TX_GPIO,
        pins::UART_RX_GPIO,
        config.baud_rate
    );
    let mut serial = UartSerial::new(uart);

    // ── 4. Controller ─────────────────────────────────────────
    let mut sink = LogEventSink::new();
    let mut controller =
        ResetController::new(reset_pin, Delay::new_default(), config, &mut sink)?;

    // ── 5. Poll loop ──────────────────────────────────────────
    controller.run(&mut serial, &mut sink, || FreeRtos::delay_ms(1))
}
