//! Serial adapters implementing [`SerialPort`].
//!
//! - **`SimSerial`** — fixed 64-byte RX ring for host-side testing and
//!   fuzzing. Bytes that arrive while the ring is full are dropped, the
//!   way a small microcontroller UART buffer behaves.
//! - **`UartSerial`** (`target_os = "espidf"`) — wraps the ESP-IDF UART
//!   driver. Driver errors are logged and read as "nothing buffered".

use heapless::Deque;

use crate::app::ports::SerialPort;

/// RX ring size of [`SimSerial`].
pub const SIM_RX_CAPACITY: usize = 64;

// ── SimSerial ─────────────────────────────────────────────────

pub struct SimSerial {
    rx: Deque<u8, SIM_RX_CAPACITY>,
    dropped: usize,
}

impl Default for SimSerial {
    fn default() -> Self {
        Self::new()
    }
}

impl SimSerial {
    pub fn new() -> Self {
        Self {
            rx: Deque::new(),
            dropped: 0,
        }
    }

    /// Deliver bytes from the "wire". Returns how many fit in the ring.
    pub fn inject(&mut self, bytes: &[u8]) -> usize {
        let mut accepted = 0;
        for &b in bytes {
            if self.rx.push_back(b).is_ok() {
                accepted += 1;
            } else {
                self.dropped += 1;
            }
        }
        accepted
    }

    /// Bytes lost to overflow since construction.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl SerialPort for SimSerial {
    fn available(&self) -> usize {
        self.rx.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }
}

// ── UartSerial ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub use esp::UartSerial;

#[cfg(target_os = "espidf")]
mod esp {
    use esp_idf_hal::delay::NON_BLOCK;
    use esp_idf_hal::uart::UartDriver;
    use log::warn;

    use crate::app::ports::SerialPort;
    use crate::error::{Error, SerialError};

    /// Command UART backed by the ESP-IDF driver's RX ring.
    pub struct UartSerial<'d> {
        uart: UartDriver<'d>,
    }

    impl<'d> UartSerial<'d> {
        pub fn new(uart: UartDriver<'d>) -> Self {
            Self { uart }
        }
    }

    impl SerialPort for UartSerial<'_> {
        fn available(&self) -> usize {
            match self.uart.remaining_read() {
                Ok(n) => n,
                Err(e) => {
                    warn!("{}", Error::from(SerialError::StatusFailed(e.code())));
                    0
                }
            }
        }

        fn read_byte(&mut self) -> Option<u8> {
            let mut buf = [0u8; 1];
            match self.uart.read(&mut buf, NON_BLOCK) {
                Ok(1) => Some(buf[0]),
                Ok(_) => None,
                Err(e) => {
                    warn!("{}", Error::from(SerialError::ReadFailed(e.code())));
                    None
                }
            }
        }
    }
}
