//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter    | Implements  | Connects to                    |
//! |------------|-------------|--------------------------------|
//! | `log_sink` | EventSink   | `log` facade / console UART    |
//! | `serial`   | SerialPort  | ESP-IDF UART1 / in-memory ring |

pub mod log_sink;
pub mod serial;
