//! GPIO / peripheral pin assignments for the resetter board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Reset output
// ---------------------------------------------------------------------------

/// Digital output wired to the target's reset circuit.
/// Idle HIGH; pulled LOW for the pulse width to reset the target.
pub const RESET_OUT_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Command UART (UART1; UART0 stays on the console)
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 16;

/// Driver-side RX ring size in bytes.
pub const UART_RX_BUFFER_BYTES: usize = 256;
