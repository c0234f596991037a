//! Centralized Constants
//!
//! Single source of truth for the magic numbers used by the driver.
//!
//! # Organization
//!
//! - **Line defaults**: baud rate and parity applied when not overridden
//! - **Ports**: number of UART ports the interrupt registry can hold
//! - **Timing**: polling interval and default timeout for `flush`
//!
//! Register offsets and bit definitions live in `internal::register`.

// =============================================================================
// Line Defaults
// =============================================================================

/// Default UART baud rate in bits per second
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// UART receiver oversampling factor (baud clock = MCK / (16 * CD))
pub const BAUD_OVERSAMPLING: u32 = 16;

/// Largest value of the 16-bit baud rate clock divisor
pub const MAX_BAUD_DIVISOR: u32 = 0xFFFF;

// =============================================================================
// Ports
// =============================================================================

/// Number of UART ports with a slot in the interrupt registry
pub const MAX_PORTS: usize = 2;

// =============================================================================
// DMA
// =============================================================================

/// Largest transfer the PDC counter registers accept (16-bit RCR/TCR)
pub const PDC_MAX_TRANSFER_LEN: usize = 0xFFFF;

// =============================================================================
// Timing
// =============================================================================

/// Poll interval used while waiting for the transmit ring to drain
pub const FLUSH_POLL_INTERVAL_US: u32 = 10;

/// Default time allowed for the transmit ring to drain
pub const DEFAULT_FLUSH_TIMEOUT_US: u32 = 100_000;
