//! Interrupt status for the serial DMA channels.
//!
//! This module provides the [`InterruptStatus`] structure reporting which
//! conditions an invocation of
//! [`DmaSerial::on_interrupt`](crate::DmaSerial::on_interrupt) serviced.

use crate::hal::SerialDma;

// =============================================================================
// Interrupt Status
// =============================================================================

/// Conditions observed by one interrupt handler invocation.
///
/// Both sources are level-triggered and checked independently, so a single
/// invocation can service both.
///
/// # Example
///
/// ```ignore
/// let status = SERIAL.on_interrupt();
/// if status.rx_buffer_full {
///     // receive ring wrapped and was re-armed
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptStatus {
    /// Receive transfer was exhausted and has been re-armed
    pub rx_buffer_full: bool,
    /// Transmit transfer finished; the next run was armed or the line went idle
    pub tx_buffer_empty: bool,
}

impl InterruptStatus {
    /// Read both conditions from the hardware
    #[inline]
    pub fn sample<H: SerialDma>(hal: &H) -> Self {
        Self {
            rx_buffer_full: hal.rx_buffer_full(),
            tx_buffer_empty: hal.tx_buffer_empty(),
        }
    }

    /// Check if any condition was set
    #[inline]
    pub fn any(&self) -> bool {
        self.rx_buffer_full || self.tx_buffer_empty
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
