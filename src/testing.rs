//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the serial driver
//! on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use std::sync::{Mutex, MutexGuard};
use std::vec::Vec;

use crate::driver::config::SerialConfig;
use crate::driver::error::{ConfigError, ConfigResult};
use crate::hal::SerialDma;

// =============================================================================
// Mock Serial DMA
// =============================================================================

/// One call made on the hardware trait, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalEvent {
    ConfigureLine(SerialConfig),
    EnableTransfers,
    ArmReceive { addr: usize, len: usize },
    ArmTransmit { addr: usize, len: usize },
    EnableTxEmpty,
    DisableTxEmpty,
    EnableRxFull,
    MaskLine,
    UnmaskLine,
}

#[derive(Debug, Default)]
struct MockState {
    events: Vec<HalEvent>,
    /// Armed receive transfer: (address, length)
    rx: Option<(usize, usize)>,
    rx_remaining: usize,
    /// Armed transmit transfer: (address, length)
    tx: Option<(usize, usize)>,
    /// Bytes the mock has "sent"
    wire: Vec<u8>,
    masked: bool,
    tx_empty_irq: bool,
    rx_full_irq: bool,
    reject_config: bool,
}

/// Mock UART + DMA channels for testing the ring logic without hardware
///
/// Records every trait call and simulates the two transfers: bytes fed
/// through [`receive`](Self::receive) land in the armed receive region, and
/// [`complete_transmit`](Self::complete_transmit) copies the armed transmit
/// region onto a captured wire.
///
/// # Example
///
/// ```ignore
/// let mock = MockSerialDma::new();
/// let serial = DmaSerial::new(&mock, &mut rx, &mut tx).unwrap();
/// serial.init(&SerialConfig::default()).unwrap();
///
/// mock.receive(b"ping");
/// assert_eq!(serial.unread_byte_count(), 4);
/// ```
#[derive(Debug, Default)]
pub struct MockSerialDma {
    state: Mutex<MockState>,
}

impl MockSerialDma {
    /// Create a new mock with nothing armed
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    /// Get all trait calls made so far
    pub fn events(&self) -> Vec<HalEvent> {
        self.state().events.clone()
    }

    /// Clear the event log
    pub fn clear_events(&self) {
        self.state().events.clear();
    }

    /// Get everything transmitted so far
    pub fn wire(&self) -> Vec<u8> {
        self.state().wire.clone()
    }

    /// Clear the captured wire
    pub fn clear_wire(&self) {
        self.state().wire.clear();
    }

    /// Make the next `configure_line` fail
    pub fn reject_configuration(&self) {
        self.state().reject_config = true;
    }

    /// Currently armed transmit transfer, if any
    pub fn pending_transmit(&self) -> Option<(usize, usize)> {
        self.state().tx
    }

    pub fn is_masked(&self) -> bool {
        self.state().masked
    }

    pub fn tx_empty_interrupt_enabled(&self) -> bool {
        self.state().tx_empty_irq
    }

    pub fn rx_full_interrupt_enabled(&self) -> bool {
        self.state().rx_full_irq
    }

    /// Simulate bytes arriving on the line.
    ///
    /// Bytes are written into the armed receive region until it is full;
    /// returns how many were accepted.
    pub fn receive(&self, data: &[u8]) -> usize {
        let mut state = self.state();
        let Some((addr, len)) = state.rx else {
            return 0;
        };
        let count = data.len().min(state.rx_remaining);
        let offset = len - state.rx_remaining;
        // SAFETY: the driver armed [addr, addr + len) and keeps it alive.
        unsafe {
            core::ptr::copy_nonoverlapping(data.as_ptr(), (addr as *mut u8).add(offset), count);
        }
        state.rx_remaining -= count;
        count
    }

    /// Simulate the armed transmit transfer finishing.
    ///
    /// Returns the number of bytes moved to the wire (0 if nothing was armed).
    pub fn complete_transmit(&self) -> usize {
        let mut state = self.state();
        let Some((addr, len)) = state.tx.take() else {
            return 0;
        };
        // SAFETY: the driver armed [addr, addr + len) and keeps it alive
        // and unmodified until completion.
        let bytes = unsafe { core::slice::from_raw_parts(addr as *const u8, len) };
        state.wire.extend_from_slice(bytes);
        len
    }
}

impl SerialDma for MockSerialDma {
    fn configure_line(&self, config: &SerialConfig) -> ConfigResult<()> {
        let mut state = self.state();
        if state.reject_config {
            return Err(ConfigError::InvalidBaudRate);
        }
        config.validate()?;
        state.events.push(HalEvent::ConfigureLine(*config));
        Ok(())
    }

    fn enable_transfers(&self) {
        self.state().events.push(HalEvent::EnableTransfers);
    }

    unsafe fn arm_receive(&self, addr: *mut u8, len: usize) {
        let mut state = self.state();
        let addr = addr as usize;
        state.rx = Some((addr, len));
        state.rx_remaining = len;
        state.events.push(HalEvent::ArmReceive { addr, len });
    }

    unsafe fn arm_transmit(&self, addr: *const u8, len: usize) {
        let mut state = self.state();
        let addr = addr as usize;
        assert!(state.tx.is_none(), "transmit armed while a transfer is outstanding");
        state.tx = Some((addr, len));
        state.events.push(HalEvent::ArmTransmit { addr, len });
    }

    fn rx_remaining(&self) -> usize {
        self.state().rx_remaining
    }

    fn rx_buffer_full(&self) -> bool {
        let state = self.state();
        state.rx.is_some() && state.rx_remaining == 0
    }

    fn tx_buffer_empty(&self) -> bool {
        self.state().tx.is_none()
    }

    fn enable_tx_empty_interrupt(&self) {
        let mut state = self.state();
        state.tx_empty_irq = true;
        state.events.push(HalEvent::EnableTxEmpty);
    }

    fn disable_tx_empty_interrupt(&self) {
        let mut state = self.state();
        state.tx_empty_irq = false;
        state.events.push(HalEvent::DisableTxEmpty);
    }

    fn enable_rx_full_interrupt(&self) {
        let mut state = self.state();
        state.rx_full_irq = true;
        state.events.push(HalEvent::EnableRxFull);
    }

    fn mask_interrupt_line(&self) {
        let mut state = self.state();
        assert!(!state.masked, "interrupt line masked twice");
        state.masked = true;
        state.events.push(HalEvent::MaskLine);
    }

    fn unmask_interrupt_line(&self) {
        let mut state = self.state();
        state.masked = false;
        state.events.push(HalEvent::UnmaskLine);
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }

    /// Get total microseconds that were "delayed"
    pub fn total_us(&self) -> u64 {
        self.total_ns() / 1_000
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += ns as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_receive_fills_armed_region() {
        let mock = MockSerialDma::new();
        let mut buf = [0u8; 4];
        unsafe { mock.arm_receive(buf.as_mut_ptr(), buf.len()) };

        assert_eq!(mock.receive(b"abcdef"), 4);
        assert_eq!(mock.rx_remaining(), 0);
        assert!(mock.rx_buffer_full());
        assert_eq!(&buf, b"abcd");
    }

    #[test]
    fn mock_receive_without_arm_drops_bytes() {
        let mock = MockSerialDma::new();
        assert_eq!(mock.receive(b"x"), 0);
        assert!(!mock.rx_buffer_full());
    }

    #[test]
    fn mock_transmit_captures_wire() {
        let mock = MockSerialDma::new();
        let data = *b"hi";
        assert!(mock.tx_buffer_empty());
        unsafe { mock.arm_transmit(data.as_ptr(), data.len()) };
        assert!(!mock.tx_buffer_empty());

        assert_eq!(mock.complete_transmit(), 2);
        assert!(mock.tx_buffer_empty());
        assert_eq!(mock.wire(), b"hi");
        assert_eq!(mock.complete_transmit(), 0);
    }

    #[test]
    fn mock_logs_calls_in_order() {
        let mock = MockSerialDma::new();
        mock.mask_interrupt_line();
        assert!(mock.is_masked());
        mock.enable_tx_empty_interrupt();
        mock.unmask_interrupt_line();
        assert_eq!(
            mock.events(),
            [HalEvent::MaskLine, HalEvent::EnableTxEmpty, HalEvent::UnmaskLine]
        );
        mock.clear_events();
        assert!(mock.events().is_empty());
    }

    #[test]
    fn mock_delay_tracking() {
        let mut delay = MockDelay::new();

        embedded_hal::delay::DelayNs::delay_us(&mut delay, 10);
        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 500);

        assert_eq!(delay.total_ns(), 10_500);
        assert_eq!(delay.total_us(), 10);
    }
}
