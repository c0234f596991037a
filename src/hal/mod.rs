//! Hardware Abstraction Layer
//!
//! The driver core never touches registers itself. Everything it needs from
//! the UART and its DMA channels is expressed by the [`SerialDma`] trait, so
//! the ring logic can run against real hardware or against a mock on the
//! host.
//!
//! # Modules
//!
//! - [`sam`]: SAM4S UART + PDC backend (`sam4s` feature)

#[cfg(feature = "sam4s")]
#[cfg_attr(docsrs, doc(cfg(feature = "sam4s")))]
pub mod sam;

#[cfg(feature = "sam4s")]
pub use sam::PdcUart;

use crate::driver::config::SerialConfig;
use crate::driver::error::ConfigResult;
use crate::internal::constants::PDC_MAX_TRANSFER_LEN;

/// UART with one receive and one transmit DMA channel.
///
/// All methods take `&self`: they are called from both the mainline and the
/// interrupt handler, and register access is inherently shared.
///
/// Each channel accepts a single contiguous region per arm call and does not
/// reload on its own.
pub trait SerialDma {
    /// Largest byte count one arm call can program.
    const MAX_TRANSFER_LEN: usize = PDC_MAX_TRANSFER_LEN;

    /// Apply baud rate and parity and enable the receiver and transmitter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaudRate`](crate::ConfigError::InvalidBaudRate)
    /// when the line cannot run at the requested rate.
    fn configure_line(&self, config: &SerialConfig) -> ConfigResult<()>;

    /// Let the DMA channels move data once armed.
    fn enable_transfers(&self);

    /// Start filling `len` bytes at `addr` from the receiver.
    ///
    /// # Safety
    ///
    /// `[addr, addr + len)` must stay valid and otherwise unwritten until the
    /// transfer is exhausted or re-armed.
    unsafe fn arm_receive(&self, addr: *mut u8, len: usize);

    /// Start sending `len` bytes from `addr`.
    ///
    /// # Safety
    ///
    /// `[addr, addr + len)` must stay valid and unmodified until the transfer
    /// completes.
    unsafe fn arm_transmit(&self, addr: *const u8, len: usize);

    /// Bytes the current receive transfer has yet to fill.
    fn rx_remaining(&self) -> usize;

    /// Receive transfer exhausted (level-triggered).
    fn rx_buffer_full(&self) -> bool;

    /// No transmit transfer outstanding (level-triggered).
    fn tx_buffer_empty(&self) -> bool;

    /// Enable the transmit-empty interrupt source.
    fn enable_tx_empty_interrupt(&self);

    /// Disable the transmit-empty interrupt source.
    fn disable_tx_empty_interrupt(&self);

    /// Enable the receive-full interrupt source.
    fn enable_rx_full_interrupt(&self);

    /// Mask this port's interrupt line.
    ///
    /// Must take effect before returning: no handler for this port may start
    /// until [`unmask_interrupt_line`](Self::unmask_interrupt_line).
    fn mask_interrupt_line(&self);

    /// Unmask this port's interrupt line.
    fn unmask_interrupt_line(&self);
}

impl<T: SerialDma> SerialDma for &T {
    const MAX_TRANSFER_LEN: usize = T::MAX_TRANSFER_LEN;

    fn configure_line(&self, config: &SerialConfig) -> ConfigResult<()> {
        T::configure_line(self, config)
    }

    fn enable_transfers(&self) {
        T::enable_transfers(self);
    }

    unsafe fn arm_receive(&self, addr: *mut u8, len: usize) {
        // SAFETY: forwarded contract.
        unsafe { T::arm_receive(self, addr, len) }
    }

    unsafe fn arm_transmit(&self, addr: *const u8, len: usize) {
        // SAFETY: forwarded contract.
        unsafe { T::arm_transmit(self, addr, len) }
    }

    fn rx_remaining(&self) -> usize {
        T::rx_remaining(self)
    }

    fn rx_buffer_full(&self) -> bool {
        T::rx_buffer_full(self)
    }

    fn tx_buffer_empty(&self) -> bool {
        T::tx_buffer_empty(self)
    }

    fn enable_tx_empty_interrupt(&self) {
        T::enable_tx_empty_interrupt(self);
    }

    fn disable_tx_empty_interrupt(&self) {
        T::disable_tx_empty_interrupt(self);
    }

    fn enable_rx_full_interrupt(&self) {
        T::enable_rx_full_interrupt(self);
    }

    fn mask_interrupt_line(&self) {
        T::mask_interrupt_line(self);
    }

    fn unmask_interrupt_line(&self) {
        T::unmask_interrupt_line(self);
    }
}
