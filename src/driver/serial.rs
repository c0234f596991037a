//! Core DMA serial driver.
//!
//! This module contains the [`DmaSerial`] structure, which owns the hardware
//! handle and both rings:
//!
//! - Initialization
//! - Byte-stream reception from the receive ring
//! - Packet transmission through the transmit ring
//! - Interrupt handling

use embedded_hal::delay::DelayNs;

use super::config::SerialConfig;
use super::error::{ConfigResult, IoError, Result};
use super::interrupt::InterruptStatus;
use super::rx::RxTracker;
use super::tx::TxManager;
use crate::hal::SerialDma;
use crate::internal::constants::FLUSH_POLL_INTERVAL_US;

// =============================================================================
// DMA Serial Driver
// =============================================================================

/// Serial port with DMA-backed receive and transmit circular buffers
///
/// Both buffers are caller-supplied and borrowed for `'a`. All operations take
/// `&self` so the driver can live in a `static` shared with its interrupt
/// handler; see [`sync::initialize`](crate::sync::initialize).
///
/// # Type Parameters
/// * `H` - Hardware backend implementing [`SerialDma`]
///
/// # Example
/// ```ignore
/// static mut RX: [u8; 256] = [0; 256];
/// static mut TX: [u8; 256] = [0; 256];
///
/// let hal = PdcUart::new(PortId::Uart0, 120_000_000);
/// let serial = DmaSerial::new(hal, unsafe { &mut RX }, unsafe { &mut TX })?;
/// serial.init(&SerialConfig::new().with_baud_rate(57_600))?;
///
/// serial.enqueue_and_send(b"hello")?;
/// while serial.unread_byte_count() > 0 {
///     let byte = serial.read_next_byte()?;
/// }
/// ```
pub struct DmaSerial<'a, H: SerialDma> {
    hal: H,
    rx: RxTracker<'a>,
    tx: TxManager<'a>,
}

impl<'a, H: SerialDma> DmaSerial<'a, H> {
    /// Create a driver over the given buffers.
    ///
    /// Nothing is touched on the hardware until [`init`](Self::init).
    ///
    /// # Errors
    /// - `InvalidCapacity` - a buffer is empty or longer than
    ///   [`SerialDma::MAX_TRANSFER_LEN`]
    pub fn new(hal: H, rx_buffer: &'a mut [u8], tx_buffer: &'a mut [u8]) -> ConfigResult<Self> {
        Ok(Self {
            rx: RxTracker::new(rx_buffer, H::MAX_TRANSFER_LEN)?,
            tx: TxManager::new(tx_buffer, H::MAX_TRANSFER_LEN)?,
            hal,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Hardware backend
    #[inline(always)]
    pub fn hal(&self) -> &H {
        &self.hal
    }

    /// Receive buffer capacity in bytes
    #[inline(always)]
    pub fn rx_capacity(&self) -> usize {
        self.rx.capacity()
    }

    /// Transmit buffer capacity in bytes
    #[inline(always)]
    pub fn tx_capacity(&self) -> usize {
        self.tx.capacity()
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Configure the line and start receiving.
    ///
    /// Sequence:
    /// 1. Apply baud rate and parity
    /// 2. Reset both rings to empty
    /// 3. Arm the receive DMA over the whole receive buffer
    /// 4. Enable the DMA channels
    /// 5. Enable receive-full, disable transmit-empty
    /// 6. Unmask the port's interrupt line
    ///
    /// Calling it again restarts from empty; anything queued is dropped.
    ///
    /// # Errors
    /// - `InvalidBaudRate` - zero baud rate or one the backend cannot produce.
    ///   If the backend refuses, the interrupt line is left masked.
    pub fn init(&self, config: &SerialConfig) -> Result<()> {
        config.validate()?;
        self.hal.mask_interrupt_line();
        if let Err(e) = self.hal.configure_line(config) {
            #[cfg(feature = "log")]
            log::warn!("serial line configuration rejected: {e}");
            return Err(e.into());
        }

        self.rx.reset();
        self.tx.reset();
        self.rx.arm(&self.hal);
        self.hal.enable_transfers();

        self.hal.enable_rx_full_interrupt();
        self.hal.disable_tx_empty_interrupt();
        self.hal.unmask_interrupt_line();

        #[cfg(feature = "defmt")]
        defmt::info!(
            "serial ring up: {} baud, rx {} bytes, tx {} bytes",
            config.baud_rate,
            self.rx.capacity(),
            self.tx.capacity()
        );
        Ok(())
    }

    // =========================================================================
    // Receive
    // =========================================================================

    /// Read the oldest unread byte.
    ///
    /// # Errors
    /// - `Empty` - no unread bytes; nothing is consumed
    pub fn read_next_byte(&self) -> Result<u8> {
        Ok(self.rx.read_next_byte(self.hal.rx_remaining())?)
    }

    /// Copy up to `buf.len()` unread bytes into `buf`.
    ///
    /// Returns the number copied; 0 when nothing is unread.
    pub fn read(&self, buf: &mut [u8]) -> usize {
        self.rx.read(self.hal.rx_remaining(), buf)
    }

    /// Number of received bytes not yet read
    pub fn unread_byte_count(&self) -> usize {
        self.rx.unread(self.hal.rx_remaining())
    }

    // =========================================================================
    // Transmit
    // =========================================================================

    /// Queue `data` for transmission, starting the DMA if it is idle.
    ///
    /// Never blocks. A packet crossing the end of the buffer is sent in two
    /// transfers; the second is started from the interrupt handler.
    ///
    /// # Errors
    /// - `PacketTooLarge` - `data` is longer than the transmit buffer
    /// - `InsufficientSpace` - not enough room until queued bytes drain
    pub fn enqueue_and_send(&self, data: &[u8]) -> Result<()> {
        self.tx.enqueue(&self.hal, data).map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("enqueue of {} bytes refused: {}", data.len(), e);
            #[cfg(feature = "log")]
            log::warn!("enqueue of {} bytes refused: {e}", data.len());
            e.into()
        })
    }

    /// Bytes queued but not yet handed to the DMA
    pub fn unsent_byte_count(&self) -> usize {
        self.tx.unsent()
    }

    /// Bytes that can currently be enqueued
    pub fn free_space(&self) -> usize {
        self.tx.free_space()
    }

    /// True while a transmit transfer is outstanding
    #[inline(always)]
    pub fn is_transmitting(&self) -> bool {
        self.tx.is_transmitting()
    }

    /// Wait until everything queued has been sent.
    ///
    /// Polls every few microseconds; relies on the interrupt handler to make
    /// progress.
    ///
    /// # Errors
    /// - `Timeout` - still transmitting after `timeout_us`
    pub fn flush<D: DelayNs>(&self, delay: &mut D, timeout_us: u32) -> Result<()> {
        let mut waited = 0u32;
        while self.is_transmitting() {
            if waited >= timeout_us {
                return Err(IoError::Timeout.into());
            }
            delay.delay_us(FLUSH_POLL_INTERVAL_US);
            waited = waited.saturating_add(FLUSH_POLL_INTERVAL_US);
        }
        Ok(())
    }

    // =========================================================================
    // Interrupt Handling
    // =========================================================================

    /// Service the port's interrupt (call from ISR only).
    ///
    /// - Receive full: re-arm the receive DMA over the same buffer. The
    ///   read position is left alone.
    /// - Transmit empty: arm the next queued run, or go idle and silence
    ///   the transmit-empty source.
    ///
    /// Applications never call this directly; the vector installed by
    /// [`serial_interrupt_trampoline!`](crate::serial_interrupt_trampoline)
    /// reaches it through the registry.
    pub fn on_interrupt(&self) -> InterruptStatus {
        let status = InterruptStatus::sample(&self.hal);

        if status.rx_buffer_full {
            self.rx.arm(&self.hal);
            #[cfg(feature = "defmt")]
            defmt::debug!("rx ring wrapped, re-armed");
        }

        if status.tx_buffer_empty {
            self.tx.on_transmit_complete(&self.hal);
        }

        status
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
