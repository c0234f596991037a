//! SAM4S UART + PDC backend
//!
//! Drives UART0 or UART1 through its peripheral DMA controller (PDC)
//! channels. Each channel is used in single-buffer mode: only the current
//! pointer/counter pair is programmed, never the "next" pair, so a transfer
//! ends when its counter reaches zero and the driver re-arms it.
//!
//! The peripheral clock for the UART must already be enabled in the PMC.

use crate::driver::config::{PortId, SerialConfig};
use crate::driver::error::{ConfigError, ConfigResult};
use crate::hal::SerialDma;
use crate::internal::constants::{BAUD_OVERSAMPLING, MAX_BAUD_DIVISOR};
use crate::internal::register::nvic::NvicRegs;
use crate::internal::register::pio::{PeripheralFunction, PioaRegs};
use crate::internal::register::uart::{
    PERIPH_PTCR_RXTDIS, PERIPH_PTCR_RXTEN, PERIPH_PTCR_TXTDIS, PERIPH_PTCR_TXTEN, UART_CR_RSTRX,
    UART_CR_RSTTX, UART_CR_RXDIS, UART_CR_RXEN, UART_CR_TXDIS, UART_CR_TXEN, UART_MR_PAR_MASK,
    UART_MR_PAR_SHIFT, UART0_BASE, UART1_BASE, UART_SR_RXBUFF, UART_SR_TXBUFE, UartRegs,
};

/// Fixed hardware resources of one UART port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PortResources {
    /// UART register block base (the PDC block sits at +0x100)
    pub base: usize,
    /// NVIC interrupt number
    pub irq: u8,
    /// PIOA pin carrying URXD
    pub rx_pin: u8,
    /// PIOA pin carrying UTXD
    pub tx_pin: u8,
    /// Peripheral function routing both pins to the UART
    pub function: PeripheralFunction,
}

impl PortResources {
    /// Resources for `port`
    pub(crate) const fn of(port: PortId) -> Self {
        match port {
            PortId::Uart0 => Self {
                base: UART0_BASE,
                irq: 8,
                rx_pin: 9,
                tx_pin: 10,
                function: PeripheralFunction::A,
            },
            PortId::Uart1 => Self {
                base: UART1_BASE,
                irq: 9,
                rx_pin: 5,
                tx_pin: 6,
                function: PeripheralFunction::C,
            },
        }
    }
}

/// Compute the baud rate generator divisor `CD = MCK / (16 * baud)`.
///
/// # Errors
///
/// [`ConfigError::InvalidBaudRate`] if `baud` is zero or the divisor falls
/// outside `1..=0xFFFF`.
pub const fn baud_divisor(peripheral_clock_hz: u32, baud: u32) -> ConfigResult<u16> {
    if baud == 0 {
        return Err(ConfigError::InvalidBaudRate);
    }
    let cd = peripheral_clock_hz as u64 / (baud as u64 * BAUD_OVERSAMPLING as u64);
    if cd == 0 || cd > MAX_BAUD_DIVISOR as u64 {
        return Err(ConfigError::InvalidBaudRate);
    }
    Ok(cd as u16)
}

/// SAM4S UART with PDC transfers
///
/// # Example
///
/// ```ignore
/// let hal = PdcUart::new(PortId::Uart1, 120_000_000);
/// let serial = DmaSerial::new(hal, rx, tx)?;
/// ```
#[derive(Debug)]
pub struct PdcUart {
    port: PortId,
    regs: UartRegs,
    resources: PortResources,
    peripheral_clock_hz: u32,
}

impl PdcUart {
    /// Backend for `port`, clocked at `peripheral_clock_hz` (MCK).
    pub const fn new(port: PortId, peripheral_clock_hz: u32) -> Self {
        let resources = PortResources::of(port);
        Self {
            port,
            regs: UartRegs::at(resources.base),
            resources,
            peripheral_clock_hz,
        }
    }

    /// Port this backend drives
    #[inline(always)]
    pub const fn port(&self) -> PortId {
        self.port
    }
}

impl SerialDma for PdcUart {
    fn configure_line(&self, config: &SerialConfig) -> ConfigResult<()> {
        let cd = baud_divisor(self.peripheral_clock_hz, config.baud_rate)?;

        self.regs
            .set_control(UART_CR_RSTRX | UART_CR_RSTTX | UART_CR_RXDIS | UART_CR_TXDIS);

        PioaRegs::assign_peripheral(self.resources.rx_pin, self.resources.function);
        PioaRegs::assign_peripheral(self.resources.tx_pin, self.resources.function);

        self.regs.set_baud_rate(u32::from(cd));
        self.regs
            .set_mode((config.parity.to_field() << UART_MR_PAR_SHIFT) & UART_MR_PAR_MASK);

        // PDC stays off until the rings are armed.
        self.regs
            .set_transfer_control(PERIPH_PTCR_RXTDIS | PERIPH_PTCR_TXTDIS);
        self.regs.set_control(UART_CR_RXEN | UART_CR_TXEN);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "{} configured: CD={} parity={}",
            self.port,
            cd,
            config.parity
        );
        Ok(())
    }

    fn enable_transfers(&self) {
        self.regs
            .set_transfer_control(PERIPH_PTCR_RXTEN | PERIPH_PTCR_TXTEN);
    }

    unsafe fn arm_receive(&self, addr: *mut u8, len: usize) {
        self.regs.start_rx_transfer(addr as u32, len as u32);
    }

    unsafe fn arm_transmit(&self, addr: *const u8, len: usize) {
        self.regs.start_tx_transfer(addr as u32, len as u32);
    }

    fn rx_remaining(&self) -> usize {
        self.regs.rx_counter() as usize
    }

    fn rx_buffer_full(&self) -> bool {
        self.regs.status_set(UART_SR_RXBUFF)
    }

    fn tx_buffer_empty(&self) -> bool {
        self.regs.status_set(UART_SR_TXBUFE)
    }

    fn enable_tx_empty_interrupt(&self) {
        self.regs.set_interrupt_enable(UART_SR_TXBUFE);
    }

    fn disable_tx_empty_interrupt(&self) {
        self.regs.set_interrupt_disable(UART_SR_TXBUFE);
    }

    fn enable_rx_full_interrupt(&self) {
        self.regs.set_interrupt_enable(UART_SR_RXBUFF);
    }

    fn mask_interrupt_line(&self) {
        NvicRegs::disable(self.resources.irq);
    }

    fn unmask_interrupt_line(&self) {
        NvicRegs::enable(self.resources.irq);
    }
}

// =============================================================================
// Tests
// =============================================================================
