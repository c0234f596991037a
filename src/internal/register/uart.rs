//! UART and PDC Register Definitions
//!
//! Each SAM4S UART carries its own peripheral DMA controller (PDC) channel
//! pair. The PDC registers sit at offset `0x100` inside the UART block.

use super::{reg_ro, reg_rw, reg_wo};

// =============================================================================
// Base Addresses
// =============================================================================

/// UART0 register block base address
pub const UART0_BASE: usize = 0x400E_0600;

/// UART1 register block base address
pub const UART1_BASE: usize = 0x400E_0800;

// =============================================================================
// Register Offsets
// =============================================================================

/// Control Register offset (write-only)
pub const UART_CR_OFFSET: usize = 0x00;
/// Mode Register offset
pub const UART_MR_OFFSET: usize = 0x04;
/// Interrupt Enable Register offset (write-only)
pub const UART_IER_OFFSET: usize = 0x08;
/// Interrupt Disable Register offset (write-only)
pub const UART_IDR_OFFSET: usize = 0x0C;
/// Interrupt Mask Register offset (read-only)
pub const UART_IMR_OFFSET: usize = 0x10;
/// Status Register offset (read-only)
pub const UART_SR_OFFSET: usize = 0x14;
/// Baud Rate Generator Register offset
pub const UART_BRGR_OFFSET: usize = 0x20;

/// PDC Receive Pointer Register offset
pub const PERIPH_RPR_OFFSET: usize = 0x100;
/// PDC Receive Counter Register offset
pub const PERIPH_RCR_OFFSET: usize = 0x104;
/// PDC Transmit Pointer Register offset
pub const PERIPH_TPR_OFFSET: usize = 0x108;
/// PDC Transmit Counter Register offset
pub const PERIPH_TCR_OFFSET: usize = 0x10C;
/// PDC Transfer Control Register offset (write-only)
pub const PERIPH_PTCR_OFFSET: usize = 0x120;
/// PDC Transfer Status Register offset (read-only)
pub const PERIPH_PTSR_OFFSET: usize = 0x124;

// =============================================================================
// Control Register (UART_CR) Bits
// =============================================================================

/// Reset receiver
pub const UART_CR_RSTRX: u32 = 1 << 2;
/// Reset transmitter
pub const UART_CR_RSTTX: u32 = 1 << 3;
/// Receiver enable
pub const UART_CR_RXEN: u32 = 1 << 4;
/// Receiver disable
pub const UART_CR_RXDIS: u32 = 1 << 5;
/// Transmitter enable
pub const UART_CR_TXEN: u32 = 1 << 6;
/// Transmitter disable
pub const UART_CR_TXDIS: u32 = 1 << 7;

// =============================================================================
// Mode Register (UART_MR) Fields
// =============================================================================

/// Parity type field shift
pub const UART_MR_PAR_SHIFT: u32 = 9;
/// Parity type field mask
pub const UART_MR_PAR_MASK: u32 = 0x7 << UART_MR_PAR_SHIFT;

// =============================================================================
// Status / Interrupt Bits (shared by SR, IER, IDR, IMR)
// =============================================================================

/// End of receive transfer (RCR reached zero)
pub const UART_SR_ENDRX: u32 = 1 << 3;
/// End of transmit transfer (TCR reached zero)
pub const UART_SR_ENDTX: u32 = 1 << 4;
/// Overrun error
pub const UART_SR_OVRE: u32 = 1 << 5;
/// Framing error
pub const UART_SR_FRAME: u32 = 1 << 6;
/// Parity error
pub const UART_SR_PARE: u32 = 1 << 7;
/// Transmit buffer empty (TCR and TNCR both zero)
pub const UART_SR_TXBUFE: u32 = 1 << 11;
/// Receive buffer full (RCR and RNCR both zero)
pub const UART_SR_RXBUFF: u32 = 1 << 12;

// =============================================================================
// Baud Rate Generator (UART_BRGR) Fields
// =============================================================================

/// Clock divisor mask
pub const UART_BRGR_CD_MASK: u32 = 0xFFFF;

// =============================================================================
// PDC Transfer Control Register (PERIPH_PTCR) Bits
// =============================================================================

/// Receiver transfer enable
pub const PERIPH_PTCR_RXTEN: u32 = 1 << 0;
/// Receiver transfer disable
pub const PERIPH_PTCR_RXTDIS: u32 = 1 << 1;
/// Transmitter transfer enable
pub const PERIPH_PTCR_TXTEN: u32 = 1 << 8;
/// Transmitter transfer disable
pub const PERIPH_PTCR_TXTDIS: u32 = 1 << 9;

// =============================================================================
// UART Register Access
// =============================================================================

/// UART (and attached PDC) register block for type-safe access
#[derive(Debug, Clone, Copy)]
pub struct UartRegs {
    base: usize,
}

impl UartRegs {
    /// Register block at `base`
    #[inline(always)]
    pub const fn at(base: usize) -> Self {
        Self { base }
    }

    /// Get the base address
    #[inline(always)]
    pub const fn base(&self) -> usize {
        self.base
    }

    // -------------------------------------------------------------------------
    // Register accessors (generated by macros)
    // -------------------------------------------------------------------------

    reg_wo!(set_control, UART_CR_OFFSET, "Control register");
    reg_rw!(mode, set_mode, UART_MR_OFFSET, "Mode register");
    reg_wo!(set_interrupt_enable, UART_IER_OFFSET, "Interrupt Enable register");
    reg_wo!(set_interrupt_disable, UART_IDR_OFFSET, "Interrupt Disable register");
    reg_ro!(interrupt_mask, UART_IMR_OFFSET, "Interrupt Mask register");
    reg_ro!(status, UART_SR_OFFSET, "Status register");
    reg_rw!(baud_rate, set_baud_rate, UART_BRGR_OFFSET, "Baud Rate Generator register");

    reg_rw!(rx_pointer, set_rx_pointer, PERIPH_RPR_OFFSET, "PDC Receive Pointer register");
    reg_rw!(rx_counter, set_rx_counter, PERIPH_RCR_OFFSET, "PDC Receive Counter register");
    reg_rw!(tx_pointer, set_tx_pointer, PERIPH_TPR_OFFSET, "PDC Transmit Pointer register");
    reg_rw!(tx_counter, set_tx_counter, PERIPH_TCR_OFFSET, "PDC Transmit Counter register");
    reg_wo!(set_transfer_control, PERIPH_PTCR_OFFSET, "PDC Transfer Control register");
    reg_ro!(transfer_status, PERIPH_PTSR_OFFSET, "PDC Transfer Status register");

    // -------------------------------------------------------------------------
    // Special operations
    // -------------------------------------------------------------------------

    /// Program the receive channel. Writing the counter starts the transfer,
    /// so the pointer must be written first.
    #[inline(always)]
    pub fn start_rx_transfer(&self, addr: u32, len: u32) {
        self.set_rx_pointer(addr);
        self.set_rx_counter(len);
    }

    /// Program the transmit channel. Writing the counter starts the
    /// transfer, so the pointer must be written first.
    #[inline(always)]
    pub fn start_tx_transfer(&self, addr: u32, len: u32) {
        self.set_tx_pointer(addr);
        self.set_tx_counter(len);
    }

    /// Check a status bit
    #[inline(always)]
    pub fn status_set(&self, bit: u32) -> bool {
        (self.status() & bit) != 0
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdc_registers_follow_uart_block() {
        assert_eq!(PERIPH_RPR_OFFSET, 0x100);
        assert_eq!(PERIPH_RCR_OFFSET, PERIPH_RPR_OFFSET + 4);
        assert_eq!(PERIPH_TPR_OFFSET, PERIPH_RCR_OFFSET + 4);
        assert_eq!(PERIPH_TCR_OFFSET, PERIPH_TPR_OFFSET + 4);
        assert_eq!(PERIPH_PTCR_OFFSET, 0x120);
    }

    #[test]
    fn uart_blocks_do_not_overlap() {
        assert!(UART0_BASE + PERIPH_PTSR_OFFSET < UART1_BASE);
    }

    #[test]
    fn status_bits_are_distinct() {
        let bits = [
            UART_SR_ENDRX,
            UART_SR_ENDTX,
            UART_SR_OVRE,
            UART_SR_FRAME,
            UART_SR_PARE,
            UART_SR_TXBUFE,
            UART_SR_RXBUFF,
        ];
        for (i, a) in bits.iter().enumerate() {
            assert_eq!(a.count_ones(), 1);
            for b in &bits[i + 1..] {
                assert_eq!(a & b, 0);
            }
        }
    }

    #[test]
    fn parity_field_mask() {
        assert_eq!(UART_MR_PAR_MASK, 0x0E00);
    }

    #[test]
    fn uart_regs_keep_base() {
        assert_eq!(UartRegs::at(UART1_BASE).base(), UART1_BASE);
    }
}
