//! PIO Controller Register Definitions
//!
//! Only the registers needed to hand UART pins over to their peripheral
//! function are defined.

use super::{modify_reg, write_reg};

/// PIOA register block base address
pub const PIOA_BASE: usize = 0x400E_0E00;

/// PIO Disable Register offset (gives the pin to its peripheral)
pub const PIO_PDR_OFFSET: usize = 0x04;
/// Peripheral ABCD Select Register 1 offset
pub const PIO_ABCDSR1_OFFSET: usize = 0x70;
/// Peripheral ABCD Select Register 2 offset
pub const PIO_ABCDSR2_OFFSET: usize = 0x74;

/// Peripheral function selected through the two ABCDSR bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeripheralFunction {
    /// ABCDSR1=0, ABCDSR2=0
    A,
    /// ABCDSR1=1, ABCDSR2=0
    B,
    /// ABCDSR1=0, ABCDSR2=1
    C,
    /// ABCDSR1=1, ABCDSR2=1
    D,
}

impl PeripheralFunction {
    /// Select bits as `(abcdsr1, abcdsr2)`
    pub const fn select_bits(self) -> (bool, bool) {
        match self {
            PeripheralFunction::A => (false, false),
            PeripheralFunction::B => (true, false),
            PeripheralFunction::C => (false, true),
            PeripheralFunction::D => (true, true),
        }
    }
}

/// PIOA register access
pub struct PioaRegs;

impl PioaRegs {
    /// Route `pin` of port A to `function`.
    pub fn assign_peripheral(pin: u8, function: PeripheralFunction) {
        let mask = 1u32 << pin;
        let (sr1, sr2) = function.select_bits();
        unsafe {
            write_reg(PIOA_BASE + PIO_PDR_OFFSET, mask);
            modify_reg(PIOA_BASE + PIO_ABCDSR1_OFFSET, |v| {
                if sr1 { v | mask } else { v & !mask }
            });
            modify_reg(PIOA_BASE + PIO_ABCDSR2_OFFSET, |v| {
                if sr2 { v | mask } else { v & !mask }
            });
        }
    }
}
