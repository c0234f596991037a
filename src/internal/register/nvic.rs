//! Cortex-M NVIC enable/disable registers.
//!
//! Used to mask a single UART interrupt line without touching the global
//! interrupt state.

use super::write_reg;

/// Interrupt Set-Enable Register 0 address
pub const NVIC_ISER0: usize = 0xE000_E100;
/// Interrupt Clear-Enable Register 0 address
pub const NVIC_ICER0: usize = 0xE000_E180;

/// NVIC register access
pub struct NvicRegs;

impl NvicRegs {
    /// Register address and bit for `irq` relative to `base`
    #[inline(always)]
    pub const fn locate(base: usize, irq: u8) -> (usize, u32) {
        (base + 4 * (irq as usize / 32), 1 << (irq % 32))
    }

    /// Enable interrupt line `irq`
    #[inline(always)]
    pub fn enable(irq: u8) {
        let (addr, bit) = Self::locate(NVIC_ISER0, irq);
        unsafe { write_reg(addr, bit) }
    }

    /// Disable interrupt line `irq`
    #[inline(always)]
    pub fn disable(irq: u8) {
        let (addr, bit) = Self::locate(NVIC_ICER0, irq);
        unsafe { write_reg(addr, bit) }
        // The line must be off before the caller touches shared state.
        #[cfg(target_arch = "arm")]
        unsafe {
            core::arch::asm!("dsb", "isb", options(nostack, preserves_flags));
        }
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_low_irq() {
        assert_eq!(NvicRegs::locate(NVIC_ISER0, 8), (NVIC_ISER0, 1 << 8));
    }

    #[test]
    fn locate_high_irq() {
        assert_eq!(NvicRegs::locate(NVIC_ICER0, 33), (NVIC_ICER0 + 4, 1 << 1));
    }
}
