//! Memory-mapped register definitions for the SAM4S UART, PDC, PIO and NVIC
//!
//! This module provides type-safe access to the peripheral registers the
//! serial driver touches. All register access is volatile to ensure proper
//! hardware interaction.
//!
//! Unlike single-instance peripherals, each UART has its own base address,
//! so the register blocks are small structs holding a base and the accessor
//! macros below generate `&self` methods.

// Allow dead code in this internal module - not every register is used by the driver
#![allow(dead_code)]

pub mod nvic;
pub mod pio;
pub mod uart;

/// Read a 32-bit register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn read_reg(addr: usize) -> u32 {
    unsafe { core::ptr::read_volatile(addr as *const u32) }
}

/// Write a 32-bit value to a register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn write_reg(addr: usize, value: u32) {
    unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
}

/// Modify a register using a read-modify-write operation
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn modify_reg<F>(addr: usize, f: F)
where
    F: FnOnce(u32) -> u32,
{
    // SAFETY: caller guarantees address validity
    let value = unsafe { read_reg(addr) };
    unsafe { write_reg(addr, f(value)) }
}

// =============================================================================
// Register Access Macros
// =============================================================================

/// Generate read/write accessor methods for a register of an instance block.
///
/// The enclosing type must have a `base: usize` field.
///
/// # Example
/// ```ignore
/// impl UartRegs {
///     reg_rw!(mode, set_mode, UART_MR_OFFSET, "Mode register");
/// }
/// ```
macro_rules! reg_rw {
    ($read_fn:ident, $write_fn:ident, $offset:expr, $doc:expr) => {
        #[doc = concat!("Read ", $doc)]
        #[inline(always)]
        pub fn $read_fn(&self) -> u32 {
            unsafe { $crate::internal::register::read_reg(self.base + $offset) }
        }

        #[doc = concat!("Write ", $doc)]
        #[inline(always)]
        pub fn $write_fn(&self, value: u32) {
            unsafe { $crate::internal::register::write_reg(self.base + $offset, value) }
        }
    };
}

/// Generate a read-only accessor method for a register of an instance block.
macro_rules! reg_ro {
    ($read_fn:ident, $offset:expr, $doc:expr) => {
        #[doc = concat!("Read ", $doc)]
        #[inline(always)]
        pub fn $read_fn(&self) -> u32 {
            unsafe { $crate::internal::register::read_reg(self.base + $offset) }
        }
    };
}

/// Generate a write-only accessor method for a command register.
macro_rules! reg_wo {
    ($write_fn:ident, $offset:expr, $doc:expr) => {
        #[doc = concat!("Write ", $doc)]
        #[inline(always)]
        pub fn $write_fn(&self, value: u32) {
            unsafe { $crate::internal::register::write_reg(self.base + $offset, value) }
        }
    };
}

// Export macros for use in submodules
pub(crate) use reg_ro;
pub(crate) use reg_rw;
pub(crate) use reg_wo;
