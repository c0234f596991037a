//! PDC Serial Ring Driver
//!
//! A `no_std`, `no_alloc` serial driver that exposes a UART as two circular
//! byte buffers filled and drained by the peripheral DMA controller.
//!
//! The application supplies both buffers. Received bytes land in the receive
//! ring without CPU involvement and are consumed one at a time or in bulk.
//! Outgoing packets are copied into the transmit ring and sent in the
//! background; a packet that crosses the end of the ring goes out as two
//! transfers, the second started from the interrupt handler.
//!
//! # Architecture
//!
//! 1. **Driver Layer** ([`driver`]): [`DmaSerial`], its receive tracker and
//!    transmit manager, and the interrupt service routine
//! 2. **HAL Layer** ([`hal`]): the [`SerialDma`](hal::SerialDma) trait and the
//!    SAM4S UART + PDC backend
//! 3. **Binding Layer** ([`sync`]): the port registry and the
//!    [`serial_interrupt_trampoline!`] vector generator
//!
//! # Features
//!
//! - `sam4s` (default): SAM4S UART0/UART1 backend
//! - `critical-section` (default): interrupt registry and vector trampolines
//! - `defmt`: defmt formatting and driver log messages
//! - `log`: `log` records for refused operations
//! - `embedded-io`: blocking `Read`/`Write` adapter
//!
//! # Example
//!
//! ```ignore
//! use pdc_serial_ring::{DmaSerial, PortId, SerialConfig};
//! use pdc_serial_ring::hal::PdcUart;
//! use static_cell::StaticCell;
//!
//! static RX: StaticCell<[u8; 256]> = StaticCell::new();
//! static TX: StaticCell<[u8; 256]> = StaticCell::new();
//! static SERIAL: StaticCell<DmaSerial<'static, PdcUart>> = StaticCell::new();
//!
//! let hal = PdcUart::new(PortId::Uart0, 120_000_000);
//! let serial = SERIAL.init(DmaSerial::new(
//!     hal,
//!     RX.init([0; 256]),
//!     TX.init([0; 256]),
//! )?);
//! pdc_serial_ring::sync::initialize(PortId::Uart0, serial, &SerialConfig::default())?;
//!
//! pdc_serial_ring::serial_interrupt_trampoline!(UART0_Handler, PortId::Uart0);
//!
//! serial.enqueue_and_send(b"hello\r\n")?;
//! while serial.unread_byte_count() > 0 {
//!     let byte = serial.read_next_byte()?;
//! }
//! ```
//!
//! # Memory Requirements
//!
//! Only the two caller-supplied buffers plus a few words of ring state per
//! port. Both buffers must be reachable by the PDC (internal SRAM).

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels mirror the [lints] table in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod hal;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "embedded-io")]
#[cfg_attr(docsrs, doc(cfg(feature = "embedded-io")))]
pub mod integration;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::comms::CommsBuffer;
pub use driver::config::{Parity, PortId, SerialConfig};
pub use driver::error::{
    ConfigError, ConfigResult, Error, IoError, IoResult, Result, RxError, RxResult, TxError,
    TxResult,
};
pub use driver::interrupt::InterruptStatus;
pub use driver::serial::DmaSerial;

/// Low-level register accessors for advanced use.
///
/// These are intentionally separated from the primary facade. Most users should
/// prefer the safe driver APIs instead of touching registers directly.
///
/// # Safety
///
/// Direct register access bypasses driver invariants. Arming a PDC channel by
/// hand while the driver owns the port corrupts its ring state.
#[cfg(feature = "sam4s")]
pub mod unsafe_registers {
    pub use crate::internal::register::uart::UartRegs;
}

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::{InterruptRegistry, InterruptTarget};

/// Shared driver constants.
pub mod constants {
    pub use crate::internal::constants::{
        // Line defaults
        DEFAULT_BAUD_RATE,
        // Timing
        DEFAULT_FLUSH_TIMEOUT_US,
        FLUSH_POLL_INTERVAL_US,
        // Registry
        MAX_PORTS,
        // DMA
        PDC_MAX_TRANSFER_LEN,
    };
}

// =============================================================================
// Macro Helpers
// =============================================================================

/// Define the interrupt vector for a UART port.
///
/// Expands to a `#[no_mangle] extern "C" fn $vector()` that forwards to the
/// driver bound to `$port` in [`sync::REGISTRY`]. An interrupt arriving before
/// anything is bound is ignored.
///
/// # Examples
///
/// ```ignore
/// pdc_serial_ring::serial_interrupt_trampoline!(UART0_Handler, PortId::Uart0);
/// pdc_serial_ring::serial_interrupt_trampoline!(UART1_Handler, PortId::Uart1);
/// ```
#[cfg(feature = "critical-section")]
#[macro_export]
macro_rules! serial_interrupt_trampoline {
    ($vector:ident, $port:expr) => {
        #[allow(non_snake_case)]
        #[unsafe(no_mangle)]
        pub extern "C" fn $vector() {
            let _ = $crate::sync::REGISTRY.dispatch($port);
        }
    };
}
