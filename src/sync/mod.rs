//! Synchronization and Interrupt Binding
//!
//! This module connects bare interrupt vectors to driver instances. It
//! includes:
//!
//! - **Primitives** (`primitives`): Low-level synchronization types
//!   - [`CriticalSectionCell`] - ISR-safe interior mutability
//!
//! - **Registry** (`registry`): Port-to-driver table
//!   - [`InterruptRegistry`] / [`REGISTRY`] - one slot per UART port
//!   - [`InterruptTarget`] - what a vector forwards to
//!   - [`initialize`] - init a driver and bind it in one step
//!
//! # Feature Flags
//!
//! - `critical-section`: Enables this module
//!
//! # Example
//!
//! ```ignore
//! use pdc_serial_ring::sync;
//!
//! sync::initialize(PortId::Uart1, serial, &SerialConfig::default())?;
//!
//! // Expands to `#[no_mangle] extern "C" fn UART1_Handler()`.
//! pdc_serial_ring::serial_interrupt_trampoline!(UART1_Handler, PortId::Uart1);
//! ```

mod primitives;
mod registry;

pub use primitives::CriticalSectionCell;
pub use registry::{InterruptRegistry, InterruptTarget, REGISTRY, initialize};
