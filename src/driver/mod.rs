//! Core driver components for the DMA serial rings.
//!
//! This module contains the building blocks for operating a UART whose
//! receive and transmit paths run through DMA-backed circular buffers:
//!
//! - [`config`] - Line configuration and port selection
//! - [`error`] - Error types and result aliases
//! - [`serial`] - The [`DmaSerial`] driver
//! - [`interrupt`] - Interrupt status reporting
//! - [`comms`] - Transport-agnostic [`CommsBuffer`] interface
//!
//! The receive and transmit ring logic lives in private submodules and is
//! reached only through [`DmaSerial`].
//!
//! # Example
//!
//! ```ignore
//! use pdc_serial_ring::driver::{Parity, SerialConfig};
//!
//! let config = SerialConfig::new()
//!     .with_baud_rate(57_600)
//!     .with_parity(Parity::Odd);
//! ```

// Submodules
pub mod comms;
pub mod config;
pub mod error;
pub mod interrupt;
pub mod serial;

mod rx;
mod tx;

// Re-exports for convenience
pub use comms::CommsBuffer;
pub use config::{Parity, PortId, SerialConfig};
pub use error::{
    ConfigError, ConfigResult, Error, IoError, IoResult, Result, RxError, RxResult, TxError,
    TxResult,
};
pub use interrupt::InterruptStatus;
pub use serial::DmaSerial;
