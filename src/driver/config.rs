//! Configuration types for the DMA serial ring driver

use super::error::{ConfigError, ConfigResult};
use crate::internal::constants::{DEFAULT_BAUD_RATE, MAX_PORTS};

/// UART parity selection
///
/// Discriminants match the SAM `UART_MR.PAR` field encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum Parity {
    /// Even parity
    Even = 0,
    /// Odd parity
    Odd = 1,
    /// Parity bit forced to 0
    Space = 2,
    /// Parity bit forced to 1
    Mark = 3,
    /// No parity
    #[default]
    None = 4,
}

impl Parity {
    /// Value for the mode register parity field
    #[must_use]
    pub const fn to_field(self) -> u32 {
        self as u32
    }
}

/// UART port selector
///
/// Identifies the hardware instance and its slot in the interrupt registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortId {
    /// UART0
    Uart0,
    /// UART1
    Uart1,
}

impl PortId {
    /// All ports, in registry order
    pub const ALL: [PortId; MAX_PORTS] = [PortId::Uart0, PortId::Uart1];

    /// Registry slot for this port
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            PortId::Uart0 => 0,
            PortId::Uart1 => 1,
        }
    }
}

/// Serial line configuration
///
/// # Example
///
/// ```ignore
/// let config = SerialConfig::new()
///     .with_baud_rate(57_600)
///     .with_parity(Parity::Even);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baud_rate: u32,
    /// Parity mode
    pub parity: Parity,
}

impl SerialConfig {
    /// 115200 baud, no parity
    #[must_use]
    pub const fn new() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            parity: Parity::None,
        }
    }

    /// Set the baud rate
    #[must_use]
    pub const fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set the parity mode
    #[must_use]
    pub const fn with_parity(mut self, parity: Parity) -> Self {
        self.parity = parity;
        self
    }

    /// Check the configuration for values no backend can honour.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaudRate`] for a zero baud rate.
    pub const fn validate(&self) -> ConfigResult<()> {
        if self.baud_rate == 0 {
            return Err(ConfigError::InvalidBaudRate);
        }
        Ok(())
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
