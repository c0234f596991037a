//! Error types for the DMA serial ring driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Initialization and configuration failures
//! - [`RxError`]: Receive ring contract violations
//! - [`TxError`]: Transmit ring contract violations
//! - [`IoError`]: Runtime waits that did not complete
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by most driver methods.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration and initialization errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Buffer capacity is zero or exceeds the DMA counter range
    InvalidCapacity,
    /// Baud rate is zero or cannot be produced from the peripheral clock
    InvalidBaudRate,
    /// Another driver instance is already bound to the port
    PortInUse,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidCapacity => "invalid buffer capacity",
            ConfigError::InvalidBaudRate => "invalid baud rate",
            ConfigError::PortInUse => "port already bound",
        }
    }
}

// =============================================================================
// Receive Errors
// =============================================================================

/// Receive ring errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxError {
    /// Read attempted with no unread bytes
    Empty,
}

impl core::fmt::Display for RxError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RxError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            RxError::Empty => "no unread bytes",
        }
    }
}

// =============================================================================
// Transmit Errors
// =============================================================================

/// Transmit ring errors
///
/// Both variants leave the ring untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxError {
    /// Packet is longer than the whole transmit ring
    PacketTooLarge,
    /// Packet would overwrite bytes not yet sent
    InsufficientSpace,
}

impl core::fmt::Display for TxError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TxError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TxError::PacketTooLarge => "packet larger than transmit buffer",
            TxError::InsufficientSpace => "insufficient transmit buffer space",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Runtime wait errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// Operation timed out
    Timeout,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::Timeout => "operation timed out",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match serial.enqueue_and_send(&packet) {
///     Err(Error::Tx(TxError::InsufficientSpace)) => { /* retry later */ }
///     Err(Error::Tx(TxError::PacketTooLarge)) => { /* caller bug */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// Receive error
    Rx(RxError),
    /// Transmit error
    Tx(TxError),
    /// I/O error
    Io(IoError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Rx(e) => write!(f, "rx: {}", e.as_str()),
            Error::Tx(e) => write!(f, "tx: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
        }
    }
}

// From impls for automatic conversion
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<RxError> for Error {
    fn from(e: RxError) -> Self {
        Error::Rx(e)
    }
}

impl From<TxError> for Error {
    fn from(e: TxError) -> Self {
        Error::Tx(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

#[cfg(feature = "embedded-io")]
impl embedded_io::Error for Error {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            Error::Config(_) | Error::Tx(TxError::PacketTooLarge) => {
                embedded_io::ErrorKind::InvalidInput
            }
            Error::Tx(TxError::InsufficientSpace) => embedded_io::ErrorKind::OutOfMemory,
            Error::Rx(RxError::Empty) => embedded_io::ErrorKind::Other,
            Error::Io(IoError::Timeout) => embedded_io::ErrorKind::TimedOut,
        }
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for receive operations
pub type RxResult<T> = core::result::Result<T, RxError>;

/// Result type alias for transmit operations
pub type TxResult<T> = core::result::Result<T, TxError>;

/// Result type alias for I/O operations
pub type IoResult<T> = core::result::Result<T, IoError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;

    #[test]
    fn config_error_as_str_non_empty() {
        let variants = [
            ConfigError::InvalidCapacity,
            ConfigError::InvalidBaudRate,
            ConfigError::PortInUse,
        ];

        for variant in variants {
            let s = variant.as_str();
            assert!(!s.is_empty(), "ConfigError::{variant:?} has empty string");
        }
    }

    #[test]
    fn config_error_display() {
        let display = format!("{}", ConfigError::PortInUse);
        assert_eq!(display, "port already bound");
    }

    #[test]
    fn rx_error_display() {
        let display = format!("{}", RxError::Empty);
        assert_eq!(display, "no unread bytes");
    }

    #[test]
    fn tx_error_as_str_non_empty() {
        for variant in [TxError::PacketTooLarge, TxError::InsufficientSpace] {
            assert!(!variant.as_str().is_empty(), "TxError::{variant:?} has empty string");
        }
    }

    #[test]
    fn tx_error_equality() {
        assert_eq!(TxError::PacketTooLarge, TxError::PacketTooLarge);
        assert_ne!(TxError::PacketTooLarge, TxError::InsufficientSpace);
    }

    #[test]
    fn io_error_display() {
        let display = format!("{}", IoError::Timeout);
        assert_eq!(display, "operation timed out");
    }

    #[test]
    fn error_from_domain_errors() {
        assert_eq!(Error::from(ConfigError::InvalidCapacity), Error::Config(ConfigError::InvalidCapacity));
        assert_eq!(Error::from(RxError::Empty), Error::Rx(RxError::Empty));
        assert_eq!(Error::from(TxError::InsufficientSpace), Error::Tx(TxError::InsufficientSpace));
        assert_eq!(Error::from(IoError::Timeout), Error::Io(IoError::Timeout));
    }

    #[test]
    fn error_display_prefixes_domain() {
        let display = format!("{}", Error::Tx(TxError::PacketTooLarge));
        assert!(display.starts_with("tx:"));
        assert!(display.contains("packet"));

        let display = format!("{}", Error::Rx(RxError::Empty));
        assert!(display.starts_with("rx:"));

        let display = format!("{}", Error::Config(ConfigError::InvalidBaudRate));
        assert!(display.contains("config"));
        assert!(display.contains("baud"));
    }

    #[test]
    fn result_type_works() {
        fn test_fn() -> Result<u32> {
            let tx: TxResult<()> = Err(TxError::PacketTooLarge);
            tx?;
            Ok(42)
        }

        assert_eq!(test_fn(), Err(Error::Tx(TxError::PacketTooLarge)));
    }

    #[test]
    fn config_result_type_works() {
        fn test_fn() -> ConfigResult<u32> {
            Err(ConfigError::InvalidCapacity)
        }

        assert!(test_fn().is_err());
    }

    #[cfg(feature = "embedded-io")]
    #[test]
    fn embedded_io_kinds() {
        use embedded_io::{Error as _, ErrorKind};

        assert_eq!(Error::Rx(RxError::Empty).kind(), ErrorKind::Other);
        assert_eq!(Error::Tx(TxError::InsufficientSpace).kind(), ErrorKind::OutOfMemory);
        assert_eq!(Error::Tx(TxError::PacketTooLarge).kind(), ErrorKind::InvalidInput);
        assert_eq!(Error::Config(ConfigError::PortInUse).kind(), ErrorKind::InvalidInput);
        assert_eq!(Error::Io(IoError::Timeout).kind(), ErrorKind::TimedOut);
    }
}
