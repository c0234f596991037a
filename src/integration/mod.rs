//! External Stack Integrations
//!
//! - **embedded-io** (`embedded_io`): Blocking `Read`/`Write` over the rings
//!   - Implements `embedded_io::{Read, ReadReady, Write, WriteReady}`
//!   - Requires `embedded-io` feature
//!
//! # Example
//!
//! ```ignore
//! use embedded_io::Write;
//! use pdc_serial_ring::integration::embedded_io::SerialIo;
//!
//! let mut io = SerialIo::new(serial, delay);
//! write!(io, "tick {}\r\n", n)?;
//! ```

#[cfg(feature = "embedded-io")]
pub mod embedded_io;
