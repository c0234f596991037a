//! `embedded-io` adapter
//!
//! [`SerialIo`] wraps a shared [`DmaSerial`] and a delay so the rings can be
//! driven through the blocking [`embedded_io::Read`] / [`embedded_io::Write`]
//! traits. Blocking here means polling: the adapter sleeps on the delay
//! between checks and gives up with [`IoError::Timeout`] after the configured
//! budget. Progress itself always comes from the interrupt handler.
//!
//! # Example
//!
//! ```ignore
//! use embedded_io::{Read, Write};
//! use pdc_serial_ring::integration::embedded_io::SerialIo;
//!
//! let mut io = SerialIo::new(serial, delay);
//! io.write_all(b"AT\r\n")?;
//! io.flush()?;
//!
//! let mut reply = [0u8; 16];
//! let n = io.read(&mut reply)?;
//! ```

use embedded_hal::delay::DelayNs;
use embedded_io::{ErrorType, Read, ReadReady, Write, WriteReady};

use crate::driver::error::{Error, IoError, Result};
use crate::driver::serial::DmaSerial;
use crate::hal::SerialDma;
use crate::internal::constants::{DEFAULT_FLUSH_TIMEOUT_US, FLUSH_POLL_INTERVAL_US};

/// Blocking byte-stream view of a [`DmaSerial`].
pub struct SerialIo<'s, 'a, H: SerialDma, D: DelayNs> {
    serial: &'s DmaSerial<'a, H>,
    delay: D,
    timeout_us: u32,
}

impl<'s, 'a, H: SerialDma, D: DelayNs> SerialIo<'s, 'a, H, D> {
    /// Wrap `serial`, waiting at most [`DEFAULT_FLUSH_TIMEOUT_US`] per call.
    pub fn new(serial: &'s DmaSerial<'a, H>, delay: D) -> Self {
        Self {
            serial,
            delay,
            timeout_us: DEFAULT_FLUSH_TIMEOUT_US,
        }
    }

    /// Set the per-call wait budget in microseconds.
    #[must_use]
    pub fn with_timeout_us(mut self, timeout_us: u32) -> Self {
        self.timeout_us = timeout_us;
        self
    }

    /// Underlying driver
    pub fn serial(&self) -> &'s DmaSerial<'a, H> {
        self.serial
    }

    /// Release the delay.
    pub fn release(self) -> D {
        self.delay
    }

    /// Poll `ready` until it returns true or the budget runs out.
    fn wait_until(&mut self, ready: impl Fn(&DmaSerial<'a, H>) -> bool) -> Result<()> {
        let mut waited = 0u32;
        while !ready(self.serial) {
            if waited >= self.timeout_us {
                return Err(IoError::Timeout.into());
            }
            self.delay.delay_us(FLUSH_POLL_INTERVAL_US);
            waited = waited.saturating_add(FLUSH_POLL_INTERVAL_US);
        }
        Ok(())
    }
}

impl<H: SerialDma, D: DelayNs> ErrorType for SerialIo<'_, '_, H, D> {
    type Error = Error;
}

impl<H: SerialDma, D: DelayNs> Read for SerialIo<'_, '_, H, D> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.wait_until(|serial| serial.unread_byte_count() > 0)?;
        Ok(self.serial.read(buf))
    }
}

impl<H: SerialDma, D: DelayNs> ReadReady for SerialIo<'_, '_, H, D> {
    fn read_ready(&mut self) -> Result<bool> {
        Ok(self.serial.unread_byte_count() > 0)
    }
}

impl<H: SerialDma, D: DelayNs> Write for SerialIo<'_, '_, H, D> {
    /// Queue as much of `buf` as currently fits.
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.wait_until(|serial| serial.free_space() > 0)?;
        // free_space is a lower bound even if the handler runs, so the chunk fits.
        let n = buf.len().min(self.serial.free_space());
        self.serial.enqueue_and_send(&buf[..n])?;
        Ok(n)
    }

    fn flush(&mut self) -> Result<()> {
        self.serial.flush(&mut self.delay, self.timeout_us)
    }
}

impl<H: SerialDma, D: DelayNs> WriteReady for SerialIo<'_, '_, H, D> {
    fn write_ready(&mut self) -> Result<bool> {
        Ok(self.serial.free_space() > 0)
    }
}
