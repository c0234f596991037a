//! Transport-agnostic byte buffer interface.
//!
//! Protocol code that frames and parses packets only needs to pull bytes in
//! and push packets out. Writing it against [`CommsBuffer`] keeps it usable
//! over any transport that buffers in both directions.

use super::error::Result;
use super::serial::DmaSerial;
use crate::hal::SerialDma;

/// Buffered, non-blocking byte transport.
pub trait CommsBuffer {
    /// Take the oldest unread byte.
    ///
    /// # Errors
    ///
    /// Fails when nothing is unread; no stale byte is ever returned.
    fn latest_byte(&self) -> Result<u8>;

    /// Number of bytes waiting to be read.
    fn unread_bytes(&self) -> usize;

    /// Queue a whole packet for transmission without blocking.
    ///
    /// # Errors
    ///
    /// Fails without queuing anything when the packet cannot be accepted.
    fn send_packet(&self, packet: &[u8]) -> Result<()>;
}

impl<H: SerialDma> CommsBuffer for DmaSerial<'_, H> {
    #[inline]
    fn latest_byte(&self) -> Result<u8> {
        self.read_next_byte()
    }

    #[inline]
    fn unread_bytes(&self) -> usize {
        self.unread_byte_count()
    }

    #[inline]
    fn send_packet(&self, packet: &[u8]) -> Result<()> {
        self.enqueue_and_send(packet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::config::SerialConfig;
    use crate::driver::error::{Error, RxError};
    use crate::testing::MockSerialDma;

    /// Echo everything unread back, the way a line-protocol layer would.
    fn echo<C: CommsBuffer>(comms: &C) -> Result<usize> {
        let mut packet = [0u8; 16];
        let mut len = 0;
        while comms.unread_bytes() > 0 && len < packet.len() {
            packet[len] = comms.latest_byte()?;
            len += 1;
        }
        comms.send_packet(&packet[..len])?;
        Ok(len)
    }

    #[test]
    fn generic_code_drives_serial_ring() {
        let mock = MockSerialDma::new();
        let mut rx = [0u8; 8];
        let mut tx = [0u8; 8];
        let serial = DmaSerial::new(&mock, &mut rx, &mut tx).unwrap();
        serial.init(&SerialConfig::default()).unwrap();

        mock.receive(b"ping");
        assert_eq!(echo(&serial), Ok(4));
        mock.complete_transmit();
        assert_eq!(mock.wire(), b"ping");
        assert_eq!(serial.unread_bytes(), 0);
        assert_eq!(serial.latest_byte(), Err(Error::Rx(RxError::Empty)));
    }
}
