//! Receive ring tracking.
//!
//! The receive DMA fills the ring on its own; software never stores a head.
//! Instead the head is derived from the transfer's remaining-byte counter
//! every time it is needed:
//!
//! ```text
//! head = (capacity - remaining) mod capacity
//! ```
//!
//! The consumer owns the tail. When the transfer is exhausted the interrupt
//! handler re-arms it over the same region, so the head wraps to 0 and keeps
//! climbing while the tail is left where the consumer put it.

use core::sync::atomic::{AtomicUsize, Ordering};

use crate::driver::error::{ConfigError, ConfigResult, RxError, RxResult};
use crate::hal::SerialDma;
use crate::internal::region::DmaRegion;
use crate::internal::ring::{advance, distance};

/// Consumer side of the receive ring.
pub(crate) struct RxTracker<'a> {
    region: DmaRegion<'a>,
    tail: AtomicUsize,
}

impl<'a> RxTracker<'a> {
    /// Wrap `buf` as a receive ring.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidCapacity`] when `buf` is empty or longer than
    /// `max_transfer` (the hardware counter range).
    pub(crate) fn new(buf: &'a mut [u8], max_transfer: usize) -> ConfigResult<Self> {
        if buf.is_empty() || buf.len() > max_transfer {
            return Err(ConfigError::InvalidCapacity);
        }
        Ok(Self {
            region: DmaRegion::new(buf),
            tail: AtomicUsize::new(0),
        })
    }

    #[inline(always)]
    pub(crate) const fn capacity(&self) -> usize {
        self.region.capacity()
    }

    /// Index the hardware will fill next, given its remaining count.
    #[inline(always)]
    pub(crate) fn head(&self, remaining: usize) -> usize {
        let cap = self.capacity();
        (cap - remaining.min(cap)) % cap
    }

    #[inline(always)]
    pub(crate) fn tail(&self) -> usize {
        self.tail.load(Ordering::Acquire)
    }

    /// Bytes received but not yet read.
    pub(crate) fn unread(&self, remaining: usize) -> usize {
        distance(self.head(remaining), self.tail(), self.capacity())
    }

    /// Pop one byte.
    ///
    /// # Errors
    ///
    /// [`RxError::Empty`] when nothing is unread; the tail is not moved.
    pub(crate) fn read_next_byte(&self, remaining: usize) -> RxResult<u8> {
        let tail = self.tail();
        if distance(self.head(remaining), tail, self.capacity()) == 0 {
            return Err(RxError::Empty);
        }
        // SAFETY: tail < capacity and the byte sits behind the DMA head.
        let byte = unsafe { self.region.read_at(tail) };
        self.tail
            .store(advance(tail, 1, self.capacity()), Ordering::Release);
        Ok(byte)
    }

    /// Drain up to `buf.len()` unread bytes into `buf`.
    ///
    /// Uses a single counter snapshot, so bytes arriving during the copy are
    /// left for the next call.
    pub(crate) fn read(&self, remaining: usize, buf: &mut [u8]) -> usize {
        let cap = self.capacity();
        let mut tail = self.tail();
        let count = distance(self.head(remaining), tail, cap).min(buf.len());
        for slot in &mut buf[..count] {
            // SAFETY: every index visited lies in [tail, head) of the snapshot.
            *slot = unsafe { self.region.read_at(tail) };
            tail = advance(tail, 1, cap);
        }
        self.tail.store(tail, Ordering::Release);
        count
    }

    /// Forget everything received so far.
    pub(crate) fn reset(&self) {
        self.tail.store(0, Ordering::Release);
    }

    /// Point the receive DMA at the whole ring again.
    ///
    /// Idempotent: arming twice in a row leaves the same base and count.
    pub(crate) fn arm<H: SerialDma>(&self, hal: &H) {
        // SAFETY: the region is borrowed for 'a and only read behind the
        // derived head, which the hardware has already passed.
        unsafe { hal.arm_receive(self.region.base(), self.capacity()) };
    }
}

// =============================================================================
// Tests
// =============================================================================
