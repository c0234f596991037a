//! Transmit ring management.
//!
//! The producer writes at `head`, the hardware drains from `tail`. A packet
//! that crosses the end of the ring is copied in two segments; only the
//! first is armed immediately and the completion interrupt picks up the rest.
//!
//! # Shared state
//!
//! | Field         | Written by                 | Read by        |
//! |---------------|----------------------------|----------------|
//! | `head`        | enqueue                    | enqueue, ISR   |
//! | `tail`        | enqueue (preload), ISR     | enqueue, ISR   |
//! | `in_progress` | enqueue, ISR               | enqueue, ISR   |
//! | `in_flight`   | enqueue, ISR               | enqueue, ISR   |
//!
//! Every multi-step update from the mainline runs with the port's interrupt
//! line masked, so the handler never observes a half-finished enqueue. Only
//! atomic loads and stores are used; no compare-and-swap is required.
//!
//! # Ring occupancy
//!
//! Bytes in `[tail - in_flight, tail)` are being read by the DMA and bytes in
//! `[tail, head)` are waiting. Enqueue only writes outside both ranges, so
//! `unsent + in_flight <= capacity` and `unsent < capacity` always hold: the
//! pending bytes never span more than one wrap and `head == tail` is never
//! ambiguous.

use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::driver::error::{ConfigError, ConfigResult, TxError, TxResult};
use crate::hal::SerialDma;
use crate::internal::region::DmaRegion;
use crate::internal::ring::{advance, contiguous_run, distance, split_run};

/// Producer side of the transmit ring.
pub(crate) struct TxManager<'a> {
    region: DmaRegion<'a>,
    head: AtomicUsize,
    tail: AtomicUsize,
    in_progress: AtomicBool,
    in_flight: AtomicUsize,
}

impl<'a> TxManager<'a> {
    /// Wrap `buf` as a transmit ring.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidCapacity`] when `buf` is empty or longer than
    /// `max_transfer`.
    pub(crate) fn new(buf: &'a mut [u8], max_transfer: usize) -> ConfigResult<Self> {
        if buf.is_empty() || buf.len() > max_transfer {
            return Err(ConfigError::InvalidCapacity);
        }
        Ok(Self {
            region: DmaRegion::new(buf),
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            in_progress: AtomicBool::new(false),
            in_flight: AtomicUsize::new(0),
        })
    }

    #[inline(always)]
    pub(crate) const fn capacity(&self) -> usize {
        self.region.capacity()
    }

    #[inline(always)]
    pub(crate) fn head(&self) -> usize {
        self.head.load(Ordering::Acquire)
    }

    #[inline(always)]
    pub(crate) fn tail(&self) -> usize {
        self.tail.load(Ordering::Acquire)
    }

    /// Bytes queued but not yet handed to the hardware.
    pub(crate) fn unsent(&self) -> usize {
        distance(self.head(), self.tail(), self.capacity())
    }

    /// A transfer is armed or about to be re-armed.
    #[inline(always)]
    pub(crate) fn is_transmitting(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// Bytes that can be enqueued without touching unsent or in-flight data.
    ///
    /// Read outside the interrupt mask the value is a lower bound. `tail` is
    /// loaded before `in_flight`: a completion in between moves a run from
    /// unsent to in flight, so the stale tail still counts it once.
    pub(crate) fn free_space(&self) -> usize {
        let tail = self.tail();
        let in_flight = self.in_flight.load(Ordering::Acquire);
        self.free_space_from(tail, in_flight)
    }

    /// Free space given a `tail` and `in_flight` sampled in that order.
    #[inline(always)]
    fn free_space_from(&self, tail: usize, in_flight: usize) -> usize {
        let unsent = distance(self.head(), tail, self.capacity());
        self.capacity().saturating_sub(unsent + in_flight)
    }

    /// Return to the empty, idle state.
    ///
    /// Must not be called while a transfer is armed.
    pub(crate) fn reset(&self) {
        self.head.store(0, Ordering::Release);
        self.tail.store(0, Ordering::Release);
        self.in_flight.store(0, Ordering::Release);
        self.in_progress.store(false, Ordering::Release);
    }

    /// Copy `data` into the ring and start sending if the line is idle.
    ///
    /// # Errors
    ///
    /// - [`TxError::PacketTooLarge`] if `data` is longer than the ring
    /// - [`TxError::InsufficientSpace`] if `data` does not fit in
    ///   [`free_space`](Self::free_space)
    ///
    /// The ring is left untouched on error.
    pub(crate) fn enqueue<H: SerialDma>(&self, hal: &H, data: &[u8]) -> TxResult<()> {
        if data.is_empty() {
            return Ok(());
        }
        if data.len() > self.capacity() {
            return Err(TxError::PacketTooLarge);
        }

        hal.mask_interrupt_line();
        let result = self.enqueue_masked(hal, data);
        hal.unmask_interrupt_line();
        result
    }

    /// Body of [`enqueue`](Self::enqueue); caller holds the interrupt mask.
    fn enqueue_masked<H: SerialDma>(&self, hal: &H, data: &[u8]) -> TxResult<()> {
        let cap = self.capacity();
        if data.len() > self.free_space() {
            return Err(TxError::InsufficientSpace);
        }

        let start = self.head.load(Ordering::Acquire);
        let (first, second) = split_run(start, data.len(), cap);

        // SAFETY: both segments lie inside free space, which neither the
        // armed transfer nor the unsent bytes occupy.
        unsafe {
            self.region.write_at(start, &data[..first]);
            if second > 0 {
                self.region.write_at(0, &data[first..]);
            }
        }
        self.head
            .store(advance(start, data.len(), cap), Ordering::Release);

        if !self.in_progress.load(Ordering::Acquire) {
            // Idle implies tail == start. Preload it past the first segment
            // so the completion handler sees only what is left.
            self.in_progress.store(true, Ordering::Release);
            self.tail.store(advance(start, first, cap), Ordering::Release);
            self.in_flight.store(first, Ordering::Release);
            // SAFETY: [start, start + first) is inside the region and now
            // belongs to the hardware until completion.
            unsafe { hal.arm_transmit(self.region.addr_of(start), first) };
            hal.enable_tx_empty_interrupt();
        }
        Ok(())
    }

    /// Handle transmit-empty from interrupt context.
    ///
    /// Either arms the next contiguous run or, with nothing left, returns to
    /// idle and silences the source.
    pub(crate) fn on_transmit_complete<H: SerialDma>(&self, hal: &H) {
        self.in_flight.store(0, Ordering::Release);

        let cap = self.capacity();
        let head = self.head();
        let tail = self.tail();
        let unsent = distance(head, tail, cap);

        if unsent == 0 {
            self.in_progress.store(false, Ordering::Release);
            hal.disable_tx_empty_interrupt();
            return;
        }

        let run = contiguous_run(head, tail, unsent, cap);
        // SAFETY: [tail, tail + run) holds queued bytes and ends at or before
        // the physical end of the region.
        unsafe { hal.arm_transmit(self.region.addr_of(tail), run) };
        self.tail.store(advance(tail, run, cap), Ordering::Release);
        self.in_flight.store(run, Ordering::Release);
    }
}

// =============================================================================
// Tests
// =============================================================================
