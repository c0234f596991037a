//! Caller-supplied memory region shared with the DMA engine.

use core::marker::PhantomData;
use core::ptr::NonNull;

/// A fixed byte region borrowed for `'a` and handed to the DMA engine.
///
/// The driver keeps only a raw pointer so the region can be written from
/// `&self` methods while the hardware reads or writes other parts of it.
/// Callers of the `unsafe` accessors guarantee that the range they touch is
/// not concurrently owned by an armed transfer.
pub(crate) struct DmaRegion<'a> {
    ptr: NonNull<u8>,
    len: usize,
    _borrow: PhantomData<&'a mut [u8]>,
}

impl<'a> DmaRegion<'a> {
    /// Take over `buf` for the lifetime of the region.
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        let len = buf.len();
        Self {
            ptr: NonNull::from(buf).cast(),
            len,
            _borrow: PhantomData,
        }
    }

    /// Region capacity in bytes.
    #[inline(always)]
    pub(crate) const fn capacity(&self) -> usize {
        self.len
    }

    /// Address of `index` within the region, for programming the DMA.
    #[inline(always)]
    pub(crate) fn addr_of(&self, index: usize) -> *mut u8 {
        debug_assert!(index < self.len);
        // SAFETY: index is within the region (asserted in debug, guaranteed
        // by the ring arithmetic in release).
        unsafe { self.ptr.as_ptr().add(index) }
    }

    /// Base address of the region.
    #[inline(always)]
    pub(crate) fn base(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// Copy `data` into the region starting at `index`.
    ///
    /// # Safety
    ///
    /// `[index, index + data.len())` must lie inside the region and must not
    /// be part of a transfer currently armed on the hardware.
    #[inline]
    pub(crate) unsafe fn write_at(&self, index: usize, data: &[u8]) {
        debug_assert!(index + data.len() <= self.len);
        // SAFETY: bounds and exclusivity are guaranteed by the caller.
        unsafe {
            core::ptr::copy_nonoverlapping(data.as_ptr(), self.ptr.as_ptr().add(index), data.len());
        }
    }

    /// Read the byte at `index`.
    ///
    /// # Safety
    ///
    /// `index` must be inside the region and already written by the DMA.
    #[inline]
    pub(crate) unsafe fn read_at(&self, index: usize) -> u8 {
        debug_assert!(index < self.len);
        // SAFETY: bounds are guaranteed by the caller. The DMA writes this
        // memory behind the compiler's back, so read it volatile.
        unsafe { core::ptr::read_volatile(self.ptr.as_ptr().add(index)) }
    }
}

// SAFETY: the region is only reached through the driver, which serializes
// mainline access against the interrupt handler (see `driver::tx`).
unsafe impl Send for DmaRegion<'_> {}
// SAFETY: as above.
unsafe impl Sync for DmaRegion<'_> {}
