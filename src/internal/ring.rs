//! Modular index arithmetic shared by the receive and transmit rings.
//!
//! Every function here is total for `index < capacity`, `capacity > 0`.

/// Advance `index` by `n` positions, wrapping at `capacity`.
#[inline(always)]
pub(crate) const fn advance(index: usize, n: usize, capacity: usize) -> usize {
    (index + n) % capacity
}

/// Number of positions from `tail` forward to `head`.
///
/// Tolerates `head < tail` by adding `capacity` before the modulo, so the
/// result is always in `[0, capacity)`.
#[inline(always)]
pub(crate) const fn distance(head: usize, tail: usize, capacity: usize) -> usize {
    (head + capacity - tail) % capacity
}

/// Split a run of `len` bytes starting at `start` into the part that fits
/// before the physical end of the buffer and the part that wraps to index 0.
///
/// Returns `(first, second)` with `first + second == len`. `second` is zero
/// when the run is contiguous.
#[inline(always)]
pub(crate) const fn split_run(start: usize, len: usize, capacity: usize) -> (usize, usize) {
    if start + len > capacity {
        let first = capacity - start;
        (first, len - first)
    } else {
        (len, 0)
    }
}

/// Length of the next contiguous run of `pending` bytes starting at `tail`.
///
/// When the pending bytes wrap (`head < tail`) only the part up to the end
/// of the buffer is returned; the remainder is picked up by a later call.
#[inline(always)]
pub(crate) const fn contiguous_run(
    head: usize,
    tail: usize,
    pending: usize,
    capacity: usize,
) -> usize {
    if head < tail { capacity - tail } else { pending }
}

// =============================================================================
// Tests
// =============================================================================
