//! Lazy iteration over the populated slots of an aggregate.
//!
//! [`ErrorIter`] owns a copy of the aggregate's bits taken when it was
//! created; later appends to the aggregate do not affect it. Each step shifts
//! the copy down by one slot.
//!
//! ## End condition
//!
//! Iteration ends when the remaining bits are zero, not when the capacity is
//! reached. An empty slot below a populated one is yielded as a success
//! value, and trailing empty slots are never visited. A zero slot cannot be
//! told apart from an appended success value: never append the success value
//! into an aggregate.

use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::result::PackedResult;
use crate::storage::Storage;

/// Cursor over the results packed in an aggregate of storage `M`.
pub struct ErrorIter<M, R> {
    remaining: M,
    _result: PhantomData<fn() -> R>,
}

impl<M: Storage, R: PackedResult> ErrorIter<M, R> {
    /// Start iterating over a snapshot of `bits`.
    #[inline]
    pub const fn new(bits: M) -> Self {
        Self {
            remaining: bits,
            _result: PhantomData,
        }
    }

    /// The canonical end state (no bits remaining).
    #[inline]
    pub const fn end() -> Self {
        Self::new(M::ZERO)
    }

    /// True once nothing is left to yield.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.remaining.is_zero()
    }

    /// The result in the lowest remaining slot. Does not advance.
    #[inline]
    pub fn current(&self) -> R {
        R::from_raw(<R::Storage as Storage>::narrow(self.remaining.widen()))
    }

    /// Drop the lowest slot.
    #[inline]
    pub fn advance(&mut self) {
        let slot_bits = <R::Storage as Storage>::BITS;
        self.remaining = M::narrow(self.remaining.widen() >> slot_bits);
    }

    /// Bits not yet consumed.
    #[inline]
    pub fn remaining(&self) -> M {
        self.remaining
    }
}

impl<M: Storage, R: PackedResult> Iterator for ErrorIter<M, R> {
    type Item = R;

    #[inline]
    fn next(&mut self) -> Option<R> {
        if self.is_end() {
            return None;
        }
        let result = self.current();
        self.advance();
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let slot_bits = <R::Storage as Storage>::BITS;
        let used_bits = u128::BITS - self.remaining.widen().leading_zeros();
        let slots = used_bits.div_ceil(slot_bits) as usize;
        (slots, Some(slots))
    }
}

impl<M: Storage, R: PackedResult> ExactSizeIterator for ErrorIter<M, R> {}

impl<M: Storage, R: PackedResult> FusedIterator for ErrorIter<M, R> {}

impl<M: Storage, R> Clone for ErrorIter<M, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: Storage, R> Copy for ErrorIter<M, R> {}

impl<M: Storage, R> PartialEq for ErrorIter<M, R> {
    fn eq(&self, other: &Self) -> bool {
        self.remaining == other.remaining
    }
}

impl<M: Storage, R> Eq for ErrorIter<M, R> {}

impl<M: Storage, R: PackedResult> Default for ErrorIter<M, R> {
    fn default() -> Self {
        Self::end()
    }
}

impl<M: Storage, R> fmt::Debug for ErrorIter<M, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorIter")
            .field("remaining", &self.remaining)
            .finish()
    }
}
