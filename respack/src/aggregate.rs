//! Aggregate results: several packed results in one wider integer.
//!
//! An [`AggregateResult<M, R, P>`] partitions its storage `M` into
//! `CAPACITY = bits(M) / bits(R)` equal slots. Slot 0 holds the low bits,
//! slot `CAPACITY - 1` the high bits, and an all-zero slot is empty. New
//! results go through the placement policy `P`
//! ([`AppendAtFirstFree`] by default).
//!
//! ## Capacity
//!
//! Appending to a full aggregate never fails. The default policy silently
//! drops the new result; [`ReplaceTopmost`](crate::placement::ReplaceTopmost)
//! overwrites the last slot. Bounded storage is the point: no allocation, no
//! panic.
//!
//! ```
//! use respack::prelude::*;
//!
//! result_category! {
//!     pub struct Layer: 4;
//! }
//! result_type!(pub LayerResult: u8 => Layer);
//! aggregate_result_type!(pub Chain: u16 => LayerResult);
//!
//! let low = LayerResult::make((Layer(1),), 3);
//! let high = LayerResult::make((Layer(2),), 1);
//!
//! let chain = Chain::from(low) << high;
//! assert_eq!(chain.result_at(0), low);
//! assert_eq!(chain.result_at(1), high);
//! assert_eq!(chain.iterate_errors().count(), 2);
//! assert!(!chain.is_success());
//! ```

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::ops::{Shl, ShlAssign};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bits;
use crate::consts::MIN_AGGREGATE_CAPACITY;
use crate::iter::ErrorIter;
use crate::placement::{AppendAtFirstFree, PlacementPolicy};
use crate::result::PackedResult;
use crate::storage::Storage;

/// A fixed-capacity sequence of results packed into storage `M`.
#[repr(transparent)]
pub struct AggregateResult<M, R, P = AppendAtFirstFree> {
    bits: M,
    _marker: PhantomData<fn() -> (R, P)>,
}

impl<M: Storage, R: PackedResult, P: PlacementPolicy> AggregateResult<M, R, P> {
    /// Number of slots. Evaluating this fails to compile if `M` cannot hold
    /// at least two results.
    pub const CAPACITY: u32 = {
        let capacity = M::BITS / <R::Storage as Storage>::BITS;
        assert!(
            capacity >= MIN_AGGREGATE_CAPACITY,
            "the aggregate result should have space for at least two results"
        );
        capacity
    };

    /// The empty (successful) aggregate.
    pub const EMPTY: Self = Self::from_raw(M::ZERO);

    /// An empty aggregate.
    #[inline]
    pub fn new() -> Self {
        let _ = Self::CAPACITY;
        Self::EMPTY
    }

    /// Reinterpret raw container bits. No validation.
    #[inline]
    pub const fn from_raw(bits: M) -> Self {
        Self {
            bits,
            _marker: PhantomData,
        }
    }

    /// Build from a sequence, appending each result in order through the
    /// placement policy.
    pub fn from_results<I: IntoIterator<Item = R>>(results: I) -> Self {
        let mut aggregate = Self::new();
        aggregate.extend(results);
        aggregate
    }

    /// The raw container bits.
    #[inline]
    pub fn raw(&self) -> M {
        self.bits
    }

    /// Place `result` according to the policy.
    ///
    /// Never fails: a full aggregate drops or replaces per the policy.
    #[inline]
    pub fn append(&mut self, result: R) {
        let _ = Self::CAPACITY;
        self.bits = P::place(self.bits, result.raw());
    }

    /// The result stored in slot `index`. An empty slot reads as success.
    ///
    /// # Panics
    ///
    /// Panics if `index >= CAPACITY`. Use [`get`](Self::get) for a checked
    /// lookup.
    #[inline]
    pub fn result_at(&self, index: usize) -> R {
        match self.get(index) {
            Some(result) => result,
            None => panic!(
                "slot index {index} out of range for aggregate of capacity {}",
                Self::CAPACITY
            ),
        }
    }

    /// The result stored in slot `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<R> {
        if index >= Self::CAPACITY as usize {
            return None;
        }
        let slot_bits = <R::Storage as Storage>::BITS;
        let raw = bits::slot(self.bits.widen(), slot_bits, index as u32);
        Some(R::from_raw(<R::Storage as Storage>::narrow(raw)))
    }

    /// True iff the container is all zero (nothing appended).
    ///
    /// Distinct from the single-result
    /// [`ResultCode::is_success`](crate::result::ResultCode::is_success).
    #[inline]
    pub fn is_success(&self) -> bool {
        self.bits.is_zero()
    }

    /// True iff no slot is empty. A further append is dropped (default
    /// policy) or replaces the last slot.
    pub fn is_full(&self) -> bool {
        let slot_bits = <R::Storage as Storage>::BITS;
        let bits = self.bits.widen();
        (0..Self::CAPACITY).all(|index| bits::slot(bits, slot_bits, index) != 0)
    }

    /// Number of results [`iterate_errors`](Self::iterate_errors) yields.
    #[inline]
    pub fn error_count(&self) -> usize {
        self.iterate_errors().len()
    }

    /// Iterate over a snapshot of the stored results, slot 0 first.
    #[inline]
    pub fn iterate_errors(&self) -> ErrorIter<M, R> {
        ErrorIter::new(self.bits)
    }

    /// Copy the iterated results into a fixed-capacity vector, keeping the
    /// first `N`.
    pub fn collect_errors<const N: usize>(&self) -> heapless::Vec<R, N> {
        let mut errors = heapless::Vec::new();
        for result in self.iterate_errors() {
            if errors.push(result).is_err() {
                break;
            }
        }
        errors
    }
}

/// True iff `aggregate` holds no results.
///
/// The aggregate counterpart of [`is_success`](crate::result::is_success).
#[inline]
pub fn is_aggregate_success<M, R, P>(aggregate: &AggregateResult<M, R, P>) -> bool
where
    M: Storage,
    R: PackedResult,
    P: PlacementPolicy,
{
    aggregate.is_success()
}

impl<M: Storage, R: PackedResult, P: PlacementPolicy> From<R> for AggregateResult<M, R, P> {
    /// Store `result` directly as slot 0.
    #[inline]
    fn from(result: R) -> Self {
        let _ = Self::CAPACITY;
        Self::from_raw(M::narrow(result.raw().widen()))
    }
}

impl<M: Storage, R: PackedResult, P: PlacementPolicy> FromIterator<R> for AggregateResult<M, R, P> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::from_results(iter)
    }
}

impl<M: Storage, R: PackedResult, P: PlacementPolicy> Extend<R> for AggregateResult<M, R, P> {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        for result in iter {
            self.append(result);
        }
    }
}

impl<M: Storage, R: PackedResult, P: PlacementPolicy> Shl<R> for AggregateResult<M, R, P> {
    type Output = Self;

    /// `aggregate << result` appends and returns the aggregate, so calls
    /// chain: `errors << a << b`.
    #[inline]
    fn shl(mut self, result: R) -> Self {
        self.append(result);
        self
    }
}

impl<M: Storage, R: PackedResult, P: PlacementPolicy> ShlAssign<R> for AggregateResult<M, R, P> {
    #[inline]
    fn shl_assign(&mut self, result: R) {
        self.append(result);
    }
}

impl<'a, M: Storage, R: PackedResult, P: PlacementPolicy> IntoIterator for &'a AggregateResult<M, R, P> {
    type Item = R;
    type IntoIter = ErrorIter<M, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iterate_errors()
    }
}

// Manual impls: `R` and `P` are only markers.

impl<M: Storage, R, P> Clone for AggregateResult<M, R, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: Storage, R, P> Copy for AggregateResult<M, R, P> {}

impl<M: Storage, R, P> PartialEq for AggregateResult<M, R, P> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<M: Storage, R, P> Eq for AggregateResult<M, R, P> {}

impl<M: Storage, R, P> Hash for AggregateResult<M, R, P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl<M: Storage, R: PackedResult, P: PlacementPolicy> Default for AggregateResult<M, R, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Storage, R: PackedResult, P: PlacementPolicy> fmt::Debug for AggregateResult<M, R, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iterate_errors()).finish()
    }
}

impl<M: Storage + Serialize, R, P> Serialize for AggregateResult<M, R, P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bits.serialize(serializer)
    }
}

impl<'de, M: Storage + Deserialize<'de>, R, P> Deserialize<'de> for AggregateResult<M, R, P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        M::deserialize(deserializer).map(|bits| Self {
            bits,
            _marker: PhantomData,
        })
    }
}
