//! Placement policies: what `append` does with a new result.
//!
//! A policy is a pure function `(container, new result) -> container`. It
//! sees nothing but the two raw values and the slot geometry derived from
//! their widths.
//!
//! ## Capacity overflow
//!
//! Neither policy fails when the aggregate is full:
//! - [`AppendAtFirstFree`] drops the new result and leaves the container
//!   unchanged.
//! - [`ReplaceTopmost`] overwrites the last slot.
//!
//! Both emit a `trace` event so dropped diagnostics are visible when a
//! subscriber is installed.

use tracing::trace;

use crate::bits::{slot, with_slot};
use crate::storage::Storage;

/// Strategy for placing a raw result into an aggregate container.
pub trait PlacementPolicy {
    /// Place `result` into `container`, returning the new container.
    fn place<M: Storage, U: Storage>(container: M, result: U) -> M;
}

/// Index of the first empty slot among the first `limit` slots.
#[inline]
fn first_free_slot(container: u128, slot_bits: u32, limit: u32) -> Option<u32> {
    (0..limit).find(|&index| slot(container, slot_bits, index) == 0)
}

/// Fill the lowest empty slot; drop the result when every slot is taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppendAtFirstFree;

impl PlacementPolicy for AppendAtFirstFree {
    #[inline]
    fn place<M: Storage, U: Storage>(container: M, result: U) -> M {
        let capacity = M::BITS / U::BITS;
        let bits = container.widen();
        match first_free_slot(bits, U::BITS, capacity) {
            Some(index) => M::narrow(with_slot(bits, U::BITS, index, result.widen())),
            None => {
                trace!(capacity, dropped = ?result, "aggregate full, result dropped");
                container
            }
        }
    }
}

/// Fill the lowest empty slot below the last one; once those are taken,
/// every new result overwrites the last slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaceTopmost;

impl PlacementPolicy for ReplaceTopmost {
    #[inline]
    fn place<M: Storage, U: Storage>(container: M, result: U) -> M {
        let capacity = M::BITS / U::BITS;
        let top = capacity - 1;
        let bits = container.widen();
        let index = first_free_slot(bits, U::BITS, top).unwrap_or_else(|| {
            let previous = slot(bits, U::BITS, top);
            if previous != 0 {
                trace!(slot = top, replaced = ?previous, "topmost result replaced");
            }
            top
        });
        M::narrow(with_slot(bits, U::BITS, index, result.widen()))
    }
}
