//! Category values: one classification level of a result code.
//!
//! A category is a fixed-width unsigned field (e.g. "subsystem"). The width
//! is carried by the type, not the value, and two categories of equal width
//! but different meaning are distinct types.
//!
//! Categories come from two places:
//! - [`CategoryValue<Tag, W>`] for manual declaration with a marker tag.
//! - [`result_category!`](crate::result_category) newtypes, which are their
//!   own tag.
//!
//! Values are never range-checked. High bits beyond the declared width are
//! dropped when the category is packed into a result.

use core::any::type_name;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use crate::consts::MAX_CATEGORY_BITS;

/// One classification dimension of a packed result.
pub trait Category: Copy + Eq + fmt::Debug {
    /// Field width in bits (`1..=64`).
    const WIDTH: u32;

    /// Build from a raw value. No range check.
    fn from_value(value: u64) -> Self;

    /// The raw value, as supplied on construction.
    fn value(self) -> u64;
}

/// Compile-time check of a category width. Used by every `Category` impl.
#[doc(hidden)]
pub const fn checked_width(width: u32) -> u32 {
    assert!(width >= 1, "category width must be at least one bit");
    assert!(width <= MAX_CATEGORY_BITS, "category wider than 64 bits");
    width
}

/// A `W`-bit category value distinguished by the marker type `Tag`.
///
/// ```
/// use respack::category::{Category, CategoryValue};
///
/// enum Subsystem {}
/// type SubsystemId = CategoryValue<Subsystem, 3>;
///
/// let drivers = SubsystemId::new(2);
/// assert_eq!(drivers.value(), 2);
/// assert_eq!(drivers, 2);
/// assert_eq!(SubsystemId::WIDTH, 3);
/// ```
pub struct CategoryValue<Tag, const W: u32> {
    value: u64,
    _tag: PhantomData<fn() -> Tag>,
}

impl<Tag, const W: u32> CategoryValue<Tag, W> {
    /// Build from a raw value. No range check.
    #[inline]
    pub const fn new(value: u64) -> Self {
        Self {
            value,
            _tag: PhantomData,
        }
    }

    /// The raw value.
    #[inline]
    pub const fn value(self) -> u64 {
        self.value
    }
}

impl<Tag, const W: u32> Category for CategoryValue<Tag, W> {
    const WIDTH: u32 = checked_width(W);

    #[inline]
    fn from_value(value: u64) -> Self {
        Self::new(value)
    }

    #[inline]
    fn value(self) -> u64 {
        self.value
    }
}

// Manual impls: derives would put bounds on `Tag`, which is only a marker.

impl<Tag, const W: u32> Clone for CategoryValue<Tag, W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Tag, const W: u32> Copy for CategoryValue<Tag, W> {}

impl<Tag, const W: u32> PartialEq for CategoryValue<Tag, W> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<Tag, const W: u32> Eq for CategoryValue<Tag, W> {}

impl<Tag, const W: u32> PartialEq<u64> for CategoryValue<Tag, W> {
    fn eq(&self, other: &u64) -> bool {
        self.value == *other
    }
}

impl<Tag, const W: u32> Hash for CategoryValue<Tag, W> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<Tag, const W: u32> Default for CategoryValue<Tag, W> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<Tag, const W: u32> fmt::Debug for CategoryValue<Tag, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = type_name::<Tag>();
        let short = tag.rsplit("::").next().unwrap_or(tag);
        write!(f, "{short}<{W}>({})", self.value)
    }
}
