//! Result layouts: where each category and the code live inside the storage.
//!
//! ## Static layouts
//!
//! An ordered tuple of [`Category`] types is a [`CategoryList`]. Fields are
//! laid out from the most significant bit down, in tuple order, and the code
//! takes every remaining low bit:
//!
//! ```text
//! MSB                                            LSB
//! | C1 | C2 | ... | Cn |            code            |
//! ```
//!
//! [`Selects<C, I>`] finds the position of `C` inside a list at compile time.
//! The index marker `I` is always inferred; a category missing from the list
//! has no impl and fails to compile.
//!
//! ## Runtime layouts
//!
//! [`RuntimeLayout`] is the same table resolved from plain widths, for layouts
//! that are only known at startup (e.g. from a config file). It validates
//! eagerly and rejects bad descriptors with [`LayoutError`].

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::bits::{self, extract_field, lsb_offset, place_field};
use crate::category::Category;
use crate::consts::{MAX_AGGREGATE_SLOTS, MAX_CATEGORIES, MIN_AGGREGATE_CAPACITY};
use crate::error::LayoutError;
use crate::storage::Storage;

// ─── Static layouts ─────────────────────────────────────────────────

/// An ordered, fixed list of categories (a tuple of 1 to 8 category types).
pub trait CategoryList: Copy + core::fmt::Debug {
    /// Number of categories.
    const LEN: usize;

    /// Category widths in declaration order.
    const WIDTHS: &'static [u32];

    /// Bits occupied by all categories together.
    const TOTAL_WIDTH: u32 = sum_widths(Self::WIDTHS);

    /// Pack every category into a `total_bits` wide integer, MSB first.
    /// Each value is truncated to its field width.
    fn pack(self, total_bits: u32) -> u128;

    /// Extract every category from a `total_bits` wide integer.
    fn unpack(bits: u128, total_bits: u32) -> Self;
}

/// Position marker for [`Selects`]. Never named by callers.
#[derive(Debug, Clone, Copy)]
pub struct Index<const N: usize>;

/// Category `C` is declared at position `I` of this list.
pub trait Selects<C: Category, I>: CategoryList {
    /// Zero-based position in declaration order.
    const POSITION: usize;

    /// Sum of the widths declared before `C`.
    const OFFSET_FROM_MSB: u32 = offset_before(Self::WIDTHS, Self::POSITION);
}

/// Sum of all widths.
pub const fn sum_widths(widths: &[u32]) -> u32 {
    let mut total = 0;
    let mut i = 0;
    while i < widths.len() {
        total += widths[i];
        i += 1;
    }
    total
}

/// Sum of the widths declared before `position`.
pub const fn offset_before(widths: &[u32], position: usize) -> u32 {
    assert!(position < widths.len(), "category position out of range");
    let mut total = 0;
    let mut i = 0;
    while i < position {
        total += widths[i];
        i += 1;
    }
    total
}

macro_rules! impl_category_list {
    ($len:literal => $($cat:ident $var:ident),+) => {
        impl<$($cat: Category),+> CategoryList for ($($cat,)+) {
            const LEN: usize = $len;
            const WIDTHS: &'static [u32] = &[$(<$cat as Category>::WIDTH),+];

            #[inline]
            fn pack(self, total_bits: u32) -> u128 {
                let ($($var,)+) = self;
                let mut bits = 0u128;
                let mut offset_from_msb = 0u32;
                $(
                    bits |= place_field(total_bits, offset_from_msb, $cat::WIDTH, $var.value() as u128);
                    offset_from_msb += $cat::WIDTH;
                )+
                let _ = offset_from_msb;
                bits
            }

            #[inline]
            fn unpack(bits: u128, total_bits: u32) -> Self {
                let mut offset_from_msb = 0u32;
                $(
                    let $var = {
                        let offset = lsb_offset(total_bits, offset_from_msb, $cat::WIDTH);
                        offset_from_msb += $cat::WIDTH;
                        $cat::from_value(extract_field(bits, offset, $cat::WIDTH) as u64)
                    };
                )+
                let _ = offset_from_msb;
                ($($var,)+)
            }
        }
    };
}

macro_rules! impl_selects {
    (@one [$($cat:ident),+]; $pos:literal => $sel:ident) => {
        impl<$($cat: Category),+> Selects<$sel, Index<$pos>> for ($($cat,)+) {
            const POSITION: usize = $pos;
        }
    };
    ($all:tt; $($pos:literal => $sel:ident),+) => {
        $( impl_selects!(@one $all; $pos => $sel); )+
    };
}

impl_category_list!(1 => C0 c0);
impl_selects!([C0]; 0 => C0);

impl_category_list!(2 => C0 c0, C1 c1);
impl_selects!([C0, C1]; 0 => C0, 1 => C1);

impl_category_list!(3 => C0 c0, C1 c1, C2 c2);
impl_selects!([C0, C1, C2]; 0 => C0, 1 => C1, 2 => C2);

impl_category_list!(4 => C0 c0, C1 c1, C2 c2, C3 c3);
impl_selects!([C0, C1, C2, C3]; 0 => C0, 1 => C1, 2 => C2, 3 => C3);

impl_category_list!(5 => C0 c0, C1 c1, C2 c2, C3 c3, C4 c4);
impl_selects!([C0, C1, C2, C3, C4]; 0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4);

impl_category_list!(6 => C0 c0, C1 c1, C2 c2, C3 c3, C4 c4, C5 c5);
impl_selects!([C0, C1, C2, C3, C4, C5]; 0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5);

impl_category_list!(7 => C0 c0, C1 c1, C2 c2, C3 c3, C4 c4, C5 c5, C6 c6);
impl_selects!([C0, C1, C2, C3, C4, C5, C6]; 0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6);

impl_category_list!(8 => C0 c0, C1 c1, C2 c2, C3 c3, C4 c4, C5 c5, C6 c6, C7 c7);
impl_selects!([C0, C1, C2, C3, C4, C5, C6, C7]; 0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6, 7 => C7);

// ─── Runtime layouts ────────────────────────────────────────────────

/// A contiguous field: `width` bits starting `offset` bits above bit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSpan {
    pub offset: u32,
    pub width: u32,
}

impl FieldSpan {
    /// Mask isolating this field.
    #[inline]
    pub const fn mask(self) -> u128 {
        bits::field_mask(bits::CARRIER_BITS, self.offset, self.width)
    }

    /// Read this field from `raw`, shifted down to bit 0.
    #[inline]
    pub const fn extract(self, raw: u128) -> u128 {
        extract_field(raw, self.offset, self.width)
    }

    /// Place `value` in this field, truncated to its width.
    #[inline]
    pub const fn place(self, value: u128) -> u128 {
        if self.width == 0 {
            return 0;
        }
        (value << self.offset) & self.mask()
    }
}

/// One result decoded through a [`RuntimeLayout`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedResult {
    /// The raw result bits.
    pub raw: u64,
    /// Category values in declaration order.
    pub categories: Vec<u64, MAX_CATEGORIES>,
    /// The residual code.
    pub code: u64,
}

impl DecodedResult {
    /// True for the all-zero (success) pattern.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.raw == 0
    }
}

/// Precomputed offset table for a layout known only at runtime.
///
/// ```
/// use respack::layout::RuntimeLayout;
///
/// let layout = RuntimeLayout::new(8, &[2, 2]).unwrap();
/// let decoded = layout.decode(0b01_10_0101);
/// assert_eq!(decoded.categories.as_slice(), &[1, 2]);
/// assert_eq!(decoded.code, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeLayout {
    storage_bits: u32,
    categories: Vec<FieldSpan, MAX_CATEGORIES>,
    code: FieldSpan,
}

impl RuntimeLayout {
    /// Resolve a layout from the storage width and ordered category widths.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError` if:
    /// - `storage_bits` is not 8, 16, 32 or 64
    /// - `widths` is empty or longer than `MAX_CATEGORIES`
    /// - any width is zero
    /// - the widths sum past `storage_bits`
    pub fn new(storage_bits: u32, widths: &[u32]) -> Result<Self, LayoutError> {
        if !matches!(storage_bits, 8 | 16 | 32 | 64) {
            return Err(LayoutError::UnsupportedStorage(storage_bits));
        }
        if widths.is_empty() {
            return Err(LayoutError::NoCategories);
        }
        if widths.len() > MAX_CATEGORIES {
            return Err(LayoutError::TooManyCategories {
                count: widths.len(),
                max: MAX_CATEGORIES,
            });
        }
        if let Some(index) = widths.iter().position(|&w| w == 0) {
            return Err(LayoutError::ZeroWidthCategory { index });
        }

        let total: u64 = widths.iter().map(|&w| u64::from(w)).sum();
        if total > u64::from(storage_bits) {
            return Err(LayoutError::CategoriesTooWide {
                total: u32::try_from(total).unwrap_or(u32::MAX),
                storage: storage_bits,
            });
        }
        let total = total as u32;

        let mut categories = Vec::new();
        let mut offset_from_msb = 0;
        for &width in widths {
            let span = FieldSpan {
                offset: lsb_offset(storage_bits, offset_from_msb, width),
                width,
            };
            categories
                .push(span)
                .map_err(|_| LayoutError::TooManyCategories {
                    count: widths.len(),
                    max: MAX_CATEGORIES,
                })?;
            offset_from_msb += width;
        }

        Ok(Self {
            storage_bits,
            categories,
            code: FieldSpan {
                offset: 0,
                width: storage_bits - total,
            },
        })
    }

    /// Describe the layout of a static result type.
    pub fn of<U: Storage, L: CategoryList>() -> Result<Self, LayoutError> {
        Self::new(U::BITS, L::WIDTHS)
    }

    /// Storage width in bits.
    #[inline]
    pub fn storage_bits(&self) -> u32 {
        self.storage_bits
    }

    /// Category fields in declaration order.
    #[inline]
    pub fn categories(&self) -> &[FieldSpan] {
        &self.categories
    }

    /// The code field (always at offset 0).
    #[inline]
    pub fn code(&self) -> FieldSpan {
        self.code
    }

    /// Bits occupied by the categories.
    #[inline]
    pub fn category_bits(&self) -> u32 {
        self.storage_bits - self.code.width
    }

    /// Decode a raw result. Bits above the storage width are ignored.
    pub fn decode(&self, raw: u128) -> DecodedResult {
        let raw = raw & bits::low_ones(self.storage_bits);
        let mut categories = Vec::new();
        for span in &self.categories {
            // Same length as `self.categories`, cannot overflow.
            let _ = categories.push(span.extract(raw) as u64);
        }
        DecodedResult {
            raw: raw as u64,
            categories,
            code: self.code.extract(raw) as u64,
        }
    }

    /// Encode category values and a code. Values are truncated to their
    /// field widths, as with static results.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::CategoryCountMismatch` if `categories` does not
    /// have one value per declared category.
    pub fn encode(&self, categories: &[u64], code: u64) -> Result<u128, LayoutError> {
        if categories.len() != self.categories.len() {
            return Err(LayoutError::CategoryCountMismatch {
                expected: self.categories.len(),
                found: categories.len(),
            });
        }
        let packed = self
            .categories
            .iter()
            .zip(categories)
            .fold(0u128, |acc, (span, &value)| acc | span.place(u128::from(value)));
        Ok(packed | self.code.place(u128::from(code)))
    }

    /// Number of slots an aggregate of `aggregate_bits` provides.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::AggregateTooNarrow` unless `aggregate_bits` is a
    /// supported storage width holding at least two results.
    pub fn aggregate_capacity(&self, aggregate_bits: u32) -> Result<u32, LayoutError> {
        let supported = matches!(aggregate_bits, 16 | 32 | 64 | 128);
        let capacity = aggregate_bits / self.storage_bits;
        if !supported || capacity < MIN_AGGREGATE_CAPACITY {
            return Err(LayoutError::AggregateTooNarrow {
                aggregate: aggregate_bits,
                storage: self.storage_bits,
            });
        }
        Ok(capacity)
    }

    /// Decode the slots of a raw aggregate, low slot first.
    ///
    /// Stops once every remaining bit is zero, like
    /// [`ErrorIter`](crate::iter::ErrorIter).
    pub fn decode_aggregate(
        &self,
        raw: u128,
        aggregate_bits: u32,
    ) -> Result<Vec<DecodedResult, MAX_AGGREGATE_SLOTS>, LayoutError> {
        let capacity = self.aggregate_capacity(aggregate_bits)?;
        let raw = raw & bits::low_ones(aggregate_bits);
        let mut results = Vec::new();
        for index in 0..capacity {
            if raw >> (index * self.storage_bits) == 0 {
                break;
            }
            let slot = bits::slot(raw, self.storage_bits, index);
            // At most 16 slots, the vector never fills up.
            let _ = results.push(self.decode(slot));
        }
        Ok(results)
    }
}
