//! Result codes: categories plus a residual code packed into one integer.
//!
//! A [`ResultCode<U, L>`] stores its fields in an unsigned `U`, laid out as
//! described in [`layout`](crate::layout). The all-zero pattern is reserved
//! for [`ResultCode::SUCCESS`]; callers must never build a real error whose
//! every field is zero.
//!
//! Construction never checks ranges. Category values and codes wider than
//! their fields are truncated and cannot bleed into a neighbouring field.
//!
//! ```
//! use respack::{result_category, result_type, get_category, get_code};
//!
//! result_category! {
//!     pub struct Category: 2;
//!     pub struct SubCategory: 2;
//! }
//! result_type!(pub Result8: u8 => Category, SubCategory);
//!
//! let r = Result8::make((Category(1), SubCategory(2)), 5);
//! assert_eq!(r.raw(), 0b01_10_0101);
//! assert_eq!(get_category::<Category, _>(r), 1);
//! assert_eq!(r.category::<SubCategory, _>(), 2);
//! assert_eq!(get_code(r), 5);
//! ```

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bits::{extract_field, field_mask, lsb_offset};
use crate::category::Category;
use crate::consts::MAX_RESULT_BITS;
use crate::layout::{CategoryList, Selects};
use crate::storage::Storage;

/// A packed result: categories `L` and a code in storage `U`.
#[repr(transparent)]
pub struct ResultCode<U, L> {
    raw: U,
    _layout: PhantomData<fn() -> L>,
}

/// Any type that stores one packed result in a [`Storage`] integer.
///
/// Aggregates are generic over this trait so they only deal in raw bits.
pub trait PackedResult: Copy + Eq + fmt::Debug {
    /// The integer the result is packed into.
    type Storage: Storage;

    /// Reinterpret raw bits.
    fn from_raw(raw: Self::Storage) -> Self;

    /// The raw bits.
    fn raw(self) -> Self::Storage;
}

impl<U: Storage, L: CategoryList> ResultCode<U, L> {
    /// The all-zero success value.
    pub const SUCCESS: Self = Self::from_raw(U::ZERO);

    /// Width of the code field. Evaluating this fails to compile if the
    /// categories do not fit into `U`.
    pub const CODE_WIDTH: u32 = {
        assert!(U::BITS <= MAX_RESULT_BITS, "result storage wider than 64 bits");
        assert!(
            L::TOTAL_WIDTH <= U::BITS,
            "the underlying type is too small to contain the categories"
        );
        U::BITS - L::TOTAL_WIDTH
    };

    /// Reinterpret raw bits as a result. No validation.
    #[inline]
    pub const fn from_raw(raw: U) -> Self {
        Self {
            raw,
            _layout: PhantomData,
        }
    }

    /// Compose a result from its categories and code.
    ///
    /// Every field is masked to its width; over-wide values are silently
    /// truncated.
    #[inline]
    pub fn make(categories: L, code: U) -> Self {
        let code_mask = field_mask(U::BITS, 0, Self::CODE_WIDTH);
        let packed = categories.pack(U::BITS) | (code.widen() & code_mask);
        Self::from_raw(U::narrow(packed))
    }

    /// The raw bits.
    #[inline]
    pub fn raw(self) -> U {
        self.raw
    }

    /// Extract category `C`. The index `I` is inferred:
    /// `r.category::<Domain, _>()`.
    #[inline]
    pub fn category<C, I>(self) -> C
    where
        C: Category,
        L: Selects<C, I>,
    {
        let _ = Self::CODE_WIDTH;
        let offset = lsb_offset(U::BITS, <L as Selects<C, I>>::OFFSET_FROM_MSB, C::WIDTH);
        C::from_value(extract_field(self.raw.widen(), offset, C::WIDTH) as u64)
    }

    /// Every category, in declaration order.
    #[inline]
    pub fn categories(self) -> L {
        let _ = Self::CODE_WIDTH;
        L::unpack(self.raw.widen(), U::BITS)
    }

    /// The residual code held in the low bits.
    #[inline]
    pub fn code(self) -> U {
        U::narrow(extract_field(self.raw.widen(), 0, Self::CODE_WIDTH))
    }

    /// True iff the raw bits are zero.
    #[inline]
    pub fn is_success(self) -> bool {
        self.raw.is_zero()
    }
}

impl<U: Storage, L: CategoryList> PackedResult for ResultCode<U, L> {
    type Storage = U;

    #[inline]
    fn from_raw(raw: U) -> Self {
        ResultCode::from_raw(raw)
    }

    #[inline]
    fn raw(self) -> U {
        self.raw
    }
}

/// A value category `C` can be read from. `I` is the inferred position.
pub trait HasCategory<C: Category, I> {
    /// Extract category `C`.
    fn extract_category(self) -> C;
}

impl<C, I, U, L> HasCategory<C, I> for ResultCode<U, L>
where
    C: Category,
    U: Storage,
    L: CategoryList + Selects<C, I>,
{
    #[inline]
    fn extract_category(self) -> C {
        self.category::<C, I>()
    }
}

/// Extract category `C` from `result`: `get_category::<Domain, _>(r)`.
///
/// Fails to compile if `C` is not declared for the result type.
#[inline]
pub fn get_category<C: Category, I>(result: impl HasCategory<C, I>) -> C {
    result.extract_category()
}

/// The residual code of `result`.
#[inline]
pub fn get_code<U: Storage, L: CategoryList>(result: ResultCode<U, L>) -> U {
    result.code()
}

/// True iff `result` is the all-zero success value.
///
/// See [`is_aggregate_success`](crate::aggregate::is_aggregate_success) for
/// aggregates.
#[inline]
pub fn is_success<U: Storage, L: CategoryList>(result: ResultCode<U, L>) -> bool {
    result.is_success()
}

// Manual impls: `L` is only a layout marker.

impl<U: Storage, L> Clone for ResultCode<U, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U: Storage, L> Copy for ResultCode<U, L> {}

impl<U: Storage, L> PartialEq for ResultCode<U, L> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<U: Storage, L> Eq for ResultCode<U, L> {}

impl<U: Storage, L> Hash for ResultCode<U, L> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<U: Storage, L: CategoryList> Default for ResultCode<U, L> {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl<U: Storage, L: CategoryList> fmt::Debug for ResultCode<U, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultCode")
            .field("raw", &self.raw)
            .field("categories", &self.categories())
            .field("code", &self.code())
            .finish()
    }
}

impl<U: Storage + Serialize, L> Serialize for ResultCode<U, L> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de, U: Storage + Deserialize<'de>, L> Deserialize<'de> for ResultCode<U, L> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        U::deserialize(deserializer).map(|raw| Self {
            raw,
            _layout: PhantomData,
        })
    }
}
